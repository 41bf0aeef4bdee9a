#![deny(clippy::unwrap_used)]
#![allow(async_fn_in_trait)]
pub mod command;
pub mod config;
pub mod control;
pub mod controllers;
pub mod math;
pub mod net;
pub mod testing;
pub mod trajectories;
pub mod world;

use std::{fmt::Debug, sync::LockResult, time::Duration};

use control::VelScheduler;
use controllers::CommandSink;
use net::udp_transceiver::UdpTransceiver;
use tokio::{
    select,
    sync::oneshot::{self, Sender},
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};
use tracing::{info, warn};
use world::{InboundMessage, PoseTracker, World};

pub trait IgnoreMutexErr<T> {
    fn unwrap_ignore_poison(self) -> T;
}

impl<T> IgnoreMutexErr<T> for LockResult<T> {
    fn unwrap_ignore_poison(self) -> T {
        match self {
            Ok(r) => r,
            Err(poisoned) => {
                // Handle mutex poisoning
                let guard = poisoned.into_inner();
                warn!("mutex was poisoned, recovering from mutex poisoning");
                guard
            }
        }
    }
}

async fn control_loop<E: Debug, C: CommandSink<E>>(
    world: &World,
    scheduler: &mut VelScheduler,
    sink: &mut C,
    period: Duration,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut has_odometry = false;
    info!("waiting for valid odometry...");
    loop {
        interval.tick().await; // first tick ticks immediately that's why it's at the beginning

        // don't command anything before we know where we are
        let Some(odometry) = world.latest_odometry() else {
            continue;
        };
        if !has_odometry {
            info!(
                "received odometry, proceeding from x = {:.3}, y = {:.3}, phi = {:.3}",
                odometry.pose.position.x, odometry.pose.position.y, odometry.pose.heading
            );
            has_odometry = true;
        }

        let report = scheduler.tick(&odometry, &world.signals.snapshot());
        if let Err(e) = sink.send_command(report.command).await {
            warn!("couldn't send command {:?}: {:?}", report.command, e);
        }
    }
}

/// Spawns the fixed rate control loop. It runs until something is sent on (or
/// the drop of) the returned sender, then closes the sink.
pub fn launch_control_thread<E: Debug + Send + 'static>(
    world: World,
    mut scheduler: VelScheduler,
    period: Duration,
    mut sink: impl CommandSink<E> + Send + 'static,
) -> (Sender<()>, JoinHandle<()>) {
    let (stop_sender, stop_receiver) = oneshot::channel();
    let handle = tokio::spawn(async move {
        select! {
            _ = control_loop(&world, &mut scheduler, &mut sink, period) => {}
            _ = stop_receiver => {
                info!("control thread received stop signal")
            }
        };

        if let Err(e) = sink.close().await {
            warn!("couldn't bring the base to rest: {:?}", e);
        }
    });
    (stop_sender, handle)
}

/// Feeds the world with whatever arrives on `receiver`, forever.
pub async fn update_world_forever(world: World, mut receiver: UdpTransceiver, mut tracker: PoseTracker) {
    loop {
        match receiver.receive::<InboundMessage>().await {
            Ok(message) => world.handle_message(message, &mut tracker, Instant::now()),
            Err(e) => warn!("dropping inbound datagram: {}", e),
        }
    }
}
