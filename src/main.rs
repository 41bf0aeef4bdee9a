use std::{path::PathBuf, process};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vel_scheduler::{
    config::Config,
    control::VelScheduler,
    controllers::udp_controller::UdpCommandSink,
    launch_control_thread,
    net::udp_transceiver::UdpTransceiver,
    update_world_forever,
    world::{PoseTracker, World},
};

/// Drives a differential base along a fixed list of segments using
/// trapezoidal velocity profiles.
#[derive(Parser, Debug)]
#[command(name = "vel_scheduler", long_about = None)]
struct Args {
    /// TOML configuration, built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                error!("couldn't load {}: {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    info!(
        "{} segments, period {:?}, plan end: {:?}",
        config.segments.len(),
        config.control_period(),
        config.plan_end
    );

    let world = World::default();
    let inbound = match UdpTransceiver::bind(config.net.inbound_addr).await {
        Ok(inbound) => inbound,
        Err(e) => {
            error!("couldn't listen on {}: {}", config.net.inbound_addr, e);
            process::exit(1);
        }
    };
    let sink = match UdpCommandSink::new(config.net.command_addr).await {
        Ok(sink) => sink,
        Err(e) => {
            error!("couldn't reach the base on {}: {}", config.net.command_addr, e);
            process::exit(1);
        }
    };
    info!(
        "listening on {}, commanding {}",
        config.net.inbound_addr, config.net.command_addr
    );

    let tracker = PoseTracker::new(config.odometry);
    tokio::spawn(update_world_forever(world.clone(), inbound, tracker));

    let scheduler = VelScheduler::from_config(&config);
    let (stop_sender, control_handle) =
        launch_control_thread(world, scheduler, config.control_period(), sink);

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("couldn't listen for ctrl-c: {}", e);
    }
    info!("shutting down");
    let _ = stop_sender.send(());
    if let Err(e) = control_handle.await {
        error!("control thread panicked: {}", e);
    }
}
