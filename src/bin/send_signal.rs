use std::net::SocketAddr;

use clap::{Parser, ValueEnum};
use vel_scheduler::{config::NetConfig, net::udp_transceiver::UdpTransceiver, world::InboundMessage};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Signal {
    MotorsEnabled,
    LidarAlarm,
    SoftStop,
}

/// Sends a single safety signal to a running scheduler.
#[derive(Parser, Debug)]
struct Args {
    #[arg(value_enum)]
    signal: Signal,

    /// `true` raises the alarm / soft stop or enables the motors
    #[arg(action = clap::ArgAction::Set)]
    value: bool,

    #[arg(long)]
    target: Option<SocketAddr>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let target = args.target.unwrap_or(NetConfig::default().inbound_addr);

    let message = match args.signal {
        Signal::MotorsEnabled => InboundMessage::MotorsEnabled { enabled: args.value },
        Signal::LidarAlarm => InboundMessage::LidarAlarm { active: args.value },
        Signal::SoftStop => InboundMessage::SoftStop { active: args.value },
    };

    let socket = UdpTransceiver::connect(target)
        .await
        .expect("couldn't open a socket");
    socket
        .send(&message)
        .await
        .expect("couldn't send the signal");
    println!("sent {:?} to {}", message, target);
}
