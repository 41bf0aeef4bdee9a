use std::net::SocketAddr;

use vel_scheduler::{
    command::{Command, Twist},
    config::NetConfig,
    net::udp_transceiver::UdpTransceiver,
};

#[tokio::main]
async fn main() {
    let addr: SocketAddr = std::env::args()
        .nth(1)
        .map(|s| s.parse().expect("invalid address"))
        .unwrap_or(NetConfig::default().command_addr);
    let mut receiver = UdpTransceiver::bind(addr)
        .await
        .expect("couldn't bind the command address");
    loop {
        match receiver.receive::<Twist>().await {
            Ok(twist) => {
                dbg!(Command::from(twist));
            }
            Err(e) => {
                eprintln!("error while receiving a twist: {:?}", e);
            }
        }
    }
}
