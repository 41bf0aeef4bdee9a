use std::net::SocketAddr;

use crate::{
    command::{Command, Twist},
    net::{udp_transceiver::UdpTransceiver, SendError, UdpTransceiverCreationError},
};

use super::CommandSink;

/// Publishes each command as a JSON `Twist` datagram.
pub struct UdpCommandSink {
    socket: UdpTransceiver,
}

impl UdpCommandSink {
    pub async fn new(command_addr: SocketAddr) -> Result<Self, UdpTransceiverCreationError> {
        Ok(Self {
            socket: UdpTransceiver::connect(command_addr).await?,
        })
    }
}

impl CommandSink<SendError> for UdpCommandSink {
    async fn send_command(&mut self, command: Command) -> Result<(), SendError> {
        self.socket.send(&Twist::from(command)).await.map(|_| ())
    }

    // workaround for async Drop, to be replaced when std::future::AsyncDrop is stabilized
    async fn close(self) -> Result<(), SendError> {
        self.socket.send(&Twist::default()).await.map(|_| ())
    }
}
