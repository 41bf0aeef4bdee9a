use super::{ReceiveError, SendError, UdpTransceiverCreationError, BUFFER_SIZE};
use serde::{de::DeserializeOwned, Serialize};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;

/// JSON datagrams over udp, one message per datagram
pub struct UdpTransceiver {
    socket: UdpSocket,
    buffer: [u8; BUFFER_SIZE],
}

impl UdpTransceiver {
    /// sends to `remote` from an ephemeral local port
    pub async fn connect(remote: SocketAddr) -> Result<Self, UdpTransceiverCreationError> {
        let socket = UdpSocket::bind(SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), 0))
            .await
            .map_err(UdpTransceiverCreationError::SocketBindError)?;
        socket
            .connect(remote)
            .await
            .map_err(UdpTransceiverCreationError::SocketConnectError)?;

        Ok(Self {
            socket,
            buffer: [0u8; BUFFER_SIZE],
        })
    }

    /// receives anything sent to `local`
    pub async fn bind(local: SocketAddr) -> Result<Self, UdpTransceiverCreationError> {
        let socket = UdpSocket::bind(local)
            .await
            .map_err(UdpTransceiverCreationError::SocketBindError)?;

        Ok(Self {
            socket,
            buffer: [0u8; BUFFER_SIZE],
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn send<T: Serialize>(&self, message: &T) -> Result<usize, SendError> {
        let data = serde_json::to_vec(message).map_err(SendError::EncodeError)?;
        self.socket
            .send(&data)
            .await
            .map_err(SendError::SocketSendError)
    }

    pub async fn receive<T: DeserializeOwned>(&mut self) -> Result<T, ReceiveError> {
        let (received_bytes_count, _) = self
            .socket
            .recv_from(&mut self.buffer)
            .await
            .map_err(ReceiveError::SocketReceiveError)?;
        serde_json::from_slice(&self.buffer[0..received_bytes_count])
            .map_err(ReceiveError::DecodeError)
    }
}
