use std::io;
use thiserror::Error;

pub mod udp_transceiver;

const BUFFER_SIZE: usize = 1024;

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("socket receive failed: {0}")]
    SocketReceiveError(io::Error),
    #[error("couldn't decode datagram: {0}")]
    DecodeError(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("socket send failed: {0}")]
    SocketSendError(io::Error),
    #[error("couldn't encode message: {0}")]
    EncodeError(serde_json::Error),
}

#[derive(Debug, Error)]
pub enum UdpTransceiverCreationError {
    #[error("couldn't bind socket: {0}")]
    SocketBindError(io::Error),
    #[error("couldn't connect socket: {0}")]
    SocketConnectError(io::Error),
}
