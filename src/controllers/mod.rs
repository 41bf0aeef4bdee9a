use std::{fmt::Debug, future::Future};

use crate::command::Command;

pub mod channel_controller;
pub mod udp_controller;

/// Whatever carries the commands to the actuators.
pub trait CommandSink<E>
where
    E: Debug,
{
    fn send_command(&mut self, command: Command) -> impl Future<Output = Result<(), E>> + Send;

    /// leaves the base at rest
    fn close(self) -> impl Future<Output = Result<(), E>> + Send;
}
