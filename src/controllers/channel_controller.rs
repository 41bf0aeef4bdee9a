use tokio::sync::mpsc::{self, error::SendError, UnboundedReceiver, UnboundedSender};

use crate::command::Command;

use super::CommandSink;

/// In-process sink, hands the commands to whoever holds the receiver
/// (simulated robot, tests).
pub struct ChannelCommandSink {
    sender: UnboundedSender<Command>,
}

impl ChannelCommandSink {
    pub fn with_receiver() -> (Self, UnboundedReceiver<Command>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl CommandSink<SendError<Command>> for ChannelCommandSink {
    async fn send_command(&mut self, command: Command) -> Result<(), SendError<Command>> {
        self.sender.send(command)
    }

    async fn close(self) -> Result<(), SendError<Command>> {
        self.sender.send(Command::zero())
    }
}
