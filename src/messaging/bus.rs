use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

use super::JobMessage;

/// Channel between worker threads and the UI thread
pub struct MessageBus {
    sender: Sender<JobMessage>,
    receiver: Receiver<JobMessage>,
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBus {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        MessageBus { sender, receiver }
    }

    /// Get a sender that can be moved into a worker thread
    pub fn sender(&self) -> Sender<JobMessage> {
        self.sender.clone()
    }

    pub fn try_receive(&self) -> Result<JobMessage, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Everything queued so far, capped at `max_messages` per frame
    pub fn drain(&self, max_messages: usize) -> Vec<JobMessage> {
        let mut messages = Vec::new();
        while messages.len() < max_messages {
            match self.try_receive() {
                Ok(msg) => messages.push(msg),
                Err(_) => break,
            }
        }
        messages
    }
}
