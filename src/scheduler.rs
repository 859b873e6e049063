/// Deterministic delivery queue.
///
/// Messages are delivered strictly first-in first-out. A module's
/// emissions are enqueued together, in destination order, behind
/// everything already pending, so propagation within a press proceeds
/// level by level.

use std::collections::VecDeque;

use crate::message::Message;

/// FIFO queue of messages awaiting delivery within one press.
#[derive(Debug, Clone, Default)]
pub struct PulseQueue {
    queue: VecDeque<Message>,
}

impl PulseQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        PulseQueue {
            queue: VecDeque::new(),
        }
    }

    /// Append a message at the back.
    pub fn enqueue(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Pop the oldest pending message.
    ///
    /// Returns `None` when the press has quiesced.
    pub fn pop_next(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drop anything pending.
    pub fn reset(&mut self) {
        self.queue.clear();
    }
}
