//! Trace entries: one record per message delivered during a press.

use crate::message::Message;
use crate::press::PressIndex;

/// A record of a single delivered message.
///
/// Appended by [`Simulation`](crate::simulation::Simulation) when trace
/// recording is enabled. `seq` is the delivery position within the
/// press, starting at 0; the button's own pulse is not traced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TraceEntry {
    pub press: PressIndex,
    pub seq: u64,
    pub message: Message,
}

impl std::fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} #{}] {}", self.press, self.seq, self.message)
    }
}
