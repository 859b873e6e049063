//! Messages exchanged between modules during a press.

use crate::module::ModuleId;
use crate::pulse::Pulse;

/// One pulse in flight from `from` to `to`.
///
/// The button's own pulse to the relay is never a `Message`; only
/// module emissions are queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    pub from: ModuleId,
    pub to: ModuleId,
    pub pulse: Pulse,
}

impl Message {
    pub fn new(from: ModuleId, to: ModuleId, pulse: Pulse) -> Self {
        Message { from, to, pulse }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.from, self.pulse, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let m = Message::new(ModuleId::new(0), ModuleId::new(3), Pulse::High);
        assert_eq!(m.to_string(), "M0 -high-> M3");
    }
}
