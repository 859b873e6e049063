//! Button-press counter for the pulse network.
//!
//! Presses are the only clock the network has. A `PressIndex` names one
//! press; the first press of a fresh network is press 1, never press 0.

/// A 1-based button-press index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PressIndex(u64);

impl PressIndex {
    /// The index of the very first press.
    pub const FIRST: PressIndex = PressIndex(1);

    /// Create a press index from a raw value.
    #[inline]
    pub fn new(raw: u64) -> Self {
        PressIndex(raw)
    }

    /// Return the raw value.
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PressIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P#{}", self.0)
    }
}
