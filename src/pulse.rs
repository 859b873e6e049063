//! Pulse values and per-press pulse counters.

use std::ops::{Add, AddAssign};

/// A two-valued signal carried by every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Pulse {
    #[default]
    Low,
    High,
}

impl Pulse {
    #[inline]
    pub fn is_high(self) -> bool {
        matches!(self, Pulse::High)
    }
}

impl std::fmt::Display for Pulse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pulse::Low => write!(f, "low"),
            Pulse::High => write!(f, "high"),
        }
    }
}

// ── PulseCounts ───────────────────────────────────────────────────────

/// Number of low and high pulses delivered.
///
/// Counts returned by a press include the button's own low pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct PulseCounts {
    pub low: u64,
    pub high: u64,
}

impl PulseCounts {
    pub fn new(low: u64, high: u64) -> Self {
        PulseCounts { low, high }
    }

    /// Count one pulse.
    #[inline]
    pub fn record(&mut self, pulse: Pulse) {
        match pulse {
            Pulse::Low => self.low += 1,
            Pulse::High => self.high += 1,
        }
    }

    /// `low * high`, the figure usually reported for a counting run.
    /// Returns `None` on overflow.
    pub fn product(&self) -> Option<u64> {
        self.low.checked_mul(self.high)
    }
}

impl Add for PulseCounts {
    type Output = PulseCounts;

    fn add(self, rhs: PulseCounts) -> PulseCounts {
        PulseCounts {
            low: self.low + rhs.low,
            high: self.high + rhs.high,
        }
    }
}

impl AddAssign for PulseCounts {
    fn add_assign(&mut self, rhs: PulseCounts) {
        self.low += rhs.low;
        self.high += rhs.high;
    }
}

impl std::iter::Sum for PulseCounts {
    fn sum<I: Iterator<Item = PulseCounts>>(iter: I) -> Self {
        iter.fold(PulseCounts::default(), Add::add)
    }
}

impl std::fmt::Display for PulseCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "low={} high={}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pulse_is_low() {
        assert_eq!(Pulse::default(), Pulse::Low);
    }

    #[test]
    fn test_record() {
        let mut c = PulseCounts::default();
        c.record(Pulse::Low);
        c.record(Pulse::High);
        c.record(Pulse::Low);
        assert_eq!(c, PulseCounts::new(2, 1));
    }

    #[test]
    fn test_sum_and_product() {
        let total: PulseCounts = [PulseCounts::new(8, 4), PulseCounts::new(4, 4)]
            .into_iter()
            .sum();
        assert_eq!(total, PulseCounts::new(12, 8));
        assert_eq!(total.product(), Some(96));
    }

    #[test]
    fn test_product_overflow() {
        assert_eq!(PulseCounts::new(1 << 33, 1 << 33).product(), None);
        assert_eq!(PulseCounts::new(u64::MAX, 1).product(), Some(u64::MAX));
        assert_eq!(PulseCounts::new(u64::MAX, 0).product(), Some(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(PulseCounts::new(8, 4).to_string(), "low=8 high=4");
        assert_eq!(Pulse::High.to_string(), "high");
    }
}
