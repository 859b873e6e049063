//! Gate input memory: last pulse and first-high press per known input.

use std::collections::BTreeMap;

use crate::press::PressIndex;
use crate::pulse::Pulse;

use super::id::ModuleId;

/// What a gate remembers about one of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct InputMemory {
    /// The most recent pulse received from this input.
    pub last: Pulse,
    /// The press during which this input first delivered a high pulse.
    pub first_high: Option<PressIndex>,
}

/// Per-input memory of a gate module.
///
/// The key set is fixed by the wiring walk before any pulse is sent, so
/// the all-low default state exists from the start. Iteration is in
/// handle order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct GateMemory {
    inputs: BTreeMap<ModuleId, InputMemory>,
}

impl GateMemory {
    pub fn new() -> Self {
        GateMemory {
            inputs: BTreeMap::new(),
        }
    }

    /// Register `caller` as a known input, remembered as low.
    /// Registering an existing input leaves its memory untouched.
    pub fn register_input(&mut self, caller: ModuleId) {
        self.inputs.entry(caller).or_default();
    }

    /// Store `pulse` as the last pulse from `caller`, stamping `press` if
    /// this is the caller's first high pulse.
    pub fn remember(&mut self, caller: ModuleId, pulse: Pulse, press: PressIndex) {
        let memory = self.inputs.entry(caller).or_default();
        memory.last = pulse;
        if pulse.is_high() && memory.first_high.is_none() {
            memory.first_high = Some(press);
        }
    }

    /// The pulse a gate emits: low iff every remembered input is high.
    pub fn output(&self) -> Pulse {
        if self.inputs.values().all(|m| m.last.is_high()) {
            Pulse::Low
        } else {
            Pulse::High
        }
    }

    pub fn input(&self, caller: ModuleId) -> Option<&InputMemory> {
        self.inputs.get(&caller)
    }

    /// Known input handles, in handle order.
    pub fn known_inputs(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.inputs.keys().copied()
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// First-high stamps for every input, or `None` while any input has
    /// not yet sent a high pulse.
    pub fn first_high_stamps(&self) -> Option<Vec<(ModuleId, PressIndex)>> {
        self.inputs
            .iter()
            .map(|(id, m)| m.first_high.map(|p| (*id, p)))
            .collect()
    }

    /// Number of inputs that have not yet sent a high pulse.
    pub fn unstamped_count(&self) -> usize {
        self.inputs
            .values()
            .filter(|m| m.first_high.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: usize) -> ModuleId {
        ModuleId::new(n)
    }

    #[test]
    fn test_registered_inputs_start_low() {
        let mut g = GateMemory::new();
        g.register_input(id(1));
        g.register_input(id(2));
        assert_eq!(g.input(id(1)), Some(&InputMemory::default()));
        assert_eq!(g.output(), Pulse::High);
    }

    #[test]
    fn test_output_low_only_when_all_high() {
        let mut g = GateMemory::new();
        g.register_input(id(1));
        g.register_input(id(2));

        g.remember(id(1), Pulse::High, PressIndex::new(1));
        assert_eq!(g.output(), Pulse::High);

        g.remember(id(2), Pulse::High, PressIndex::new(1));
        assert_eq!(g.output(), Pulse::Low);

        g.remember(id(1), Pulse::Low, PressIndex::new(2));
        assert_eq!(g.output(), Pulse::High);
    }

    #[test]
    fn test_first_high_is_sticky() {
        let mut g = GateMemory::new();
        g.register_input(id(4));

        g.remember(id(4), Pulse::Low, PressIndex::new(1));
        assert_eq!(g.input(id(4)).unwrap().first_high, None);

        g.remember(id(4), Pulse::High, PressIndex::new(3));
        g.remember(id(4), Pulse::Low, PressIndex::new(4));
        g.remember(id(4), Pulse::High, PressIndex::new(6));
        assert_eq!(
            g.input(id(4)).unwrap().first_high,
            Some(PressIndex::new(3))
        );
    }

    #[test]
    fn test_stamps_incomplete_until_every_input_fired() {
        let mut g = GateMemory::new();
        g.register_input(id(1));
        g.register_input(id(2));

        g.remember(id(2), Pulse::High, PressIndex::new(5));
        assert_eq!(g.first_high_stamps(), None);
        assert_eq!(g.unstamped_count(), 1);

        g.remember(id(1), Pulse::High, PressIndex::new(7));
        assert_eq!(
            g.first_high_stamps(),
            Some(vec![(id(1), PressIndex::new(7)), (id(2), PressIndex::new(5))])
        );
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut g = GateMemory::new();
        g.register_input(id(1));
        g.remember(id(1), Pulse::High, PressIndex::new(2));
        g.register_input(id(1));
        assert_eq!(g.input_count(), 1);
        assert_eq!(g.input(id(1)).unwrap().last, Pulse::High);
    }

    #[test]
    fn test_empty_gate_emits_low() {
        assert_eq!(GateMemory::new().output(), Pulse::Low);
        assert_eq!(GateMemory::new().first_high_stamps(), Some(vec![]));
    }
}
