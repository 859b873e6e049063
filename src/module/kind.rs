//! Module records and the four pulse-update rules.

use crate::press::PressIndex;
use crate::pulse::{Pulse, PulseCounts};

use super::gate::GateMemory;
use super::id::ModuleId;

// ── ModuleKind ────────────────────────────────────────────────────────

/// Behaviour and state of a module.
///
/// Each variant carries only the state its update rule needs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ModuleKind {
    /// The broadcaster. Forwards every pulse unchanged.
    Relay,
    /// A flip-flop. Ignores high pulses; a low pulse flips `active`.
    Toggle { active: bool },
    /// A conjunction over its known inputs.
    Gate(GateMemory),
    /// A terminal module. Absorbs pulses from its single caller.
    Sink {
        caller: Option<ModuleId>,
        absorbed: PulseCounts,
    },
}

impl ModuleKind {
    pub fn toggle() -> Self {
        ModuleKind::Toggle { active: false }
    }

    pub fn gate() -> Self {
        ModuleKind::Gate(GateMemory::new())
    }

    pub fn sink() -> Self {
        ModuleKind::Sink {
            caller: None,
            absorbed: PulseCounts::default(),
        }
    }

    /// Apply this module's update rule to one incoming pulse.
    ///
    /// Returns the pulse to send to every destination, or `None` when the
    /// module stays silent.
    pub fn receive(&mut self, caller: ModuleId, pulse: Pulse, press: PressIndex) -> Option<Pulse> {
        match self {
            ModuleKind::Relay => Some(pulse),
            ModuleKind::Toggle { active } => {
                if pulse.is_high() {
                    return None;
                }
                *active = !*active;
                Some(if *active { Pulse::High } else { Pulse::Low })
            }
            ModuleKind::Gate(memory) => {
                memory.remember(caller, pulse, press);
                Some(memory.output())
            }
            ModuleKind::Sink { absorbed, .. } => {
                absorbed.record(pulse);
                None
            }
        }
    }

    /// Leading sigil used in wiring text (`""` for relays and sinks).
    pub fn sigil(&self) -> &'static str {
        match self {
            ModuleKind::Toggle { .. } => "%",
            ModuleKind::Gate(_) => "&",
            ModuleKind::Relay | ModuleKind::Sink { .. } => "",
        }
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, ModuleKind::Sink { .. })
    }

    pub fn as_gate(&self) -> Option<&GateMemory> {
        match self {
            ModuleKind::Gate(memory) => Some(memory),
            _ => None,
        }
    }
}

// ── Module ────────────────────────────────────────────────────────────

/// One named node of the network.
///
/// Name, handle and destinations are fixed once the registry has built
/// the graph; only `kind` state changes while pulses flow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    name: String,
    id: ModuleId,
    destinations: Vec<ModuleId>,
    pub(crate) kind: ModuleKind,
}

impl Module {
    pub(crate) fn new(name: String, id: ModuleId, destinations: Vec<ModuleId>, kind: ModuleKind) -> Self {
        Module {
            name,
            id,
            destinations,
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn destinations(&self) -> &[ModuleId] {
        &self.destinations
    }

    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }
}
