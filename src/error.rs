//! Structured error types for pulsenet.
//!
//! All fallible public APIs return `Result<T, PulseError>`. Parse and
//! configuration failures come from bad wiring text; `UnknownModule`
//! signals a broken graph rather than bad input; the analyzer variants
//! report networks the periodicity shortcut cannot handle.

use crate::module::ModuleId;

/// The top-level error type for the pulse network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PulseError {
    // ── Parse errors ──────────────────────────────────────

    /// A wiring line has no `->` separator.
    #[error("line {line}: expected `<name> -> <destinations>`, got {text:?}")]
    MalformedLine { line: usize, text: String },

    /// A wiring line defines a module with an empty name.
    #[error("line {line}: module name is empty")]
    EmptyName { line: usize },

    /// A wiring line lists an empty destination token.
    #[error("line {line}: destination list contains an empty name")]
    EmptyDestination { line: usize },

    // ── Configuration errors ──────────────────────────────

    /// The same module name is defined on more than one line.
    #[error("module {0:?} is defined more than once")]
    DuplicateModule(String),

    /// No line defines a relay (broadcaster) module.
    #[error("network has no relay module")]
    MissingRelay,

    /// More than one line defines a relay module.
    #[error("network has {} relay modules ({}), expected exactly one", .0.len(), .0.join(", "))]
    MultipleRelays(Vec<String>),

    /// A sink is reachable from two distinct callers.
    #[error("sink {sink:?} is called by both {first:?} and {second:?}")]
    SinkHasMultipleCallers {
        sink: String,
        first: String,
        second: String,
    },

    // ── Internal invariant violations ─────────────────────

    /// A message was addressed to a handle outside the graph.
    #[error("module {0} does not exist in this graph")]
    UnknownModule(ModuleId),

    // ── Analyzer errors ───────────────────────────────────

    /// The network does not have exactly one sink.
    #[error("expected exactly one sink module, found {found}")]
    NoUniqueSink { found: usize },

    /// The sink is never reached from the relay, so it has no caller.
    #[error("sink {0:?} is not reachable from the relay")]
    SinkUnreachable(String),

    /// The sink's caller is not a gate, so there are no inputs to track.
    #[error("sink {sink:?} is fed by {feeder:?}, which is not a gate")]
    SinkFeederNotGate { sink: String, feeder: String },

    /// The press cap was reached before every gate input sent a high pulse.
    #[error("no periodicity observed within {presses} presses")]
    NoPeriodicityObserved { presses: u64 },

    /// The combined period does not fit in a `u64`.
    #[error("combined period overflows u64")]
    PeriodOverflow,
}

/// Convenience alias for `Result<T, PulseError>`.
pub type PulseResult<T> = Result<T, PulseError>;
