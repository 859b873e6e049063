//! # pulsenet: pulse-propagation network simulator
//!
//! A fixed network of named modules exchanging `low`/`high` pulses. Each
//! button press sends one low pulse into the relay and runs to
//! quiescence under strict FIFO delivery. No async, no threads: the only
//! clock is the press counter.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────┐
//! │    PeriodicityAnalyzer      │ ← presses until the feeder gate is stamped
//! │  ┌──────────────────────┐  │
//! │  │      Simulation       │  │ ← one press to quiescence
//! │  │  ┌────────────────┐  │  │
//! │  │  │   PulseQueue   │  │  │ ← strict FIFO delivery
//! │  │  └────────────────┘  │  │
//! │  │  ┌────────────────┐  │  │
//! │  │  │  ModuleGraph   │  │  │ ← arena of modules, built once
//! │  │  └────────────────┘  │  │
//! │  └──────────────────────┘  │
//! └────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pulsenet::{PeriodicityAnalyzer, Simulation};
//!
//! let wiring = "\
//! broadcaster -> a
//! %a -> inv, con
//! &inv -> b
//! %b -> con
//! &con -> output
//! ";
//!
//! let mut sim = Simulation::from_text(wiring).unwrap();
//! assert_eq!(sim.totals_over(1000).unwrap().product(), Some(11_687_500));
//!
//! let mut fresh = Simulation::from_text(wiring).unwrap();
//! let predicted = PeriodicityAnalyzer::new(1_000)
//!     .predict_first_low_at_sink(&mut fresh)
//!     .unwrap();
//! assert_eq!(predicted, 1);
//! ```

pub mod analyzer;
pub mod config;
pub mod dsl;
pub mod error;
pub mod logging;
pub mod message;
pub mod module;
pub mod press;
pub mod pulse;
pub mod registry;
pub mod scheduler;
pub mod simulation;
pub mod trace;
pub mod wiring;

// Re-exports for convenience.
pub use analyzer::{Periodicity, PeriodicityAnalyzer};
pub use config::RunConfig;
pub use dsl::NetworkBuilder;
pub use error::{PulseError, PulseResult};
pub use message::Message;
pub use module::{GateMemory, InputMemory, Module, ModuleId, ModuleKind};
pub use press::PressIndex;
pub use pulse::{Pulse, PulseCounts};
pub use registry::ModuleGraph;
pub use scheduler::PulseQueue;
pub use simulation::Simulation;
pub use trace::TraceEntry;
pub use wiring::{LineKind, WiringLine};
