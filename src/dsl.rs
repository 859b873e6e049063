/// Fluent builder DSL for network setup.
///
/// Builds the same [`WiringLine`]s the text parser produces, so a
/// network assembled in code goes through exactly the same registry
/// checks as one read from a file.

use crate::config::RunConfig;
use crate::error::PulseResult;
use crate::registry::ModuleGraph;
use crate::simulation::Simulation;
use crate::wiring::{LineKind, WiringLine};

/// Conventional name of the relay module.
pub const BROADCASTER: &str = "broadcaster";

// ── NetworkBuilder ────────────────────────────────────────────────────

/// Fluent builder for a [`Simulation`].
///
/// # Example
/// ```rust
/// use pulsenet::dsl::NetworkBuilder;
///
/// let mut sim = NetworkBuilder::new()
///     .broadcaster(&["a", "b", "c"])
///     .toggle("a", &["b"])
///     .toggle("b", &["c"])
///     .toggle("c", &["inv"])
///     .gate("inv", &["a"])
///     .build()
///     .unwrap();
///
/// let counts = sim.press_button().unwrap();
/// assert_eq!((counts.low, counts.high), (8, 4));
/// ```
pub struct NetworkBuilder {
    lines: Vec<WiringLine>,
    config: RunConfig,
}

impl NetworkBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        NetworkBuilder {
            lines: Vec::new(),
            config: RunConfig::default(),
        }
    }

    // ── Modules ───────────────────────────────────────────────

    /// Define the relay under the conventional `broadcaster` name.
    pub fn broadcaster(self, destinations: &[&str]) -> Self {
        self.relay(BROADCASTER, destinations)
    }

    /// Define a relay under a custom name.
    pub fn relay(self, name: &str, destinations: &[&str]) -> Self {
        self.define(LineKind::Relay, name, destinations)
    }

    /// Define a toggle (flip-flop).
    pub fn toggle(self, name: &str, destinations: &[&str]) -> Self {
        self.define(LineKind::Toggle, name, destinations)
    }

    /// Define a gate (conjunction).
    pub fn gate(self, name: &str, destinations: &[&str]) -> Self {
        self.define(LineKind::Gate, name, destinations)
    }

    /// Add a pre-parsed wiring line.
    pub fn line(mut self, line: WiringLine) -> Self {
        self.lines.push(line);
        self
    }

    fn define(self, kind: LineKind, name: &str, destinations: &[&str]) -> Self {
        let destinations = destinations.iter().map(|d| d.to_string()).collect();
        self.line(WiringLine::new(kind, name, destinations))
    }

    // ── Configuration ─────────────────────────────────────────

    /// Record every delivered message.
    pub fn with_trace(mut self) -> Self {
        self.config.record_trace = true;
        self
    }

    /// Replace the whole run configuration.
    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    // ── Build ─────────────────────────────────────────────────

    /// Wiring lines collected so far.
    pub fn lines(&self) -> &[WiringLine] {
        &self.lines
    }

    /// Build only the module graph.
    pub fn build_graph(&self) -> PulseResult<ModuleGraph> {
        ModuleGraph::from_wiring(&self.lines)
    }

    /// Build the graph and wrap it in a configured simulation.
    pub fn build(self) -> PulseResult<Simulation> {
        let graph = self.build_graph()?;
        Ok(Simulation::with_config(graph, &self.config))
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
