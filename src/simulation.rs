/// Pulse propagation engine.
///
/// Owns the module graph and a FIFO delivery queue. Each button press
/// runs to quiescence: one message is fully applied before the next is
/// dequeued, so a gate sees every contribution of a press before the
/// press ends and first-high stamps belong to exactly one press. The
/// loop is single-threaded and synchronous.

use tracing::trace;

use crate::config::RunConfig;
use crate::error::{PulseError, PulseResult};
use crate::message::Message;
use crate::module::{GateMemory, Module, ModuleId, ModuleKind};
use crate::press::PressIndex;
use crate::pulse::{Pulse, PulseCounts};
use crate::registry::ModuleGraph;
use crate::scheduler::PulseQueue;
use crate::trace::TraceEntry;

/// Top-level simulation driver.
///
/// Call [`press_button`](Simulation::press_button) to advance by one
/// press, or [`totals_over`](Simulation::totals_over) to run a batch.
#[derive(Debug, Clone)]
pub struct Simulation {
    graph: ModuleGraph,
    queue: PulseQueue,
    presses_done: u64,
    record_trace: bool,
    trace: Vec<TraceEntry>,
}

impl Simulation {
    /// Create a simulation over `graph` with every module in its
    /// initial state.
    pub fn new(graph: ModuleGraph) -> Self {
        Simulation {
            graph,
            queue: PulseQueue::new(),
            presses_done: 0,
            record_trace: false,
            trace: Vec::new(),
        }
    }

    pub fn with_config(graph: ModuleGraph, config: &RunConfig) -> Self {
        let mut sim = Self::new(graph);
        sim.record_trace = config.record_trace;
        sim
    }

    /// Parse wiring text and wrap the resulting graph.
    pub fn from_text(text: &str) -> PulseResult<Self> {
        Ok(Self::new(ModuleGraph::from_text(text)?))
    }

    // ── Pressing ──────────────────────────────────────────────────

    /// Run one button press to completion, stamping gate memory with
    /// `press`.
    ///
    /// The returned counts include the button's own low pulse. The
    /// internal press counter is left untouched; use
    /// [`press_button`](Simulation::press_button) for sequential presses.
    pub fn press(&mut self, press: PressIndex) -> PulseResult<PulseCounts> {
        let relay = self.graph.relay();
        let mut counts = PulseCounts::new(1, 0);

        self.queue.reset();
        self.deliver(relay, relay, Pulse::Low, press)?;

        let mut seq = 0u64;
        while let Some(message) = self.queue.pop_next() {
            counts.record(message.pulse);
            if self.record_trace {
                self.trace.push(TraceEntry {
                    press,
                    seq,
                    message,
                });
            }
            seq += 1;
            self.deliver(message.from, message.to, message.pulse, press)?;
        }

        trace!(%press, low = counts.low, high = counts.high, "press complete");
        Ok(counts)
    }

    /// Press with the next sequential index and advance the counter.
    pub fn press_button(&mut self) -> PulseResult<PulseCounts> {
        let next = PressIndex::new(self.presses_done + 1);
        let counts = self.press(next)?;
        self.presses_done += 1;
        Ok(counts)
    }

    /// Press `n` times in sequence and return the summed counts.
    pub fn totals_over(&mut self, n: u64) -> PulseResult<PulseCounts> {
        let mut total = PulseCounts::default();
        for _ in 0..n {
            total += self.press_button()?;
        }
        Ok(total)
    }

    /// Apply `pulse` from `from` to module `to` and enqueue its emissions.
    fn deliver(
        &mut self,
        from: ModuleId,
        to: ModuleId,
        pulse: Pulse,
        press: PressIndex,
    ) -> PulseResult<()> {
        let module = self
            .graph
            .module_mut(to)
            .ok_or(PulseError::UnknownModule(to))?;

        if let Some(out) = module.kind.receive(from, pulse, press) {
            for &dest in module.destinations() {
                self.queue.enqueue(Message::new(to, dest, out));
            }
        }
        Ok(())
    }

    // ── Inspection ────────────────────────────────────────────────

    pub fn graph(&self) -> &ModuleGraph {
        &self.graph
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.graph.module(id)
    }

    /// Presses made through `press_button` so far.
    pub fn presses_done(&self) -> u64 {
        self.presses_done
    }

    /// Memory of a gate module, or `None` if `id` is not a gate.
    pub fn gate_memory(&self, id: ModuleId) -> Option<&GateMemory> {
        self.graph.module(id)?.kind().as_gate()
    }

    /// Current flag of a toggle module, or `None` if `id` is not a toggle.
    pub fn toggle_state(&self, id: ModuleId) -> Option<bool> {
        match self.graph.module(id)?.kind() {
            ModuleKind::Toggle { active } => Some(*active),
            _ => None,
        }
    }

    /// Pulses absorbed so far by a sink, or `None` if `id` is not a sink.
    pub fn sink_counts(&self, id: ModuleId) -> Option<PulseCounts> {
        match self.graph.module(id)?.kind() {
            ModuleKind::Sink { absorbed, .. } => Some(*absorbed),
            _ => None,
        }
    }

    // ── Trace ─────────────────────────────────────────────────────

    pub fn is_tracing(&self) -> bool {
        self.record_trace
    }

    /// Every message delivered since the trace was last cleared.
    pub fn trace(&self) -> &[TraceEntry] {
        &self.trace
    }

    pub fn clear_trace(&mut self) {
        self.trace.clear();
    }

    /// Render a trace entry with module names, e.g. `broadcaster -low-> a`.
    pub fn describe(&self, entry: &TraceEntry) -> String {
        let name = |id: ModuleId| {
            self.graph
                .module(id)
                .map_or_else(|| id.to_string(), |m| m.name().to_string())
        };
        format!(
            "{} -{}-> {}",
            name(entry.message.from),
            entry.message.pulse,
            name(entry.message.to)
        )
    }
}
