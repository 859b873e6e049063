//! Periodicity analysis for the sink's feeding gate.
//!
//! The sink receives a low pulse only when its feeding gate `T` has seen
//! a high pulse from every input within one press. Rather than pressing
//! until that happens, the analyzer presses until each input of `T` has
//! sent its first high pulse, then combines those press indices with a
//! least common multiple.
//!
//! **This is a heuristic.** It assumes every input of `T` emits high
//! exactly on multiples of its first-high press and that the first joint
//! occurrence is their LCM. Nothing checks this; it holds for networks
//! built from independent counters feeding one gate, and may be wrong
//! for anything else. [`PeriodicityAnalyzer::first_low_at_sink_by_simulation`]
//! is the brute-force answer for cross-checking small networks.

use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::error::{PulseError, PulseResult};
use crate::module::{ModuleId, ModuleKind};
use crate::press::PressIndex;
use crate::pulse::PulseCounts;
use crate::registry::ModuleGraph;
use crate::simulation::Simulation;

// ── Periodicity report ────────────────────────────────────────────────

/// Outcome of a periodicity analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Periodicity {
    /// The unique sink.
    pub sink: ModuleId,
    /// The gate feeding the sink.
    pub feeder: ModuleId,
    /// First-high press for each input of the feeder, in handle order.
    pub stamps: Vec<(ModuleId, PressIndex)>,
    /// LCM of the stamps: the predicted first press delivering low to the sink.
    pub predicted: u64,
}

// ── Analyzer ──────────────────────────────────────────────────────────

/// Drives a [`Simulation`] until the sink's feeding gate is fully stamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicityAnalyzer {
    max_presses: u64,
}

impl PeriodicityAnalyzer {
    /// An analyzer that gives up after `max_presses` presses.
    pub fn new(max_presses: u64) -> Self {
        PeriodicityAnalyzer { max_presses }
    }

    pub fn from_config(config: &RunConfig) -> Self {
        Self::new(config.max_presses)
    }

    pub fn max_presses(&self) -> u64 {
        self.max_presses
    }

    /// Press until every input of the sink's feeder has a first-high stamp
    /// and report the stamps with their LCM.
    ///
    /// Stamps collected by presses made before this call count; presses
    /// continue from the simulation's current press counter.
    pub fn analyze(&self, sim: &mut Simulation) -> PulseResult<Periodicity> {
        let (sink, feeder) = locate_feeder(sim.graph())?;
        let mut presses = 0u64;
        let mut remaining = usize::MAX;

        let stamps = loop {
            let memory = sim
                .gate_memory(feeder)
                .ok_or(PulseError::UnknownModule(feeder))?;
            if let Some(stamps) = memory.first_high_stamps() {
                break stamps;
            }

            let unstamped = memory.unstamped_count();
            if unstamped < remaining {
                debug!(
                    press = sim.presses_done(),
                    unstamped,
                    inputs = memory.input_count(),
                    "waiting for feeder inputs"
                );
                remaining = unstamped;
            }

            if presses >= self.max_presses {
                warn!(presses, unstamped, "press cap reached before all feeder inputs fired high");
                return Err(PulseError::NoPeriodicityObserved { presses });
            }
            sim.press_button()?;
            presses += 1;
        };

        for (input, press) in &stamps {
            let name = sim.module(*input).map_or("?", |m| m.name());
            debug!(input = name, %press, "first high pulse");
        }

        let predicted = lcm(stamps.iter().map(|(_, p)| p.raw())).ok_or(PulseError::PeriodOverflow)?;
        info!(predicted, presses, "predicted first low pulse at sink");

        Ok(Periodicity {
            sink,
            feeder,
            stamps,
            predicted,
        })
    }

    /// Predicted press index at which the sink first receives a low pulse.
    ///
    /// See the module docs for the assumption this rests on.
    pub fn predict_first_low_at_sink(&self, sim: &mut Simulation) -> PulseResult<u64> {
        Ok(self.analyze(sim)?.predicted)
    }

    /// Brute force: press until the sink absorbs a low pulse and return
    /// that press.
    ///
    /// Only lows absorbed during this call count.
    pub fn first_low_at_sink_by_simulation(&self, sim: &mut Simulation) -> PulseResult<PressIndex> {
        let sink = unique_sink(sim.graph())?;
        let baseline = sink_lows(sim, sink)?;

        for _ in 0..self.max_presses {
            sim.press_button()?;
            if sink_lows(sim, sink)? > baseline {
                let press = PressIndex::new(sim.presses_done());
                info!(%press, "sink received a low pulse");
                return Ok(press);
            }
        }

        warn!(presses = self.max_presses, "press cap reached before the sink received a low pulse");
        Err(PulseError::NoPeriodicityObserved {
            presses: self.max_presses,
        })
    }
}

impl Default for PeriodicityAnalyzer {
    fn default() -> Self {
        Self::from_config(&RunConfig::default())
    }
}

/// Summed pulse counts over `n` sequential presses.
pub fn totals_over(sim: &mut Simulation, n: u64) -> PulseResult<PulseCounts> {
    sim.totals_over(n)
}

/// Predict with the default press cap.
pub fn predict_first_low_at_sink(sim: &mut Simulation) -> PulseResult<u64> {
    PeriodicityAnalyzer::default().predict_first_low_at_sink(sim)
}

// ── Helpers ───────────────────────────────────────────────────────────

fn unique_sink(graph: &ModuleGraph) -> PulseResult<ModuleId> {
    let sinks: Vec<ModuleId> = graph.sinks().map(|m| m.id()).collect();
    match sinks.as_slice() {
        [only] => Ok(*only),
        other => Err(PulseError::NoUniqueSink { found: other.len() }),
    }
}

/// The unique sink and the gate feeding it.
fn locate_feeder(graph: &ModuleGraph) -> PulseResult<(ModuleId, ModuleId)> {
    let sink_id = unique_sink(graph)?;
    let sink = graph.module(sink_id).ok_or(PulseError::UnknownModule(sink_id))?;

    let caller = match sink.kind() {
        ModuleKind::Sink { caller: Some(c), .. } => *c,
        _ => return Err(PulseError::SinkUnreachable(sink.name().to_string())),
    };
    let feeder = graph.module(caller).ok_or(PulseError::UnknownModule(caller))?;

    match feeder.kind() {
        ModuleKind::Gate(_) => Ok((sink_id, caller)),
        _ => Err(PulseError::SinkFeederNotGate {
            sink: sink.name().to_string(),
            feeder: feeder.name().to_string(),
        }),
    }
}

fn sink_lows(sim: &Simulation, sink: ModuleId) -> PulseResult<u64> {
    sim.sink_counts(sink)
        .map(|c| c.low)
        .ok_or(PulseError::UnknownModule(sink))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple of `values`, or `None` on overflow.
/// The LCM of no values is 1.
pub fn lcm<I: IntoIterator<Item = u64>>(values: I) -> Option<u64> {
    values.into_iter().try_fold(1u64, |acc, v| {
        if v == 0 {
            return Some(0);
        }
        (acc / gcd(acc, v)).checked_mul(v)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two counter bits, each inverted into the final gate. `ia` fires
    /// high every 2nd press and `ib` every 4th.
    const COUNTER: &str = "\
broadcaster -> a
%a -> b, ia
%b -> ib
&ia -> t
&ib -> t
&t -> rx
";

    const SCENARIO_B: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    fn sim(text: &str) -> Simulation {
        Simulation::from_text(text).unwrap()
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm([2, 4]), Some(4));
        assert_eq!(lcm([3, 5, 7]), Some(105));
        assert_eq!(lcm([6, 10, 15]), Some(30));
        assert_eq!(lcm(std::iter::empty::<u64>()), Some(1));
        assert_eq!(lcm([u64::MAX, u64::MAX - 1]), None);
    }

    #[test]
    fn test_counter_network_uses_lcm() {
        let mut s = sim(COUNTER);
        let report = PeriodicityAnalyzer::new(100).analyze(&mut s).unwrap();

        let graph = s.graph();
        assert_eq!(report.sink, graph.lookup("rx").unwrap());
        assert_eq!(report.feeder, graph.lookup("t").unwrap());
        assert_eq!(
            report.stamps,
            vec![
                (graph.lookup("ia").unwrap(), PressIndex::new(2)),
                (graph.lookup("ib").unwrap(), PressIndex::new(4)),
            ]
        );
        // LCM, not product.
        assert_eq!(report.predicted, 4);
        assert_eq!(s.presses_done(), 4);
    }

    #[test]
    fn test_prediction_matches_brute_force() {
        let analyzer = PeriodicityAnalyzer::new(100);
        for text in [COUNTER, SCENARIO_B] {
            let predicted = analyzer.predict_first_low_at_sink(&mut sim(text)).unwrap();
            let actual = analyzer
                .first_low_at_sink_by_simulation(&mut sim(text))
                .unwrap();
            assert_eq!(predicted, actual.raw(), "network:\n{}", text);
        }
    }

    #[test]
    fn test_scenario_b_sink_gets_low_on_first_press() {
        let mut s = sim(SCENARIO_B);
        assert_eq!(predict_first_low_at_sink(&mut s).unwrap(), 1);
    }

    #[test]
    fn test_earlier_presses_keep_their_stamps() {
        let mut s = sim(COUNTER);
        totals_over(&mut s, 3).unwrap();
        let report = PeriodicityAnalyzer::new(100).analyze(&mut s).unwrap();
        assert_eq!(report.predicted, 4);
        assert_eq!(s.presses_done(), 4);
    }

    #[test]
    fn test_no_sink() {
        let text = "broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a\n";
        let err = predict_first_low_at_sink(&mut sim(text)).unwrap_err();
        assert_eq!(err, PulseError::NoUniqueSink { found: 0 });
    }

    #[test]
    fn test_two_sinks() {
        let err = predict_first_low_at_sink(&mut sim("broadcaster -> x, y\n")).unwrap_err();
        assert_eq!(err, PulseError::NoUniqueSink { found: 2 });
    }

    #[test]
    fn test_unreachable_sink() {
        let text = "broadcaster -> a\n%a -> b\n%b -> a\n&x -> out\n";
        let err = predict_first_low_at_sink(&mut sim(text)).unwrap_err();
        assert_eq!(err, PulseError::SinkUnreachable("out".into()));
    }

    #[test]
    fn test_sink_fed_by_toggle() {
        let err = predict_first_low_at_sink(&mut sim("broadcaster -> a\n%a -> out\n")).unwrap_err();
        assert_eq!(
            err,
            PulseError::SinkFeederNotGate {
                sink: "out".into(),
                feeder: "a".into(),
            }
        );
    }

    #[test]
    fn test_press_cap() {
        // The relay only ever sends low, so `g` never sees a high pulse.
        let text = "broadcaster -> g\n&g -> out\n";
        let analyzer = PeriodicityAnalyzer::new(10);

        let mut s = sim(text);
        assert_eq!(
            analyzer.analyze(&mut s).unwrap_err(),
            PulseError::NoPeriodicityObserved { presses: 10 }
        );
        assert_eq!(s.presses_done(), 10);

        assert_eq!(
            analyzer.first_low_at_sink_by_simulation(&mut sim(text)).unwrap_err(),
            PulseError::NoPeriodicityObserved { presses: 10 }
        );
    }

    #[test]
    fn test_analyzer_from_config() {
        let config = RunConfig::new().max_presses(42);
        assert_eq!(PeriodicityAnalyzer::from_config(&config).max_presses(), 42);
        assert_eq!(PeriodicityAnalyzer::default().max_presses(), 1_000_000);
    }
}
