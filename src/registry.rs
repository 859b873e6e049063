/// Module registry: turns wiring lines into an immutable module graph.
///
/// Building happens in two passes. The first assigns every distinct name
/// a dense [`ModuleId`] in first-encounter order, whether it appears as a
/// definition or as a destination. The second materialises one
/// [`Module`] per handle, defaulting undefined names to sinks. A final
/// wiring walk then teaches every gate its complete input set and checks
/// that no sink has two callers.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::str::FromStr;

use tracing::debug;

use crate::error::{PulseError, PulseResult};
use crate::module::{Module, ModuleId, ModuleKind};
use crate::wiring::{parse_wiring, LineKind, WiringLine};

/// The static network: one module record per handle plus the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleGraph {
    modules: Vec<Module>,
    names: BTreeMap<String, ModuleId>,
    relay: ModuleId,
    /// Defined modules in wiring-line order, used to render the graph.
    definition_order: Vec<ModuleId>,
}

impl ModuleGraph {
    /// Build a graph from parsed wiring lines.
    pub fn from_wiring(lines: &[WiringLine]) -> PulseResult<Self> {
        // ── Pass 1: handles in first-encounter order ──────────
        let mut names: BTreeMap<String, ModuleId> = BTreeMap::new();
        let mut ordered: Vec<&str> = Vec::new();
        let mut definitions: BTreeMap<ModuleId, &WiringLine> = BTreeMap::new();
        let mut definition_order = Vec::with_capacity(lines.len());

        for line in lines {
            let id = intern(&mut names, &mut ordered, &line.name);
            for dest in &line.destinations {
                intern(&mut names, &mut ordered, dest);
            }
            if definitions.insert(id, line).is_some() {
                return Err(PulseError::DuplicateModule(line.name.clone()));
            }
            definition_order.push(id);
        }

        let relays: Vec<&WiringLine> = lines
            .iter()
            .filter(|l| l.kind == LineKind::Relay)
            .collect();
        let relay = match relays.as_slice() {
            [] => return Err(PulseError::MissingRelay),
            [only] => names[&only.name],
            many => {
                return Err(PulseError::MultipleRelays(
                    many.iter().map(|l| l.name.clone()).collect(),
                ))
            }
        };

        // ── Pass 2: materialise records ───────────────────────
        let modules = ordered
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let id = ModuleId::new(index);
                match definitions.get(&id) {
                    Some(line) => {
                        let destinations = line.destinations.iter().map(|d| names[d]).collect();
                        let kind = match line.kind {
                            LineKind::Relay => ModuleKind::Relay,
                            LineKind::Toggle => ModuleKind::toggle(),
                            LineKind::Gate => ModuleKind::gate(),
                        };
                        Module::new(name.to_string(), id, destinations, kind)
                    }
                    None => Module::new(name.to_string(), id, Vec::new(), ModuleKind::sink()),
                }
            })
            .collect();

        let mut graph = ModuleGraph {
            modules,
            names,
            relay,
            definition_order,
        };
        let edges = graph.walk()?;

        debug!(
            modules = graph.len(),
            sinks = graph.sinks().count(),
            edges,
            "module graph built"
        );
        Ok(graph)
    }

    /// Parse wiring text and build the graph in one step.
    pub fn from_text(text: &str) -> PulseResult<Self> {
        Self::from_wiring(&parse_wiring(text)?)
    }

    // ── Wiring walk ───────────────────────────────────────────────

    /// Breadth-first walk over every edge reachable from the relay.
    ///
    /// Each distinct `(caller, destination)` edge is visited exactly once.
    /// Returns the number of edges walked.
    fn walk(&mut self) -> PulseResult<usize> {
        let relay = self.relay;
        let mut queue: VecDeque<(ModuleId, ModuleId)> = self.modules[relay.index()]
            .destinations()
            .iter()
            .map(|&d| (relay, d))
            .collect();
        let mut visited: BTreeSet<(ModuleId, ModuleId)> = queue.iter().copied().collect();

        while let Some((caller, dest)) = queue.pop_front() {
            self.wire(caller, dest)?;
            for &next in self.modules[dest.index()].destinations() {
                if visited.insert((dest, next)) {
                    queue.push_back((dest, next));
                }
            }
        }
        Ok(visited.len())
    }

    /// Record `caller` as a source of `dest`.
    fn wire(&mut self, caller: ModuleId, dest: ModuleId) -> PulseResult<()> {
        let conflict = match &mut self.modules[dest.index()].kind {
            ModuleKind::Gate(memory) => {
                memory.register_input(caller);
                None
            }
            ModuleKind::Sink { caller: slot, .. } => match *slot {
                None => {
                    *slot = Some(caller);
                    None
                }
                Some(first) if first != caller => Some(first),
                Some(_) => None,
            },
            ModuleKind::Relay | ModuleKind::Toggle { .. } => None,
        };

        match conflict {
            Some(first) => Err(PulseError::SinkHasMultipleCallers {
                sink: self.modules[dest.index()].name().to_string(),
                first: self.modules[first.index()].name().to_string(),
                second: self.modules[caller.index()].name().to_string(),
            }),
            None => Ok(()),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Handle of the unique relay module.
    pub fn relay(&self) -> ModuleId {
        self.relay
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(id.index())
    }

    pub(crate) fn module_mut(&mut self, id: ModuleId) -> Option<&mut Module> {
        self.modules.get_mut(id.index())
    }

    /// All modules in handle order.
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Resolve a module name to its handle.
    pub fn lookup(&self, name: &str) -> Option<ModuleId> {
        self.names.get(name).copied()
    }

    /// Every sink module, in handle order.
    pub fn sinks(&self) -> impl Iterator<Item = &Module> {
        self.modules.iter().filter(|m| m.kind().is_sink())
    }
}

/// Return the handle for `name`, assigning the next one on first sight.
fn intern<'a>(
    names: &mut BTreeMap<String, ModuleId>,
    ordered: &mut Vec<&'a str>,
    name: &'a str,
) -> ModuleId {
    if let Some(&id) = names.get(name) {
        return id;
    }
    let id = ModuleId::new(ordered.len());
    ordered.push(name);
    names.insert(name.to_string(), id);
    id
}

impl FromStr for ModuleGraph {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

/// Renders the defined modules back to wiring text, in their original
/// line order. Sinks stay implicit.
impl std::fmt::Display for ModuleGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for id in &self.definition_order {
            let module = &self.modules[id.index()];
            let destinations: Vec<&str> = module
                .destinations()
                .iter()
                .map(|d| self.modules[d.index()].name())
                .collect();
            writeln!(
                f,
                "{}{} -> {}",
                module.kind().sigil(),
                module.name(),
                destinations.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "\
broadcaster -> a, b, c
%a -> b
%b -> c
%c -> inv
&inv -> a
";

    const SCENARIO_B: &str = "\
broadcaster -> a
%a -> inv, con
&inv -> b
%b -> con
&con -> output
";

    fn id(graph: &ModuleGraph, name: &str) -> ModuleId {
        graph.lookup(name).unwrap()
    }

    fn inputs(graph: &ModuleGraph, name: &str) -> Vec<String> {
        graph
            .module(id(graph, name))
            .unwrap()
            .kind()
            .as_gate()
            .unwrap()
            .known_inputs()
            .map(|i| graph.module(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_handles_in_first_encounter_order() {
        let graph = ModuleGraph::from_text(SCENARIO_B).unwrap();
        let order: Vec<&str> = graph.modules().iter().map(|m| m.name()).collect();
        assert_eq!(order, vec!["broadcaster", "a", "inv", "con", "b", "output"]);
        for (i, m) in graph.modules().iter().enumerate() {
            assert_eq!(m.id(), ModuleId::new(i));
        }
        assert_eq!(graph.relay(), ModuleId::new(0));
    }

    #[test]
    fn test_undefined_destination_becomes_sink() {
        let graph = ModuleGraph::from_text(SCENARIO_B).unwrap();
        let output = graph.module(id(&graph, "output")).unwrap();
        assert!(output.kind().is_sink());
        assert!(output.destinations().is_empty());
        match output.kind() {
            ModuleKind::Sink { caller, .. } => assert_eq!(*caller, Some(id(&graph, "con"))),
            other => panic!("expected sink, got {:?}", other),
        }
        assert_eq!(graph.sinks().count(), 1);
    }

    #[test]
    fn test_wiring_walk_collects_every_gate_input() {
        let graph = ModuleGraph::from_text(SCENARIO_B).unwrap();
        assert_eq!(inputs(&graph, "inv"), vec!["a"]);
        assert_eq!(inputs(&graph, "con"), vec!["a", "b"]);

        let graph = ModuleGraph::from_text(SCENARIO_A).unwrap();
        assert_eq!(inputs(&graph, "inv"), vec!["c"]);
        assert_eq!(graph.sinks().count(), 0);
    }

    #[test]
    fn test_unreachable_gate_has_no_inputs() {
        let graph = ModuleGraph::from_text("broadcaster -> a\n%a -> x\n&lonely -> a\n").unwrap();
        assert!(inputs(&graph, "lonely").is_empty());
    }

    #[test]
    fn test_missing_relay() {
        let err = ModuleGraph::from_text("%a -> b\n&b -> a\n").unwrap_err();
        assert_eq!(err, PulseError::MissingRelay);
    }

    #[test]
    fn test_multiple_relays() {
        let err = ModuleGraph::from_text("broadcaster -> a\nother -> a\n").unwrap_err();
        assert_eq!(
            err,
            PulseError::MultipleRelays(vec!["broadcaster".into(), "other".into()])
        );
    }

    #[test]
    fn test_duplicate_definition() {
        let err = ModuleGraph::from_text("broadcaster -> a\n%a -> b\n&a -> b\n").unwrap_err();
        assert_eq!(err, PulseError::DuplicateModule("a".into()));
    }

    #[test]
    fn test_sink_with_two_callers_is_rejected() {
        let err = ModuleGraph::from_text("broadcaster -> a, b\n%a -> out\n%b -> out\n").unwrap_err();
        assert_eq!(
            err,
            PulseError::SinkHasMultipleCallers {
                sink: "out".into(),
                first: "a".into(),
                second: "b".into(),
            }
        );
    }

    #[test]
    fn test_sink_listed_twice_by_one_caller_is_fine() {
        let graph = ModuleGraph::from_text("broadcaster -> a\n%a -> out, out\n").unwrap();
        assert_eq!(graph.sinks().count(), 1);
    }

    #[test]
    fn test_idempotent_build() {
        let g1 = ModuleGraph::from_text(SCENARIO_B).unwrap();
        let g2 = ModuleGraph::from_text(SCENARIO_B).unwrap();
        assert_eq!(g1, g2);
        for (m1, m2) in g1.modules().iter().zip(g2.modules()) {
            assert_eq!(m1.id(), m2.id());
            assert_eq!(m1.kind(), m2.kind());
        }
    }

    #[test]
    fn test_display_round_trips_handles() {
        // `b` is defined before `a` but first referenced after `c`, so
        // handle order and definition order disagree.
        let text = "broadcaster -> a\n%b -> c\n%a -> c, b\n%c -> out\n";
        let graph = ModuleGraph::from_text(text).unwrap();
        let names: Vec<&str> = graph.modules().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["broadcaster", "a", "b", "c", "out"]);

        let rendered = graph.to_string();
        assert_eq!(rendered, text);

        let rebuilt: ModuleGraph = rendered.parse().unwrap();
        assert_eq!(rebuilt, graph);
    }
}
