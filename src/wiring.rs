/// Wiring-text parsing.
///
/// One module per line:
///
/// ```text
/// broadcaster -> a, b
/// %a -> inv
/// &inv -> b
/// ```
///
/// No sigil defines the relay, `%` a toggle and `&` a gate. Destination
/// names that never appear as a definition become sinks in the registry.

use crate::error::{PulseError, PulseResult};

/// Sigil for toggle (flip-flop) modules.
pub const TOGGLE_SIGIL: char = '%';
/// Sigil for gate (conjunction) modules.
pub const GATE_SIGIL: char = '&';

const ARROW: &str = "->";

/// The kind a wiring line can declare. Sinks are never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Relay,
    Toggle,
    Gate,
}

impl LineKind {
    fn sigil(self) -> &'static str {
        match self {
            LineKind::Relay => "",
            LineKind::Toggle => "%",
            LineKind::Gate => "&",
        }
    }
}

/// One parsed module definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringLine {
    pub kind: LineKind,
    pub name: String,
    pub destinations: Vec<String>,
}

impl WiringLine {
    pub fn new<S: Into<String>>(kind: LineKind, name: S, destinations: Vec<String>) -> Self {
        WiringLine {
            kind,
            name: name.into(),
            destinations,
        }
    }

    /// Parse a single non-blank line. `line_no` is 1-based and only used
    /// for error reporting.
    pub fn parse(text: &str, line_no: usize) -> PulseResult<Self> {
        let (head, tail) = text
            .split_once(ARROW)
            .ok_or_else(|| PulseError::MalformedLine {
                line: line_no,
                text: text.to_string(),
            })?;

        let head = head.trim();
        let (kind, name) = match head.chars().next() {
            Some(TOGGLE_SIGIL) => (LineKind::Toggle, &head[1..]),
            Some(GATE_SIGIL) => (LineKind::Gate, &head[1..]),
            _ => (LineKind::Relay, head),
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(PulseError::EmptyName { line: line_no });
        }

        let destinations = tail
            .split(',')
            .map(str::trim)
            .map(|d| {
                if d.is_empty() {
                    Err(PulseError::EmptyDestination { line: line_no })
                } else {
                    Ok(d.to_string())
                }
            })
            .collect::<PulseResult<Vec<_>>>()?;

        Ok(WiringLine {
            kind,
            name: name.to_string(),
            destinations,
        })
    }
}

impl std::fmt::Display for WiringLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            self.kind.sigil(),
            self.name,
            ARROW,
            self.destinations.join(", ")
        )
    }
}

/// Parse a whole wiring description, skipping blank lines.
pub fn parse_wiring(text: &str) -> PulseResult<Vec<WiringLine>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| WiringLine::parse(line, i + 1))
        .collect()
}
