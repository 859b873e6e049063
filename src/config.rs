//! Run configuration for simulations and the periodicity analyzer.

/// Press count used by the counting query when none is given.
pub const DEFAULT_PRESSES: u64 = 1000;

/// Cap on presses made while searching for periodicity.
pub const DEFAULT_MAX_PRESSES: u64 = 1_000_000;

/// Knobs for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct RunConfig {
    /// Presses for the counting query.
    pub presses: u64,
    /// Presses allowed before the analyzer gives up.
    pub max_presses: u64,
    /// Record every delivered message in the simulation trace.
    pub record_trace: bool,
}

impl RunConfig {
    pub fn new() -> Self {
        RunConfig {
            presses: DEFAULT_PRESSES,
            max_presses: DEFAULT_MAX_PRESSES,
            record_trace: false,
        }
    }

    pub fn presses(mut self, n: u64) -> Self {
        self.presses = n;
        self
    }

    pub fn max_presses(mut self, n: u64) -> Self {
        self.max_presses = n;
        self
    }

    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = RunConfig::default();
        assert_eq!(c.presses, 1000);
        assert_eq!(c.max_presses, 1_000_000);
        assert!(!c.record_trace);
    }

    #[test]
    fn test_builder_setters() {
        let c = RunConfig::new().presses(5).max_presses(50).with_trace();
        assert_eq!(
            c,
            RunConfig {
                presses: 5,
                max_presses: 50,
                record_trace: true,
            }
        );
    }

    #[cfg(feature = "serialize")]
    #[test]
    fn test_missing_fields_take_defaults() {
        let c: RunConfig = serde_json::from_str(r#"{"presses": 10}"#).unwrap();
        assert_eq!(c, RunConfig::new().presses(10));
    }
}
