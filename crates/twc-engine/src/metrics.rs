//! Per-timestep performance metrics for the model driver.
//!
//! [`StepMetrics`] captures wall-clock timing for a single coupling
//! timestep, broken down by component.

use twc_core::TimestepId;

/// Timing collected during a single timestep.
///
/// All durations are in microseconds. The driver populates these fields
/// after each `step()` call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// The timestep these metrics describe.
    pub timestep: TimestepId,
    /// Wall-clock time for the entire timestep, in microseconds.
    pub total_us: u64,
    /// Per-component execution times: `(name, microseconds)`, in run order.
    pub component_us: Vec<(String, u64)>,
}

impl StepMetrics {
    /// Time spent in the named component, if it ran.
    pub fn component(&self, name: &str) -> Option<u64> {
        self.component_us
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, us)| *us)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.timestep, TimestepId(0));
        assert_eq!(m.total_us, 0);
        assert!(m.component_us.is_empty());
    }

    #[test]
    fn component_lookup_by_name() {
        let m = StepMetrics {
            timestep: TimestepId(3),
            total_us: 100,
            component_us: vec![("surface".into(), 40), ("lake".into(), 10)],
        };
        assert_eq!(m.component("lake"), Some(10));
        assert_eq!(m.component("river"), None);
    }
}
