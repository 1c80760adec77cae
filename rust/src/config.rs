//! Configuration types for schedule recalculation.

use pyo3::prelude::*;

/// What to do when a predecessor name matches no activity.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReferencePolicy {
    /// Fail the recalculation with `InvalidActivityReference`.
    #[default]
    Reject,
    /// Drop the edge; the missing node contributes EF = 0.
    Ignore,
}

/// Options controlling a single schedule recalculation.
#[pyclass]
#[derive(Clone, Debug, Default)]
pub struct ScheduleOptions {
    /// Round expected durations to whole days for ES/EF/LS/LF arithmetic.
    /// Statistical fields (te, variance, sigma) are never rounded.
    #[pyo3(get, set)]
    pub round_durations: bool,
    /// Handling of predecessor names with no matching activity.
    #[pyo3(get, set)]
    pub reference_policy: ReferencePolicy,
    /// Verbosity level: 0=silent, 1=summary, 2=detail, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl ScheduleOptions {
    /// Options reproducing the integer-day engine: rounded durations,
    /// unknown predecessors ignored.
    pub fn rounded_permissive() -> Self {
        Self {
            round_durations: true,
            reference_policy: ReferencePolicy::Ignore,
            verbosity: 0,
        }
    }
}

#[pymethods]
impl ScheduleOptions {
    #[new]
    #[pyo3(signature = (round_durations=None, reference_policy=None, verbosity=None))]
    fn new(
        round_durations: Option<bool>,
        reference_policy: Option<ReferencePolicy>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            round_durations: round_durations.unwrap_or(defaults.round_durations),
            reference_policy: reference_policy.unwrap_or(defaults.reference_policy),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleOptions(round_durations={}, reference_policy={:?}, verbosity={})",
            self.round_durations, self.reference_policy, self.verbosity
        )
    }
}
