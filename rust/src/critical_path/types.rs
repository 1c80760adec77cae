//! Types for critical path calculation.

/// Slack tolerance for critical classification.
///
/// Absorbs floating point error from repeated subtraction in the backward pass.
pub const CRITICAL_SLACK_EPSILON: f64 = 0.001;

/// Per-activity timing information from the forward and backward passes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityTiming {
    /// Earliest possible start time (from forward pass).
    pub earliest_start: f64,
    /// Earliest possible finish time (from forward pass).
    pub earliest_finish: f64,
    /// Latest allowable start time (from backward pass).
    pub latest_start: f64,
    /// Latest allowable finish time (from backward pass).
    pub latest_finish: f64,
    /// Slack = latest_finish - earliest_finish.
    pub slack: f64,
}

impl ActivityTiming {
    pub fn is_critical(&self) -> bool {
        self.slack.abs() < CRITICAL_SLACK_EPSILON
    }
}
