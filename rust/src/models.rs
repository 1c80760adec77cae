//! Core data types for PERT scheduling.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

use crate::probability;

fn default_optimistic() -> f64 {
    1.0
}

fn default_most_likely() -> f64 {
    2.0
}

fn default_pessimistic() -> f64 {
    3.0
}

/// A task with a three-point duration estimate.
///
/// `predecessors` is the free-form comma-separated list of predecessor
/// *names* exactly as entered; see [`Activity::predecessor_names`].
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[pyo3(get, set)]
    pub id: i64,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    #[serde(default)]
    pub predecessors: String,
    /// Optimistic duration.
    #[pyo3(get, set)]
    #[serde(default = "default_optimistic")]
    pub a: f64,
    /// Most likely duration.
    #[pyo3(get, set)]
    #[serde(default = "default_most_likely")]
    pub m: f64,
    /// Pessimistic duration.
    #[pyo3(get, set)]
    #[serde(default = "default_pessimistic")]
    pub b: f64,
}

#[pymethods]
impl Activity {
    #[new]
    #[pyo3(signature = (id, name, predecessors=String::new(), a=1.0, m=2.0, b=3.0))]
    pub fn new(id: i64, name: String, predecessors: String, a: f64, m: f64, b: f64) -> Self {
        Self {
            id,
            name,
            predecessors,
            a,
            m,
            b,
        }
    }

    /// Expected duration `(a + 4m + b) / 6`.
    #[getter]
    pub fn te(&self) -> f64 {
        (self.a + 4.0 * self.m + self.b) / 6.0
    }

    /// `((b - a) / 6)^2`
    #[getter]
    pub fn variance(&self) -> f64 {
        ((self.b - self.a) / 6.0).powi(2)
    }

    #[getter]
    pub fn sigma(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Predecessor names split on commas, trimmed, empties removed.
    pub fn predecessor_names(&self) -> Vec<String> {
        self.predecessors
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn __repr__(&self) -> String {
        format!(
            "Activity(id={}, name={:?}, predecessors={:?}, a={}, m={}, b={})",
            self.id, self.name, self.predecessors, self.a, self.m, self.b
        )
    }
}

/// Scheduled timing and statistics for one activity.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityResult {
    #[pyo3(get)]
    pub id: i64,
    #[pyo3(get)]
    pub name: String,
    /// Predecessors that resolved to an activity, deduplicated, in the
    /// order they were written.
    #[pyo3(get)]
    pub predecessors: Vec<String>,
    /// Unrounded expected duration.
    #[pyo3(get)]
    pub te: f64,
    #[pyo3(get)]
    pub variance: f64,
    #[pyo3(get)]
    pub sigma: f64,
    /// Duration used by the timing passes (`te`, or `round(te)` when rounding).
    #[pyo3(get)]
    pub duration: f64,
    #[pyo3(get)]
    pub es: f64,
    #[pyo3(get)]
    pub ef: f64,
    #[pyo3(get)]
    pub ls: f64,
    #[pyo3(get)]
    pub lf: f64,
    #[pyo3(get)]
    pub slack: f64,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ActivityResult {
    fn __repr__(&self) -> String {
        format!(
            "ActivityResult(name={:?}, es={}, ef={}, ls={}, lf={}, slack={}, critical={})",
            self.name, self.es, self.ef, self.ls, self.lf, self.slack, self.is_critical
        )
    }
}

/// Immutable snapshot produced by one recalculation.
#[pyclass]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScheduleResult {
    /// Per-activity rows in input order.
    #[pyo3(get)]
    pub activities: Vec<ActivityResult>,
    #[pyo3(get)]
    pub project_duration: f64,
    /// Sum of critical-path variances.
    #[pyo3(get)]
    pub project_variance: f64,
    #[pyo3(get)]
    pub project_sigma: f64,
    /// Names of zero-slack activities, ordered by ES.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
}

#[pymethods]
impl ScheduleResult {
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn critical_activities(&self) -> Vec<ActivityResult> {
        self.activities
            .iter()
            .filter(|a| a.is_critical)
            .cloned()
            .collect()
    }

    /// Percentage chance of finishing within `target_days`.
    pub fn probability_for_days(&self, target_days: f64) -> f64 {
        probability::probability_for_days(target_days, self.project_duration, self.project_sigma)
    }

    /// Days needed to finish with `target_percent` confidence.
    pub fn days_for_probability(&self, target_percent: f64) -> f64 {
        probability::days_for_probability(
            target_percent,
            self.project_duration,
            self.project_sigma,
        )
    }

    pub fn z_score(&self, target_days: f64) -> f64 {
        probability::z_score(target_days, self.project_duration, self.project_sigma)
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(activities={}, duration={}, sigma={}, critical_path={:?})",
            self.activities.len(),
            self.project_duration,
            self.project_sigma,
            self.critical_path
        )
    }
}
