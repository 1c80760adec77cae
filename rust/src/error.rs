//! Structural errors raised while building or timing the schedule graph.

use thiserror::Error;

/// Errors that abort a schedule recalculation.
///
/// A failed recalculation never yields a partial result; callers keep their
/// previous snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("Activity {activity:?} lists unknown predecessor {predecessor:?}")]
    InvalidActivityReference {
        activity: String,
        predecessor: String,
    },
    #[error("Circular dependency detected at activity {activity:?}")]
    CyclicDependency { activity: String },
    #[error("Activity name {name:?} is used more than once")]
    DuplicateActivityName { name: String },
    #[error("Activity {activity:?} has invalid estimate {field} = {value}")]
    InvalidEstimate {
        activity: String,
        field: &'static str,
        value: f64,
    },
}

impl From<ScheduleError> for pyo3::PyErr {
    fn from(err: ScheduleError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
