//! PERT/CPM scheduling engine.
//!
//! Computes earliest/latest times, slack and the critical path for activities
//! with three-point duration estimates, and answers completion-probability
//! questions under the PERT normal approximation.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

pub mod calendar;
mod config;
pub mod critical_path;
mod error;
pub mod interner;
pub mod logging;
mod models;
pub mod probability;
pub mod project_file;
pub mod schedule;

pub use calendar::{add_days, completion_date, project_dates, ActivityDates};
pub use config::{ReferencePolicy, ScheduleOptions};
pub use error::ScheduleError;
pub use models::{Activity, ActivityResult, ScheduleResult};
pub use probability::{
    days_for_probability, normal_cdf, normal_inverse_cdf, probability_for_days, range_table,
    sigma_interval, z_score, RangeRow, SigmaInterval,
};
pub use project_file::ProjectFileError;
pub use schedule::compute;

/// Compute the schedule for a list of activities.
///
/// # Arguments
/// * `activities` - Activities in display order; names must be unique
/// * `options` - Rounding, reference policy and verbosity (defaults if omitted)
///
/// # Returns
/// * ScheduleResult snapshot with per-activity timings and project statistics
///
/// # Raises
/// * ValueError on duplicate names, invalid estimates, unknown predecessors
///   (when rejected) or circular dependencies
#[pyfunction]
#[pyo3(signature = (activities, options=None))]
fn compute_schedule(
    activities: Vec<Activity>,
    options: Option<ScheduleOptions>,
) -> PyResult<ScheduleResult> {
    let options = options.unwrap_or_default();
    Ok(compute(&activities, &options)?)
}

#[pyfunction]
#[pyo3(name = "normal_cdf")]
fn py_normal_cdf(z: f64) -> f64 {
    normal_cdf(z)
}

#[pyfunction]
#[pyo3(name = "normal_inverse_cdf")]
fn py_normal_inverse_cdf(p: f64) -> f64 {
    normal_inverse_cdf(p)
}

#[pyfunction]
#[pyo3(name = "probability_for_days")]
fn py_probability_for_days(target_days: f64, project_duration: f64, project_sigma: f64) -> f64 {
    probability_for_days(target_days, project_duration, project_sigma)
}

#[pyfunction]
#[pyo3(name = "days_for_probability")]
fn py_days_for_probability(target_percent: f64, project_duration: f64, project_sigma: f64) -> f64 {
    days_for_probability(target_percent, project_duration, project_sigma)
}

#[pyfunction]
#[pyo3(name = "z_score")]
fn py_z_score(target_days: f64, project_duration: f64, project_sigma: f64) -> f64 {
    z_score(target_days, project_duration, project_sigma)
}

#[pyfunction]
#[pyo3(name = "sigma_interval", signature = (project_duration, project_sigma, k=1.0))]
fn py_sigma_interval(project_duration: f64, project_sigma: f64, k: f64) -> SigmaInterval {
    sigma_interval(project_duration, project_sigma, k)
}

#[pyfunction]
#[pyo3(name = "range_table")]
fn py_range_table(project_duration: f64, project_sigma: f64) -> Vec<RangeRow> {
    range_table(project_duration, project_sigma)
}

/// Calendar dates for each activity, ordered by earliest start.
///
/// # Raises
/// * ValueError if a date falls outside the supported calendar range
#[pyfunction]
#[pyo3(name = "project_dates")]
fn py_project_dates(result: ScheduleResult, start: NaiveDate) -> PyResult<Vec<ActivityDates>> {
    project_dates(&result, start).ok_or_else(|| {
        pyo3::exceptions::PyValueError::new_err("Schedule dates out of calendar range")
    })
}

/// Parse a JSON project file into activities.
#[pyfunction]
fn load_project(content: &str) -> PyResult<Vec<Activity>> {
    Ok(project_file::from_json(content)?)
}

/// Serialize activities into a JSON project file.
#[pyfunction]
fn save_project(activities: Vec<Activity>) -> PyResult<String> {
    Ok(project_file::to_json(&activities)?)
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Activity>()?;
    m.add_class::<ActivityResult>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<ActivityDates>()?;
    m.add_class::<SigmaInterval>()?;
    m.add_class::<RangeRow>()?;

    // Config types
    m.add_class::<ScheduleOptions>()?;
    m.add_class::<ReferencePolicy>()?;

    // Scheduling
    m.add_function(wrap_pyfunction!(compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_project_dates, m)?)?;

    // Probability
    m.add_function(wrap_pyfunction!(py_normal_cdf, m)?)?;
    m.add_function(wrap_pyfunction!(py_normal_inverse_cdf, m)?)?;
    m.add_function(wrap_pyfunction!(py_probability_for_days, m)?)?;
    m.add_function(wrap_pyfunction!(py_days_for_probability, m)?)?;
    m.add_function(wrap_pyfunction!(py_z_score, m)?)?;
    m.add_function(wrap_pyfunction!(py_sigma_interval, m)?)?;
    m.add_function(wrap_pyfunction!(py_range_table, m)?)?;

    // Persistence
    m.add_function(wrap_pyfunction!(load_project, m)?)?;
    m.add_function(wrap_pyfunction!(save_project, m)?)?;

    Ok(())
}
