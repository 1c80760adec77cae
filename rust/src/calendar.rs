//! Calendar-date projection of schedule offsets.
//!
//! Offsets are in plain calendar days from a caller-supplied start date; there
//! is no working-day calendar.

use chrono::{Duration, NaiveDate};
use pyo3::prelude::*;

use crate::models::ScheduleResult;

/// Calendar dates for one activity's early and late windows.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityDates {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub early_start: NaiveDate,
    #[pyo3(get)]
    pub early_finish: NaiveDate,
    #[pyo3(get)]
    pub late_start: NaiveDate,
    #[pyo3(get)]
    pub late_finish: NaiveDate,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl ActivityDates {
    fn __repr__(&self) -> String {
        format!(
            "ActivityDates(name={:?}, early={}..{}, late={}..{})",
            self.name, self.early_start, self.early_finish, self.late_start, self.late_finish
        )
    }
}

/// `start` plus `days` rounded to the nearest whole day (halves round up).
///
/// Returns `None` for non-finite offsets or dates outside chrono's range.
pub fn add_days(start: NaiveDate, days: f64) -> Option<NaiveDate> {
    if !days.is_finite() {
        return None;
    }
    let whole = (days + 0.5).floor();
    if whole.abs() > i32::MAX as f64 {
        return None;
    }
    start.checked_add_signed(Duration::try_days(whole as i64)?)
}

/// Date on which the project is expected to finish.
pub fn completion_date(result: &ScheduleResult, start: NaiveDate) -> Option<NaiveDate> {
    add_days(start, result.project_duration)
}

/// Calendar dates for every activity, ordered by ES then name.
pub fn project_dates(result: &ScheduleResult, start: NaiveDate) -> Option<Vec<ActivityDates>> {
    let mut rows: Vec<_> = result.activities.iter().collect();
    rows.sort_by(|x, y| x.es.total_cmp(&y.es).then_with(|| x.name.cmp(&y.name)));

    rows.into_iter()
        .map(|act| {
            Some(ActivityDates {
                name: act.name.clone(),
                early_start: add_days(start, act.es)?,
                early_finish: add_days(start, act.ef)?,
                late_start: add_days(start, act.ls)?,
                late_finish: add_days(start, act.lf)?,
                is_critical: act.is_critical,
            })
        })
        .collect()
}
