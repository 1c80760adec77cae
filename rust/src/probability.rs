//! Completion probability under the PERT normal approximation.
//!
//! Project duration is treated as normally distributed with mean equal to the
//! critical-path duration and standard deviation equal to the project sigma.
//! All functions are pure; out-of-domain inputs return a boundary value
//! instead of an error.

use pyo3::prelude::*;

/// Standard normal CDF.
///
/// Hastings rational approximation (Abramowitz & Stegun 26.2.17), absolute
/// error below about 1e-6.
pub fn normal_cdf(z: f64) -> f64 {
    let t = 1.0 / (1.0 + 0.2316419 * z.abs());
    let d = 0.3989423 * (-z * z / 2.0).exp();
    let p = d
        * t
        * (0.3193815 + t * (-0.3565638 + t * (1.781478 + t * (-1.821256 + t * 1.330274))));
    if z > 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Inverse of the standard normal CDF.
///
/// Rational approximation (Abramowitz & Stegun 26.2.23), absolute error in
/// `z` below 4.5e-4. Returns 0 for `p` outside the open interval (0, 1).
pub fn normal_inverse_cdf(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return 0.0;
    }

    let tail = |q: f64| {
        let t = (-2.0 * q.ln()).sqrt();
        t - (2.515517 + 0.802853 * t + 0.010328 * t * t)
            / (1.0 + 1.432788 * t + 0.189269 * t * t + 0.001308 * t * t * t)
    };

    if p < 0.5 {
        -tail(p)
    } else {
        tail(1.0 - p)
    }
}

/// Percentage chance (0-100) of finishing within `target_days`.
pub fn probability_for_days(target_days: f64, project_duration: f64, project_sigma: f64) -> f64 {
    if project_sigma == 0.0 {
        return if target_days >= project_duration {
            100.0
        } else {
            0.0
        };
    }
    normal_cdf((target_days - project_duration) / project_sigma) * 100.0
}

/// Days needed to finish with `target_percent` (0-100) confidence.
pub fn days_for_probability(target_percent: f64, project_duration: f64, project_sigma: f64) -> f64 {
    if project_sigma == 0.0 {
        return project_duration;
    }
    project_duration + normal_inverse_cdf(target_percent / 100.0) * project_sigma
}

pub fn z_score(target_days: f64, project_duration: f64, project_sigma: f64) -> f64 {
    if project_sigma == 0.0 {
        return 0.0;
    }
    (target_days - project_duration) / project_sigma
}

/// Symmetric completion window of `k` standard deviations around the duration.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct SigmaInterval {
    #[pyo3(get)]
    pub lower: f64,
    #[pyo3(get)]
    pub upper: f64,
    /// Percentage chance of finishing inside `[lower, upper]`.
    #[pyo3(get)]
    pub probability: f64,
}

#[pymethods]
impl SigmaInterval {
    fn __repr__(&self) -> String {
        format!(
            "SigmaInterval(lower={}, upper={}, probability={})",
            self.lower, self.upper, self.probability
        )
    }
}

/// Window `duration ± k·sigma` and the chance of finishing inside it.
///
/// With zero sigma the window collapses onto the duration, which is certain.
pub fn sigma_interval(project_duration: f64, project_sigma: f64, k: f64) -> SigmaInterval {
    let half_width = k.abs() * project_sigma;
    let lower = project_duration - half_width;
    let upper = project_duration + half_width;

    let probability = if project_sigma == 0.0 {
        100.0
    } else {
        probability_for_days(upper, project_duration, project_sigma)
            - probability_for_days(lower, project_duration, project_sigma)
    };

    SigmaInterval {
        lower,
        upper,
        probability,
    }
}

/// One row of a completion range table.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct RangeRow {
    #[pyo3(get)]
    pub z: f64,
    /// Target days at `duration + z·sigma`.
    #[pyo3(get)]
    pub days: f64,
    #[pyo3(get)]
    pub probability: f64,
}

#[pymethods]
impl RangeRow {
    fn __repr__(&self) -> String {
        format!(
            "RangeRow(z={}, days={}, probability={})",
            self.z, self.days, self.probability
        )
    }
}

/// Whole-sigma offsets covered by [`range_table`].
pub const RANGE_TABLE_Z: [f64; 7] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];

/// Target days and completion probability at each whole sigma from -3 to +3.
pub fn range_table(project_duration: f64, project_sigma: f64) -> Vec<RangeRow> {
    RANGE_TABLE_Z
        .iter()
        .map(|&z| {
            let days = project_duration + z * project_sigma;
            RangeRow {
                z,
                days,
                probability: probability_for_days(days, project_duration, project_sigma),
            }
        })
        .collect()
}
