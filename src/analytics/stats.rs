//! Statistical helpers shared by the analytics and recommendation engines

use super::error::{AnalyticsError, AnalyticsResult};
use crate::checkin::{CheckIn, Metric, RATING_MAX, RATING_MIN};
use serde::Serialize;

/// Number of check-ins in the rolling window
pub const ROLLING_WINDOW: usize = 7;

/// Reject check-ins whose ratings fall outside the 1-10 scale
pub fn validate_check_ins(check_ins: &[CheckIn]) -> AnalyticsResult<()> {
    for check_in in check_ins {
        for &metric in Metric::all() {
            let value = check_in.rating(metric);
            if !(RATING_MIN..=RATING_MAX).contains(&value) {
                return Err(AnalyticsError::RatingOutOfRange {
                    date: check_in.date,
                    metric,
                    value,
                });
            }
        }
    }
    Ok(())
}

/// The last `n` check-ins (all of them if fewer)
pub fn most_recent(check_ins: &[CheckIn], n: usize) -> &[CheckIn] {
    &check_ins[check_ins.len().saturating_sub(n)..]
}

/// Averages over the most recent check-ins
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingAverages {
    pub mood: f64,
    pub energy: f64,
    pub libido: f64,
    pub sleep: f64,
    pub stress: f64,
}

impl RollingAverages {
    /// Average each metric over the last 7 check-ins
    ///
    /// Returns `None` for an empty history.
    pub fn from_recent(check_ins: &[CheckIn]) -> Option<Self> {
        let window = most_recent(check_ins, ROLLING_WINDOW);
        if window.is_empty() {
            return None;
        }

        let avg = |metric: Metric| mean(&metric.series(window));

        Some(Self {
            mood: avg(Metric::Mood),
            energy: avg(Metric::Energy),
            libido: avg(Metric::Libido),
            sleep: avg(Metric::Sleep),
            stress: avg(Metric::Stress),
        })
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Calculate Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation, or no variance in either series
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> AnalyticsResult<f64> {
    if x.len() != y.len() {
        return Err(AnalyticsError::SeriesLengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(AnalyticsError::EmptySeries);
    }
    if let Some(idx) = x.iter().chain(y.iter()).position(|v| !v.is_finite()) {
        return Err(AnalyticsError::NonFinite(idx % x.len()));
    }

    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2))).sqrt();

    if denominator == 0.0 {
        Ok(0.0)
    } else {
        // Rounding can push a perfect fit a hair past 1
        Ok((numerator / denominator).clamp(-1.0, 1.0))
    }
}
