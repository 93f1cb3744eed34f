//! Analytics error types
//!
//! Too little history is not an error (it yields empty results); these
//! variants cover malformed input only.

use crate::checkin::Metric;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A rating fell outside the 1-10 scale
    #[error("Invalid {metric} rating {value} on {date}: must be between 1 and 10")]
    RatingOutOfRange {
        date: NaiveDate,
        metric: Metric,
        value: u8,
    },

    /// Correlation requested over empty series
    #[error("Cannot correlate empty series")]
    EmptySeries,

    /// Correlation requested over series of different lengths
    #[error("Series length mismatch: {left} vs {right}")]
    SeriesLengthMismatch { left: usize, right: usize },

    /// A series contained NaN or infinity
    #[error("Series contains a non-finite value at index {0}")]
    NonFinite(usize),
}

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
