//! Analytics Engine
//!
//! Pure analysis over a batch of check-ins.
//!
//! ## Outputs
//!
//! - **Correlations**: Pearson coefficients for three fixed metric pairs
//!   (needs 7+ check-ins)
//! - **Predictive insights**: hot flash, energy dip and sleep quality risk
//!   signals from the last 7 days (needs 14+ check-ins)
//! - **Patterns**: weekly mood cycle, hot flash timing and sleep to energy
//!   cascade (needs 14+ check-ins)
//!
//! Short histories produce empty results. Ratings outside 1-10 are
//! rejected with [`AnalyticsError`].

mod correlations;
mod engine;
mod error;
mod patterns;
mod predictive;
mod stats;
mod timing;

pub use correlations::{
    analyze_correlations, CorrelationResult, Significance, MIN_CORRELATION_CHECK_INS,
};
pub use engine::AnalyticsEngine;
pub use error::{AnalyticsError, AnalyticsResult};
pub use patterns::{
    detect_patterns, weekday_mood_averages, PatternInsight, PatternKind, MIN_PATTERN_CHECK_INS,
};
pub use predictive::{
    generate_predictive_insights, Confidence, InsightKind, PredictiveInsight,
    MIN_PREDICTIVE_CHECK_INS,
};
pub use stats::{
    mean, most_recent, pearson_correlation, validate_check_ins, RollingAverages, ROLLING_WINDOW,
};
pub use timing::{RandomTiming, RecordedTiming, TimingClassifier, TimingMode};
