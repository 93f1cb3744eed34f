//! Analytics Engine
//!
//! Stateless facade over the analysis functions. The only thing it holds is
//! the timing classifier used by pattern detection.

use super::correlations::{analyze_correlations, CorrelationResult};
use super::error::AnalyticsResult;
use super::patterns::{detect_patterns, PatternInsight};
use super::predictive::{generate_predictive_insights, PredictiveInsight};
use super::stats::validate_check_ins;
use super::timing::{RecordedTiming, TimingClassifier, TimingMode};
use crate::checkin::{CheckIn, TrackerReading};
use chrono::{NaiveDate, Utc};

/// Derives correlations, predictive insights and patterns from check-ins
pub struct AnalyticsEngine {
    timing: Box<dyn TimingClassifier>,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(TimingMode::default(), None)
    }
}

impl AnalyticsEngine {
    /// Create an engine with the configured timing classifier
    pub fn new(mode: TimingMode, seed: Option<u64>) -> Self {
        Self::with_timing(mode.build(seed))
    }

    /// Create an engine with a custom timing classifier
    pub fn with_timing(timing: Box<dyn TimingClassifier>) -> Self {
        tracing::debug!(classifier = timing.name(), "Created analytics engine");
        Self { timing }
    }

    /// Fully deterministic engine
    pub fn deterministic() -> Self {
        Self::with_timing(Box::new(RecordedTiming))
    }

    /// Name of the active timing classifier
    pub fn timing_name(&self) -> &'static str {
        self.timing.name()
    }

    /// Correlate sleep/mood, energy/stress and libido/energy
    pub fn analyze_correlations(
        &self,
        check_ins: &[CheckIn],
    ) -> AnalyticsResult<Vec<CorrelationResult>> {
        validate_check_ins(check_ins)?;
        analyze_correlations(check_ins)
    }

    /// Predictive insights relative to today's date (UTC)
    pub fn generate_predictive_insights(
        &self,
        check_ins: &[CheckIn],
        tracker_data: Option<&[TrackerReading]>,
    ) -> AnalyticsResult<Vec<PredictiveInsight>> {
        self.generate_predictive_insights_as_of(check_ins, tracker_data, Utc::now().date_naive())
    }

    /// Predictive insights relative to a given date
    pub fn generate_predictive_insights_as_of(
        &self,
        check_ins: &[CheckIn],
        tracker_data: Option<&[TrackerReading]>,
        today: NaiveDate,
    ) -> AnalyticsResult<Vec<PredictiveInsight>> {
        validate_check_ins(check_ins)?;
        generate_predictive_insights(check_ins, tracker_data, today)
    }

    /// Detect weekly, temperature and cascade patterns
    pub fn detect_patterns(&self, check_ins: &[CheckIn]) -> AnalyticsResult<Vec<PatternInsight>> {
        validate_check_ins(check_ins)?;
        Ok(detect_patterns(check_ins, self.timing.as_ref()))
    }
}
