//! Analysis Report
//!
//! Runs the whole pipeline in one call: correlations, predictive insights
//! and patterns from the analytics engine, then recommendations built on
//! top of them.

use crate::analytics::{
    AnalyticsEngine, AnalyticsResult, CorrelationResult, PatternInsight, PredictiveInsight,
};
use crate::checkin::{CheckIn, TrackerReading};
use crate::recommendations::{ContentItem, PersonalizedRecommendation, RecommendationEngine};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Combined output of both engines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// RFC 3339 timestamp of generation
    pub generated_at: String,
    /// Reference date for predictive insights
    pub as_of: NaiveDate,
    pub check_in_count: usize,
    pub correlations: Vec<CorrelationResult>,
    pub insights: Vec<PredictiveInsight>,
    pub patterns: Vec<PatternInsight>,
    pub recommendations: Vec<PersonalizedRecommendation>,
}

/// Run analytics and recommendations over a check-in history
///
/// `as_of` defaults to today's date (UTC).
pub fn build_report(
    analytics: &AnalyticsEngine,
    recommendations: &RecommendationEngine,
    check_ins: &[CheckIn],
    tracker_data: Option<&[TrackerReading]>,
    content_library: &[ContentItem],
    as_of: Option<NaiveDate>,
) -> AnalyticsResult<AnalysisReport> {
    let as_of = as_of.unwrap_or_else(|| Utc::now().date_naive());

    let correlations = analytics.analyze_correlations(check_ins)?;
    let insights = analytics.generate_predictive_insights_as_of(check_ins, tracker_data, as_of)?;
    let patterns = analytics.detect_patterns(check_ins)?;
    let recs = recommendations.generate_recommendations(
        check_ins,
        &insights,
        &correlations,
        &patterns,
        content_library,
    )?;

    tracing::info!(
        check_ins = check_ins.len(),
        correlations = correlations.len(),
        insights = insights.len(),
        patterns = patterns.len(),
        recommendations = recs.len(),
        "Built analysis report"
    );

    Ok(AnalysisReport {
        generated_at: Utc::now().to_rfc3339(),
        as_of,
        check_in_count: check_ins.len(),
        correlations,
        insights,
        patterns,
        recommendations: recs,
    })
}
