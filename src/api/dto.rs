//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use crate::analytics::{CorrelationResult, PatternInsight, PredictiveInsight};
use crate::checkin::{CheckIn, TrackerReading};
use crate::recommendations::{ContentItem, PersonalizedRecommendation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================
// ANALYTICS DTOs
// ============================================

/// Request carrying only a check-in history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInsRequest {
    /// Check-ins, oldest first
    pub check_ins: Vec<CheckIn>,
}

/// Predictive insights request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsRequest {
    pub check_ins: Vec<CheckIn>,
    /// Optional device-sync samples
    #[serde(default)]
    pub tracker_data: Option<Vec<TrackerReading>>,
    /// Reference date, defaults to today (UTC)
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Correlations response
#[derive(Debug, Serialize)]
pub struct CorrelationsResponse {
    pub correlations: Vec<CorrelationResult>,
}

/// Predictive insights response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub insights: Vec<PredictiveInsight>,
    pub as_of: NaiveDate,
}

/// Patterns response
#[derive(Debug, Serialize)]
pub struct PatternsResponse {
    pub patterns: Vec<PatternInsight>,
}

// ============================================
// RECOMMENDATION DTOs
// ============================================

/// Recommendations request: check-ins plus precomputed analysis
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub insights: Vec<PredictiveInsight>,
    #[serde(default)]
    pub correlations: Vec<CorrelationResult>,
    #[serde(default)]
    pub patterns: Vec<PatternInsight>,
    #[serde(default)]
    pub content_library: Vec<ContentItem>,
}

/// Recommendations response
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<PersonalizedRecommendation>,
}

/// Full pipeline request
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub check_ins: Vec<CheckIn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker_data: Option<Vec<TrackerReading>>,
    #[serde(default)]
    pub content_library: Vec<ContentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// Active symptom timing classifier
    pub timing_classifier: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
