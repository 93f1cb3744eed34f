//! Recommendation Routes
//!
//! - POST /api/v1/recommendations - Rank recommendations from precomputed analysis
//! - POST /api/v1/analyze - Run the whole pipeline

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{AnalyzeRequest, RecommendationsRequest, RecommendationsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::correlations::check_history_size;
use crate::api::state::AppState;
use crate::report::{build_report, AnalysisReport};

/// POST /api/v1/recommendations
///
/// The caller supplies insights, correlations and patterns, typically from
/// the analytics endpoints.
pub async fn generate_recommendations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendationsRequest>,
) -> ApiResult<Json<RecommendationsResponse>> {
    check_history_size(&req.check_ins)?;

    let recommendations = state.recommendations.generate_recommendations(
        &req.check_ins,
        &req.insights,
        &req.correlations,
        &req.patterns,
        &req.content_library,
    )?;

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// POST /api/v1/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisReport>> {
    check_history_size(&req.check_ins)?;

    let report = build_report(
        &state.analytics,
        &state.recommendations,
        &req.check_ins,
        req.tracker_data.as_deref(),
        &req.content_library,
        req.as_of,
    )?;

    Ok(Json(report))
}
