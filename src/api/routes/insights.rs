//! Insight Routes
//!
//! - POST /api/v1/insights - Short-horizon predictive insights

use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::{InsightsRequest, InsightsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::correlations::check_history_size;
use crate::api::state::AppState;

/// POST /api/v1/insights
///
/// Generate predictive insights relative to `asOf` (default today, UTC).
/// Fewer than 14 check-ins yields an empty list.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InsightsRequest>,
) -> ApiResult<Json<InsightsResponse>> {
    check_history_size(&req.check_ins)?;

    let as_of = req.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let insights = state.analytics.generate_predictive_insights_as_of(
        &req.check_ins,
        req.tracker_data.as_deref(),
        as_of,
    )?;

    Ok(Json(InsightsResponse { insights, as_of }))
}
