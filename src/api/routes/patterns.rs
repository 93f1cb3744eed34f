//! Pattern Routes
//!
//! - POST /api/v1/patterns - Detect recurring patterns

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CheckInsRequest, PatternsResponse};
use crate::api::error::ApiResult;
use crate::api::routes::correlations::check_history_size;
use crate::api::state::AppState;

/// POST /api/v1/patterns
pub async fn detect_patterns(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckInsRequest>,
) -> ApiResult<Json<PatternsResponse>> {
    check_history_size(&req.check_ins)?;

    let patterns = state.analytics.detect_patterns(&req.check_ins)?;

    Ok(Json(PatternsResponse { patterns }))
}
