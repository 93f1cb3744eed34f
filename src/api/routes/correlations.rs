//! Correlation Routes
//!
//! - POST /api/v1/correlations - Correlate the fixed metric pairs

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{CheckInsRequest, CorrelationsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::{AppState, MAX_CHECK_INS};
use crate::checkin::CheckIn;

/// POST /api/v1/correlations
///
/// Pearson correlations for sleep/mood, energy/stress and libido/energy.
/// Fewer than 7 check-ins yields an empty list.
pub async fn analyze_correlations(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CheckInsRequest>,
) -> ApiResult<Json<CorrelationsResponse>> {
    check_history_size(&req.check_ins)?;

    let correlations = state.analytics.analyze_correlations(&req.check_ins)?;

    Ok(Json(CorrelationsResponse { correlations }))
}

/// Reject oversized histories
pub(crate) fn check_history_size(check_ins: &[CheckIn]) -> ApiResult<()> {
    if check_ins.len() > MAX_CHECK_INS {
        return Err(ApiError::Validation(format!(
            "at most {} check-ins per request, got {}",
            MAX_CHECK_INS,
            check_ins.len()
        )));
    }
    Ok(())
}
