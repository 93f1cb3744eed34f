//! Menopulse REST API
//!
//! HTTP API layer over the analytics and recommendation engines, built
//! with Axum. Every endpoint is a pure computation over the request body;
//! nothing is stored.
//!
//! # Endpoints
//!
//! ## Analytics
//! - `POST /api/v1/correlations` - Metric pair correlations
//! - `POST /api/v1/insights` - Predictive insights
//! - `POST /api/v1/patterns` - Recurring patterns
//!
//! ## Recommendations
//! - `POST /api/v1/recommendations` - Ranked recommendations
//! - `POST /api/v1/analyze` - Full pipeline report
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use menopulse::analytics::AnalyticsEngine;
//! use menopulse::api::{serve, AppState};
//! use menopulse::config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(AnalyticsEngine::default(), config.clone());
//!     serve(state, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use crate::config::ApiConfig;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let config = Arc::clone(&state.config);

    let api_routes = Router::new()
        // Analytics routes
        .route("/correlations", post(routes::correlations::analyze_correlations))
        .route("/insights", post(routes::insights::generate_insights))
        .route("/patterns", post(routes::patterns::detect_patterns))
        // Recommendation routes
        .route("/recommendations", post(routes::recommendations::generate_recommendations))
        .route("/analyze", post(routes::recommendations::analyze))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(shared_state)
}

/// Permissive CORS when no origins are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Menopulse API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Menopulse API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::AnalyticsEngine;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration as ChronoDuration, NaiveDate};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(AnalyticsEngine::deterministic(), ApiConfig::default());
        build_router(state)
    }

    /// JSON array of `days` identical check-ins starting 2024-01-01
    fn check_ins_json(days: i64, mood: u8, energy: u8, sleep: u8, stress: u8) -> String {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let items: Vec<String> = (0..days)
            .map(|i| {
                format!(
                    r#"{{"date":"{}","mood":{},"energy":{},"libido":5,"sleep":{},"stress":{},"bodyTemperature":"normal"}}"#,
                    start + ChronoDuration::days(i),
                    mood,
                    energy,
                    sleep,
                    stress
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_live() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["timing_classifier"], "recorded");
    }

    #[tokio::test]
    async fn test_correlations_short_history() {
        let body = format!(r#"{{"checkIns":{}}}"#, check_ins_json(5, 5, 5, 5, 5));
        let (status, json) = post_json(create_test_app(), "/api/v1/correlations", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["correlations"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_correlations_returns_three_pairs() {
        let body = format!(r#"{{"checkIns":{}}}"#, check_ins_json(7, 5, 5, 5, 5));
        let (status, json) = post_json(create_test_app(), "/api/v1/correlations", body).await;

        assert_eq!(status, StatusCode::OK);
        let correlations = json["correlations"].as_array().unwrap();
        assert_eq!(correlations.len(), 3);
        assert_eq!(correlations[0]["metricA"], "sleep");
        assert_eq!(correlations[0]["coefficient"], 0.0);
    }

    #[tokio::test]
    async fn test_insights_as_of() {
        let body = format!(
            r#"{{"checkIns":{},"asOf":"2024-02-01"}}"#,
            check_ins_json(14, 5, 3, 5, 7)
        );
        let (status, json) = post_json(create_test_app(), "/api/v1/insights", body).await;

        assert_eq!(status, StatusCode::OK);
        let insights = json["insights"].as_array().unwrap();
        assert_eq!(insights[0]["type"], "energy-dip");
        assert_eq!(insights[0]["targetDate"], "2024-02-02");
        assert_eq!(insights[1]["type"], "sleep-quality");
        assert_eq!(insights[1]["targetDate"], "2024-02-01");
    }

    #[tokio::test]
    async fn test_rating_out_of_range_rejected() {
        let body = format!(r#"{{"checkIns":{}}}"#, check_ins_json(14, 11, 5, 5, 5));
        let (status, json) = post_json(create_test_app(), "/api/v1/patterns", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let (status, _) =
            post_json(create_test_app(), "/api/v1/patterns", "not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recommendations_empty_history() {
        let body = r#"{"checkIns":[],"contentLibrary":[
            {"id":"c1","title":"Sleep","category":"sleep"}
        ]}"#;
        let (status, json) =
            post_json(create_test_app(), "/api/v1/recommendations", body.to_string()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_analyze_low_mood_week() {
        let body = format!(r#"{{"checkIns":{}}}"#, check_ins_json(7, 2, 2, 7, 3));
        let (status, json) = post_json(create_test_app(), "/api/v1/analyze", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["checkInCount"], 7);
        let ids: Vec<&str> = json["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["id"].as_str())
            .collect();
        let support = ids.iter().position(|id| *id == "content-emotional-support").unwrap();
        let boost = ids.iter().position(|id| *id == "content-energy-boost").unwrap();
        assert!(support < boost);
    }
}
