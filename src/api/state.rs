//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::analytics::AnalyticsEngine;
use crate::config::ApiConfig;
use crate::recommendations::RecommendationEngine;
use std::sync::Arc;
use std::time::Instant;

/// Most check-ins accepted in one request (ten years of daily records)
pub const MAX_CHECK_INS: usize = 3650;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Analytics engine (holds the timing classifier)
    pub analytics: Arc<AnalyticsEngine>,
    /// Recommendation engine
    pub recommendations: RecommendationEngine,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(analytics: AnalyticsEngine, config: ApiConfig) -> Self {
        Self {
            analytics: Arc::new(analytics),
            recommendations: RecommendationEngine::new(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
