//! # Menopulse
//!
//! Menopause wellness analytics - turns daily self-reported check-ins into
//! correlations, short-horizon predictive insights, recurring patterns and
//! ranked personalized recommendations.
//!
//! ## Features
//!
//! - **Correlations**: Pearson coefficients for fixed metric pairs
//! - **Predictive insights**: hot flash, energy dip and sleep quality signals
//! - **Pattern detection**: weekly mood cycles, symptom timing, sleep cascades
//! - **Recommendations**: content, lifestyle, intervention and medical advice
//!   ranked by priority
//! - **REST API**: the whole pipeline over HTTP
//!
//! ## Modules
//!
//! - [`checkin`]: Check-in records and CSV import
//! - [`analytics`]: Analytics engine
//! - [`recommendations`]: Recommendation engine
//! - [`report`]: Whole-pipeline report
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use menopulse::analytics::AnalyticsEngine;
//! use menopulse::checkin::CheckInImporter;
//! use menopulse::recommendations::RecommendationEngine;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let history = CheckInImporter::new().import(Path::new("checkins.csv"))?;
//!     let check_ins = &history.check_ins;
//!
//!     let analytics = AnalyticsEngine::deterministic();
//!     let correlations = analytics.analyze_correlations(check_ins)?;
//!     let insights = analytics.generate_predictive_insights(check_ins, None)?;
//!     let patterns = analytics.detect_patterns(check_ins)?;
//!
//!     let recommendations = RecommendationEngine::new().generate_recommendations(
//!         check_ins,
//!         &insights,
//!         &correlations,
//!         &patterns,
//!         &[],
//!     )?;
//!
//!     for rec in &recommendations {
//!         println!("[{}] {}", rec.priority, rec.title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod checkin;
pub mod config;
pub mod logging;
pub mod recommendations;
pub mod report;

// Re-export top-level types for convenience
pub use checkin::{
    BodyTemperature, CheckIn, CheckInImporter, CheckInSource, ImportError, Metric, SymptomTime,
    TrackerReading,
};

pub use analytics::{
    AnalyticsEngine, AnalyticsError, AnalyticsResult, Confidence, CorrelationResult, InsightKind,
    PatternInsight, PatternKind, PredictiveInsight, Significance, TimingClassifier, TimingMode,
};

pub use recommendations::{
    ContentItem, PersonalizedRecommendation, Priority, RecommendationEngine, RecommendationType,
};

pub use report::{build_report, AnalysisReport};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AnalysisConfig, ApiConfig, Config, ConfigError, LoggingConfig};
