//! Recommendation Engine
//!
//! Ranked, personalized recommendations built from check-ins and the
//! analytics outputs. Recommendation ids are fixed per template so callers
//! can deduplicate across runs.

mod engine;
mod types;

pub use engine::{
    rank_by_priority, RecommendationEngine, ID_EMOTIONAL_SUPPORT, ID_ENERGY_BOOST,
    ID_HOT_FLASH_PREVENTION, ID_MENTAL_HEALTH_SUPPORT, ID_SELF_WORTH_TIMING,
    ID_SLEEP_OPTIMIZATION, ID_SLEEP_SPECIALIST, ID_STRESS_REDUCTION, MEDICAL_WINDOW,
};
pub use types::{ContentItem, PersonalizedRecommendation, Priority, RecommendationType};
