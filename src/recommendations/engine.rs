//! Recommendation Engine
//!
//! Turns check-ins plus the analytics outputs into a ranked list of
//! recommendations. Four generators run in a fixed order (content,
//! lifestyle, intervention, medical) and append to one list, which is then
//! stable-sorted by priority.

use super::types::{ContentItem, PersonalizedRecommendation, Priority, RecommendationType};
use crate::analytics::{
    most_recent, validate_check_ins, AnalyticsResult, CorrelationResult, InsightKind,
    PatternInsight, PredictiveInsight, RollingAverages, Significance,
};
use crate::checkin::{CheckIn, Metric};

/// Window for the medical escalation checks
pub const MEDICAL_WINDOW: usize = 14;

pub const ID_EMOTIONAL_SUPPORT: &str = "content-emotional-support";
pub const ID_ENERGY_BOOST: &str = "content-energy-boost";
pub const ID_SLEEP_OPTIMIZATION: &str = "lifestyle-sleep-optimization";
pub const ID_STRESS_REDUCTION: &str = "lifestyle-stress-reduction";
pub const ID_HOT_FLASH_PREVENTION: &str = "intervention-hot-flash-prevention";
pub const ID_SELF_WORTH_TIMING: &str = "intervention-self-worth-timing";
pub const ID_SLEEP_SPECIALIST: &str = "medical-sleep-specialist";
pub const ID_MENTAL_HEALTH_SUPPORT: &str = "medical-mental-health-support";

/// Everything the generators read
struct Context<'a> {
    avgs: RollingAverages,
    recent: &'a [CheckIn],
    insights: &'a [PredictiveInsight],
    correlations: &'a [CorrelationResult],
}

/// Builds personalized recommendations
#[derive(Debug, Default, Clone, Copy)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate and rank recommendations
    ///
    /// Returns an empty list when there are no check-ins. `patterns` and
    /// `content_library` are accepted for future matching; no rule reads
    /// them yet.
    pub fn generate_recommendations(
        &self,
        check_ins: &[CheckIn],
        insights: &[PredictiveInsight],
        correlations: &[CorrelationResult],
        patterns: &[PatternInsight],
        content_library: &[ContentItem],
    ) -> AnalyticsResult<Vec<PersonalizedRecommendation>> {
        validate_check_ins(check_ins)?;

        let Some(avgs) = RollingAverages::from_recent(check_ins) else {
            return Ok(Vec::new());
        };

        tracing::debug!(
            patterns = patterns.len(),
            catalog_items = content_library.len(),
            "Patterns and content catalog are not yet used for matching"
        );

        let ctx = Context {
            avgs,
            recent: most_recent(check_ins, MEDICAL_WINDOW),
            insights,
            correlations,
        };

        let mut recommendations = Vec::new();
        content_recommendations(&ctx, &mut recommendations);
        lifestyle_recommendations(&ctx, &mut recommendations);
        intervention_recommendations(&ctx, &mut recommendations);
        medical_recommendations(&ctx, &mut recommendations);

        rank_by_priority(&mut recommendations);

        tracing::debug!(
            count = recommendations.len(),
            ids = ?recommendations.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            "Generated recommendations"
        );

        Ok(recommendations)
    }
}

/// Stable sort, highest priority first
pub fn rank_by_priority(recommendations: &mut [PersonalizedRecommendation]) {
    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
}

/// Longest run of consecutive check-ins matching `pred`
fn longest_streak(check_ins: &[CheckIn], pred: impl Fn(&CheckIn) -> bool) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for check_in in check_ins {
        if pred(check_in) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

fn steps(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn recommendation(
    id: &str,
    kind: RecommendationType,
    priority: Priority,
    title: &str,
    description: &str,
    reasoning: String,
    action_steps: &[&str],
    estimated_benefit: &str,
    timeframe: &str,
) -> PersonalizedRecommendation {
    PersonalizedRecommendation {
        id: id.to_string(),
        kind,
        priority,
        title: title.to_string(),
        description: description.to_string(),
        reasoning,
        action_steps: steps(action_steps),
        estimated_benefit: estimated_benefit.to_string(),
        timeframe: timeframe.to_string(),
    }
}

fn content_recommendations(ctx: &Context<'_>, out: &mut Vec<PersonalizedRecommendation>) {
    if ctx.avgs.mood < 5.0 {
        out.push(recommendation(
            ID_EMOTIONAL_SUPPORT,
            RecommendationType::Content,
            Priority::High,
            "Emotional Support Content",
            "Guided resources for navigating mood changes during menopause.",
            format!(
                "Your average mood over the past week is {:.1}/10, below your comfortable range.",
                ctx.avgs.mood
            ),
            &[
                "Read the article on hormonal mood changes",
                "Try a 10-minute guided mood meditation",
                "Join a peer support conversation this week",
            ],
            "Improved emotional resilience and mood stability",
            "1-2 weeks",
        ));
    }

    if ctx.avgs.energy < 5.0 {
        out.push(recommendation(
            ID_ENERGY_BOOST,
            RecommendationType::Content,
            Priority::Medium,
            "Energy Enhancement Resources",
            "Practical guides for restoring daytime energy.",
            format!(
                "Your average energy over the past week is {:.1}/10.",
                ctx.avgs.energy
            ),
            &[
                "Watch the gentle morning movement routine",
                "Review the energy-supporting nutrition guide",
                "Plan short movement breaks through the day",
            ],
            "More consistent energy through the day",
            "1-3 weeks",
        ));
    }
}

fn lifestyle_recommendations(ctx: &Context<'_>, out: &mut Vec<PersonalizedRecommendation>) {
    let strong_sleep_link = ctx
        .correlations
        .iter()
        .find(|c| c.significance == Significance::High && c.involves(Metric::Sleep))
        .and_then(|c| c.other_metric(Metric::Sleep));

    if let Some(other) = strong_sleep_link.filter(|_| ctx.avgs.sleep < 6.0) {
        out.push(recommendation(
            ID_SLEEP_OPTIMIZATION,
            RecommendationType::Lifestyle,
            Priority::High,
            "Sleep Optimization Plan",
            "A structured plan to improve sleep quality.",
            format!(
                "Your sleep strongly affects your {}, and your recent sleep has averaged {:.1}/10.",
                other, ctx.avgs.sleep
            ),
            &[
                "Keep the same bedtime and wake time every day",
                "Keep your bedroom cool, dark and quiet",
                "Stop caffeine after noon",
                "Avoid screens for an hour before bed",
            ],
            "Better sleep and improvements in related wellbeing",
            "2-4 weeks",
        ));
    }

    if ctx.avgs.stress > 7.0 {
        out.push(recommendation(
            ID_STRESS_REDUCTION,
            RecommendationType::Lifestyle,
            Priority::High,
            "Stress Reduction Program",
            "Daily practices to lower sustained stress.",
            format!(
                "Your average stress over the past week is {:.1}/10.",
                ctx.avgs.stress
            ),
            &[
                "Practice 5 minutes of box breathing twice a day",
                "Take a 20-minute walk outdoors daily",
                "Set one boundary this week to protect your time",
            ],
            "Lower stress and better sleep",
            "1-2 weeks",
        ));
    }
}

fn intervention_recommendations(ctx: &Context<'_>, out: &mut Vec<PersonalizedRecommendation>) {
    let hot_flash_risk = ctx
        .insights
        .iter()
        .find(|i| i.kind == InsightKind::HotFlash && i.probability > 0.6);

    if let Some(insight) = hot_flash_risk {
        out.push(recommendation(
            ID_HOT_FLASH_PREVENTION,
            RecommendationType::Intervention,
            Priority::Medium,
            "Hot Flash Prevention",
            "Steps to reduce the likelihood and intensity of an expected hot flash.",
            insight.reasoning.clone(),
            &[
                "Keep a portable fan or cooling spray with you",
                "Wear breathable, layered clothing",
                "Avoid known triggers for the next 24 hours",
                "Practice paced breathing at the first sign of warmth",
            ],
            "Fewer or milder hot flashes",
            "Next 24-48 hours",
        ));
    }

    if ctx.avgs.mood < 5.0 || ctx.avgs.stress > 7.0 {
        out.push(recommendation(
            ID_SELF_WORTH_TIMING,
            RecommendationType::Intervention,
            Priority::High,
            "Optimal Self-Worth Toolkit Timing",
            "Now is a good time to use your self-worth toolkit exercises.",
            "Low mood or high stress makes this a helpful moment for self-compassion practice."
                .to_string(),
            &[
                "Write down three things you handled well this week",
                "Repeat your personal affirmation each morning",
                "Reach out to someone who makes you feel valued",
            ],
            "Stronger self-esteem and emotional balance",
            "This week",
        ));
    }
}

fn medical_recommendations(ctx: &Context<'_>, out: &mut Vec<PersonalizedRecommendation>) {
    let severe_sleep_days = ctx.recent.iter().filter(|c| c.sleep < 3).count();
    let severe_mood_days = ctx.recent.iter().filter(|c| c.mood < 3).count();
    let high_stress_streak = longest_streak(ctx.recent, |c| c.stress > 7);

    tracing::debug!(
        severe_sleep_days,
        severe_mood_days,
        high_stress_streak,
        "Evaluated medical escalation signals"
    );

    if severe_sleep_days > 7 {
        out.push(recommendation(
            ID_SLEEP_SPECIALIST,
            RecommendationType::Medical,
            Priority::High,
            "Consider a Sleep Specialist Consultation",
            "Persistent severe sleep problems may benefit from professional assessment.",
            format!(
                "You reported very poor sleep on {} of the last {} days.",
                severe_sleep_days,
                ctx.recent.len()
            ),
            &[
                "Book an appointment with your doctor or a sleep specialist",
                "Bring your sleep check-in history to the appointment",
                "Ask about menopause-related sleep treatments",
            ],
            "Identification and treatment of underlying sleep issues",
            "Within 2 weeks",
        ));
    }

    if severe_mood_days > 5 || high_stress_streak > 7 {
        out.push(recommendation(
            ID_MENTAL_HEALTH_SUPPORT,
            RecommendationType::Medical,
            Priority::High,
            "Mental Health Support",
            "Talking to a professional can help with sustained low mood or stress.",
            format!(
                "You reported very low mood on {} days and up to {} consecutive \
                 high-stress days recently.",
                severe_mood_days, high_stress_streak
            ),
            &[
                "Speak with your doctor about how you have been feeling",
                "Consider a therapist experienced with menopause",
                "If you feel unsafe, contact a crisis line immediately",
            ],
            "Professional support for mood and stress",
            "As soon as possible",
        ));
    }
}
