//! Predictive Insights
//!
//! Short-horizon risk signals from the last week of check-ins. Probabilities
//! are fixed per rule, not fitted.

use super::error::AnalyticsResult;
use super::stats::RollingAverages;
use crate::checkin::{BodyTemperature, CheckIn, TrackerReading};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minimum history for predictive insights
pub const MIN_PREDICTIVE_CHECK_INS: usize = 14;

/// A short-horizon risk signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictiveInsight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Likelihood in [0, 1]
    pub probability: f64,
    /// Day the signal applies to
    pub target_date: NaiveDate,
    pub confidence: Confidence,
    pub reasoning: String,
    pub recommendations: Vec<String>,
}

/// Kind of predicted event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    HotFlash,
    EnergyDip,
    SleepQuality,
    /// Reserved; no rule emits it yet
    StressSpike,
}

impl std::fmt::Display for InsightKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InsightKind::HotFlash => write!(f, "hot-flash"),
            InsightKind::EnergyDip => write!(f, "energy-dip"),
            InsightKind::SleepQuality => write!(f, "sleep-quality"),
            InsightKind::StressSpike => write!(f, "stress-spike"),
        }
    }
}

/// Confidence band of a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => write!(f, "high"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::Low => write!(f, "low"),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Evaluate the predictive rules as of `today`
///
/// Returns an empty list for fewer than 14 check-ins. Emission order is
/// hot flash, energy dip, sleep quality.
pub fn generate_predictive_insights(
    check_ins: &[CheckIn],
    tracker_data: Option<&[TrackerReading]>,
    today: NaiveDate,
) -> AnalyticsResult<Vec<PredictiveInsight>> {
    if check_ins.len() < MIN_PREDICTIVE_CHECK_INS {
        tracing::debug!(
            check_ins = check_ins.len(),
            required = MIN_PREDICTIVE_CHECK_INS,
            "Not enough history for predictive insights"
        );
        return Ok(Vec::new());
    }

    if let Some(readings) = tracker_data {
        tracing::debug!(
            readings = readings.len(),
            "Tracker data supplied but not used by predictive rules"
        );
    }

    let Some(avgs) = RollingAverages::from_recent(check_ins) else {
        return Ok(Vec::new());
    };
    let tomorrow = today + Duration::days(1);

    let hot_flash_days = check_ins
        .iter()
        .filter(|c| c.body_temperature == BodyTemperature::HotFlash)
        .count();
    let hot_flash_rate = hot_flash_days as f64 / check_ins.len() as f64;

    let mut insights = Vec::new();

    if avgs.stress > 7.0 && avgs.sleep < 5.0 && hot_flash_rate > 0.3 {
        insights.push(PredictiveInsight {
            kind: InsightKind::HotFlash,
            probability: 0.75,
            target_date: tomorrow,
            confidence: Confidence::High,
            reasoning: "High stress combined with poor sleep has preceded hot flashes in your \
                        recent history."
                .to_string(),
            recommendations: strings(&[
                "Keep your bedroom cool tonight (around 65°F / 18°C)",
                "Practice 10 minutes of paced breathing before bed",
                "Avoid alcohol, caffeine and spicy food this evening",
                "Dress in light layers tomorrow so you can adjust quickly",
            ]),
        });
    }

    if avgs.energy < 4.0 && avgs.sleep < 6.0 {
        insights.push(PredictiveInsight {
            kind: InsightKind::EnergyDip,
            probability: 0.8,
            target_date: tomorrow,
            confidence: Confidence::High,
            reasoning: "Your energy has been low alongside short or poor sleep, which usually \
                        carries into the next day."
                .to_string(),
            recommendations: strings(&[
                "Plan demanding tasks for the morning",
                "Take a 10-15 minute walk outdoors after lunch",
                "Eat protein-rich snacks to keep blood sugar steady",
                "Aim for a consistent bedtime tonight",
            ]),
        });
    }

    if avgs.stress > 6.0 {
        insights.push(PredictiveInsight {
            kind: InsightKind::SleepQuality,
            probability: 0.65,
            target_date: today,
            confidence: Confidence::Medium,
            reasoning: "Elevated stress over the past week is likely to disrupt your sleep tonight."
                .to_string(),
            recommendations: strings(&[
                "Start winding down an hour before bed",
                "Put screens away 30 minutes before sleep",
                "Try a guided body-scan meditation",
                "Write down tomorrow's worries to clear your mind",
            ]),
        });
    }

    for insight in &insights {
        tracing::debug!(
            kind = %insight.kind,
            probability = insight.probability,
            target_date = %insight.target_date,
            "Generated predictive insight"
        );
    }

    Ok(insights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap() + Duration::days(offset)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn history(len: i64, energy: u8, sleep: u8, stress: u8) -> Vec<CheckIn> {
        (0..len).map(|i| CheckIn::new(day(i), 5, energy, 5, sleep, stress)).collect()
    }

    #[test]
    fn test_too_few_check_ins() {
        let check_ins = history(13, 1, 1, 10);
        assert!(generate_predictive_insights(&check_ins, None, today()).unwrap().is_empty());
    }

    #[test]
    fn test_hot_flash_insight() {
        // 15 days, 6 hot flashes (rate 0.4), last week stress 8 and sleep 4
        let mut check_ins = history(15, 6, 4, 8);
        for check_in in check_ins.iter_mut().take(6) {
            check_in.body_temperature = BodyTemperature::HotFlash;
        }

        let insights = generate_predictive_insights(&check_ins, None, today()).unwrap();
        let hot_flashes: Vec<&PredictiveInsight> =
            insights.iter().filter(|i| i.kind == InsightKind::HotFlash).collect();

        assert_eq!(hot_flashes.len(), 1);
        assert_eq!(hot_flashes[0].probability, 0.75);
        assert_eq!(hot_flashes[0].confidence, Confidence::High);
        assert_eq!(hot_flashes[0].target_date.to_string(), "2024-03-21");
        assert_eq!(hot_flashes[0].recommendations.len(), 4);
    }

    #[test]
    fn test_hot_flash_needs_frequency() {
        // Rate exactly 0.3 does not pass the strict threshold
        let mut check_ins = history(20, 6, 4, 8);
        for check_in in check_ins.iter_mut().take(6) {
            check_in.body_temperature = BodyTemperature::HotFlash;
        }

        let insights = generate_predictive_insights(&check_ins, None, today()).unwrap();
        assert!(insights.iter().all(|i| i.kind != InsightKind::HotFlash));
    }

    #[test]
    fn test_emission_order() {
        let mut check_ins = history(14, 3, 4, 8);
        for check_in in check_ins.iter_mut().take(5) {
            check_in.body_temperature = BodyTemperature::HotFlash;
        }

        let kinds: Vec<InsightKind> = generate_predictive_insights(&check_ins, None, today())
            .unwrap()
            .into_iter()
            .map(|i| i.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![InsightKind::HotFlash, InsightKind::EnergyDip, InsightKind::SleepQuality]
        );
    }

    #[test]
    fn test_sleep_quality_targets_today() {
        let check_ins = history(14, 6, 7, 7);
        let insights = generate_predictive_insights(&check_ins, None, today()).unwrap();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::SleepQuality);
        assert_eq!(insights[0].probability, 0.65);
        assert_eq!(insights[0].confidence, Confidence::Medium);
        assert_eq!(insights[0].target_date, today());
    }

    #[test]
    fn test_only_recent_week_counts() {
        // Bad first week, good second week
        let mut check_ins = history(7, 2, 2, 9);
        check_ins.extend((7..14).map(|i| CheckIn::new(day(i), 5, 8, 5, 8, 3)));

        assert!(generate_predictive_insights(&check_ins, None, today()).unwrap().is_empty());
    }

    #[test]
    fn test_insight_json_shape() {
        let check_ins = history(14, 6, 7, 7);
        let insights = generate_predictive_insights(&check_ins, None, today()).unwrap();
        let json = serde_json::to_string(&insights[0]).unwrap();

        assert!(json.contains("\"type\":\"sleep-quality\""));
        assert!(json.contains("\"targetDate\":\"2024-03-20\""));
    }

    #[test]
    fn test_sleep_quality_needs_stress_above_six() {
        let check_ins = history(14, 6, 7, 6);
        assert!(generate_predictive_insights(&check_ins, None, today()).unwrap().is_empty());
    }

    #[test]
    fn test_energy_dip_needs_energy_below_four() {
        let check_ins = history(14, 4, 4, 5);
        assert!(generate_predictive_insights(&check_ins, None, today()).unwrap().is_empty());
    }

    #[test]
    fn test_hot_flash_stress_and_sleep_boundaries() {
        // Stress exactly 7: only the sleep quality rule fires
        let mut check_ins = history(15, 6, 4, 7);
        for check_in in check_ins.iter_mut().take(6) {
            check_in.body_temperature = BodyTemperature::HotFlash;
        }
        let kinds: Vec<InsightKind> = generate_predictive_insights(&check_ins, None, today())
            .unwrap()
            .into_iter()
            .map(|i| i.kind)
            .collect();
        assert_eq!(kinds, vec![InsightKind::SleepQuality]);

        // Sleep exactly 5
        let mut check_ins = history(15, 6, 5, 8);
        for check_in in check_ins.iter_mut().take(6) {
            check_in.body_temperature = BodyTemperature::HotFlash;
        }
        let insights = generate_predictive_insights(&check_ins, None, today()).unwrap();
        assert!(insights.iter().all(|i| i.kind != InsightKind::HotFlash));
    }
}
