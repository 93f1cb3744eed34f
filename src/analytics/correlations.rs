//! Correlation Analysis
//!
//! Pearson correlation over three fixed metric pairs. Each pair carries its
//! own description rule, so the table below is the whole behaviour; it is
//! deliberately not an all-pairs matrix.

use super::error::AnalyticsResult;
use super::stats::pearson_correlation;
use crate::checkin::{CheckIn, Metric};
use serde::{Deserialize, Serialize};

/// Minimum history for correlation analysis
pub const MIN_CORRELATION_CHECK_INS: usize = 7;

/// A correlation between two check-in metrics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    /// First metric
    pub metric_a: Metric,
    /// Second metric
    pub metric_b: Metric,
    /// Pearson correlation coefficient (-1 to 1)
    pub coefficient: f64,
    /// Band derived from |coefficient|
    pub significance: Significance,
    /// Human-readable summary
    pub description: String,
    /// Number of check-ins used
    pub sample_size: usize,
}

impl CorrelationResult {
    /// Whether either side of the pair is `metric`
    pub fn involves(&self, metric: Metric) -> bool {
        self.metric_a == metric || self.metric_b == metric
    }

    /// The side of the pair that is not `metric`
    pub fn other_metric(&self, metric: Metric) -> Option<Metric> {
        if self.metric_a == metric {
            Some(self.metric_b)
        } else if self.metric_b == metric {
            Some(self.metric_a)
        } else {
            None
        }
    }
}

/// Correlation significance band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Significance {
    High,
    Medium,
    Low,
}

impl Significance {
    /// Band for a coefficient: |r| > 0.7 high, > 0.4 medium, else low
    pub fn from_coefficient(r: f64) -> Self {
        let abs_r = r.abs();
        if abs_r > 0.7 {
            Significance::High
        } else if abs_r > 0.4 {
            Significance::Medium
        } else {
            Significance::Low
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Significance::High => write!(f, "high"),
            Significance::Medium => write!(f, "medium"),
            Significance::Low => write!(f, "low"),
        }
    }
}

/// One analysed pair and its description rule
struct CorrelationPair {
    metric_a: Metric,
    metric_b: Metric,
    describe: fn(f64) -> &'static str,
}

const CORRELATION_PAIRS: [CorrelationPair; 3] = [
    CorrelationPair {
        metric_a: Metric::Sleep,
        metric_b: Metric::Mood,
        describe: describe_sleep_mood,
    },
    CorrelationPair {
        metric_a: Metric::Energy,
        metric_b: Metric::Stress,
        describe: describe_energy_stress,
    },
    CorrelationPair {
        metric_a: Metric::Libido,
        metric_b: Metric::Energy,
        describe: describe_libido_energy,
    },
];

fn describe_sleep_mood(r: f64) -> &'static str {
    if r > 0.4 {
        "Your sleep quality strongly correlates with your mood. \
         Better sleep nights are followed by brighter days."
    } else {
        "Sleep and mood show a weak correlation for you. \
         Other factors may be driving your mood changes."
    }
}

fn describe_energy_stress(r: f64) -> &'static str {
    if r < -0.4 {
        "High stress significantly reduces your energy levels. \
         Managing stress could give you more energy."
    } else {
        "Stress has a moderate effect on your energy levels."
    }
}

fn describe_libido_energy(r: f64) -> &'static str {
    if r > 0.4 {
        "Your energy levels strongly influence your libido. Boosting energy may help with intimacy."
    } else {
        "Your libido varies independently of energy levels, so other factors may be at play."
    }
}

/// Correlate the fixed metric pairs across the check-in history
///
/// Returns an empty list for fewer than 7 check-ins.
pub fn analyze_correlations(check_ins: &[CheckIn]) -> AnalyticsResult<Vec<CorrelationResult>> {
    if check_ins.len() < MIN_CORRELATION_CHECK_INS {
        tracing::debug!(
            check_ins = check_ins.len(),
            required = MIN_CORRELATION_CHECK_INS,
            "Not enough history for correlations"
        );
        return Ok(Vec::new());
    }

    CORRELATION_PAIRS
        .iter()
        .map(|pair| {
            let r = pearson_correlation(
                &pair.metric_a.series(check_ins),
                &pair.metric_b.series(check_ins),
            )?;
            let significance = Significance::from_coefficient(r);

            tracing::debug!(
                metric_a = %pair.metric_a,
                metric_b = %pair.metric_b,
                r,
                significance = %significance,
                "Calculated correlation"
            );

            Ok(CorrelationResult {
                metric_a: pair.metric_a,
                metric_b: pair.metric_b,
                coefficient: r,
                significance,
                description: (pair.describe)(r).to_string(),
                sample_size: check_ins.len(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset)
    }

    #[test]
    fn test_too_few_check_ins() {
        let check_ins: Vec<CheckIn> = (0..6).map(|i| CheckIn::new(day(i), 5, 5, 5, 5, 5)).collect();
        assert!(analyze_correlations(&check_ins).unwrap().is_empty());
    }

    #[test]
    fn test_fixed_pairs_in_order() {
        let check_ins: Vec<CheckIn> = (0..7)
            .map(|i| CheckIn::new(day(i), (i + 1) as u8, 5, 5, (i + 2) as u8, 5))
            .collect();

        let results = analyze_correlations(&check_ins).unwrap();
        let pairs: Vec<(Metric, Metric)> =
            results.iter().map(|c| (c.metric_a, c.metric_b)).collect();
        assert_eq!(
            pairs,
            vec![
                (Metric::Sleep, Metric::Mood),
                (Metric::Energy, Metric::Stress),
                (Metric::Libido, Metric::Energy),
            ]
        );
    }

    #[test]
    fn test_perfect_sleep_mood_correlation() {
        let check_ins: Vec<CheckIn> = (0..7)
            .map(|i| CheckIn::new(day(i), (i + 2) as u8, 5, 5, (i + 1) as u8, 5))
            .collect();

        let sleep_mood = &analyze_correlations(&check_ins).unwrap()[0];
        assert!((sleep_mood.coefficient - 1.0).abs() < 1e-9);
        assert_eq!(sleep_mood.significance, Significance::High);
        assert!(sleep_mood.description.contains("strongly correlates"));
        assert_eq!(sleep_mood.sample_size, 7);
    }

    #[test]
    fn test_energy_stress_negative_branch() {
        let check_ins: Vec<CheckIn> = (0..8)
            .map(|i| CheckIn::new(day(i), 5, (i + 1) as u8, 5, 5, (9 - i) as u8))
            .collect();

        let energy_stress = &analyze_correlations(&check_ins).unwrap()[1];
        assert!(energy_stress.coefficient < -0.99);
        assert!(energy_stress.description.contains("significantly reduces"));

        // Constant libido: zero variance, so r = 0
        let libido_energy = &analyze_correlations(&check_ins).unwrap()[2];
        assert_eq!(libido_energy.coefficient, 0.0);
        assert!(libido_energy.description.contains("independently"));
        assert_eq!(libido_energy.significance, Significance::Low);
    }

    #[test]
    fn test_significance_bands() {
        assert_eq!(Significance::from_coefficient(0.71), Significance::High);
        assert_eq!(Significance::from_coefficient(-0.8), Significance::High);
        assert_eq!(Significance::from_coefficient(0.7), Significance::Medium);
        assert_eq!(Significance::from_coefficient(-0.41), Significance::Medium);
        assert_eq!(Significance::from_coefficient(0.4), Significance::Low);
        assert_eq!(Significance::from_coefficient(0.0), Significance::Low);
    }

    #[test]
    fn test_other_metric() {
        let result = CorrelationResult {
            metric_a: Metric::Sleep,
            metric_b: Metric::Mood,
            coefficient: 0.9,
            significance: Significance::High,
            description: String::new(),
            sample_size: 7,
        };
        assert!(result.involves(Metric::Mood));
        assert_eq!(result.other_metric(Metric::Sleep), Some(Metric::Mood));
        assert_eq!(result.other_metric(Metric::Stress), None);
    }

    #[test]
    fn test_correlation_serializes() {
        let result = CorrelationResult {
            metric_a: Metric::Sleep,
            metric_b: Metric::Mood,
            coefficient: 0.72,
            significance: Significance::High,
            description: "x".to_string(),
            sample_size: 30,
        };

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"metricA\":\"sleep\""));
        assert!(json.contains("\"significance\":\"high\""));
    }
}
