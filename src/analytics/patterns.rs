//! Pattern Detection
//!
//! Recurring structure across the full history:
//! - weekly mood cycle (mood averaged per weekday)
//! - hot flash timing (temperature symptom frequency and time of day)
//! - sleep to energy cascade (poor sleep followed by a low-energy day)

use super::timing::TimingClassifier;
use crate::checkin::{CheckIn, SymptomTime};
use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Minimum history for pattern detection
pub const MIN_PATTERN_CHECK_INS: usize = 14;

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// A recurring behavioural pattern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatternInsight {
    #[serde(rename = "type")]
    pub kind: PatternKind,
    pub name: String,
    pub frequency: String,
    /// Nominally 0-1; the temperature pattern can exceed 1
    pub strength: f64,
    pub description: String,
    pub action_items: Vec<String>,
}

/// Kind of detected pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    WeeklyMoodCycle,
    HotFlashTiming,
    SleepEnergyCascade,
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternKind::WeeklyMoodCycle => write!(f, "weekly-mood-cycle"),
            PatternKind::HotFlashTiming => write!(f, "hot-flash-timing"),
            PatternKind::SleepEnergyCascade => write!(f, "sleep-energy-cascade"),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Detect all patterns in the check-in history
///
/// Returns an empty list for fewer than 14 check-ins.
pub fn detect_patterns(
    check_ins: &[CheckIn],
    timing: &dyn TimingClassifier,
) -> Vec<PatternInsight> {
    if check_ins.len() < MIN_PATTERN_CHECK_INS {
        tracing::debug!(
            check_ins = check_ins.len(),
            required = MIN_PATTERN_CHECK_INS,
            "Not enough history for pattern detection"
        );
        return Vec::new();
    }

    let patterns: Vec<PatternInsight> = [
        weekly_mood_pattern(check_ins),
        temperature_pattern(check_ins, timing),
        sleep_energy_cascade(check_ins),
    ]
    .into_iter()
    .flatten()
    .collect();

    for pattern in &patterns {
        tracing::debug!(kind = %pattern.kind, strength = pattern.strength, "Detected pattern");
    }

    patterns
}

/// Per-weekday mood averages, Sunday first; `None` for empty weekdays
pub fn weekday_mood_averages(check_ins: &[CheckIn]) -> [Option<f64>; 7] {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];

    for check_in in check_ins {
        let dow = check_in.date.weekday().num_days_from_sunday() as usize;
        sums[dow] += f64::from(check_in.mood);
        counts[dow] += 1;
    }

    let mut averages = [None; 7];
    for dow in 0..7 {
        if counts[dow] > 0 {
            averages[dow] = Some(sums[dow] / counts[dow] as f64);
        }
    }
    averages
}

fn weekly_mood_pattern(check_ins: &[CheckIn]) -> Option<PatternInsight> {
    let averages = weekday_mood_averages(check_ins);

    let mut best: Option<(usize, f64)> = None;
    let mut worst: Option<(usize, f64)> = None;
    for (dow, avg) in averages.iter().enumerate() {
        let Some(avg) = *avg else { continue };
        if best.map_or(true, |(_, b)| avg > b) {
            best = Some((dow, avg));
        }
        if worst.map_or(true, |(_, w)| avg < w) {
            worst = Some((dow, avg));
        }
    }

    let ((peak_day, max_avg), (low_day, min_avg)) = (best?, worst?);
    let variability = max_avg - min_avg;
    if variability <= 2.0 {
        return None;
    }

    let peak = WEEKDAY_NAMES[peak_day];
    let low = WEEKDAY_NAMES[low_day];
    let description = if max_avg > (min_avg + max_avg) / 2.0 {
        format!(
            "Your mood tends to peak on {}s and dip on {}s, a swing of {:.1} points \
             across the week.",
            peak, low, variability
        )
    } else {
        format!(
            "Your mood tends to dip on {}s compared with {}s, a swing of {:.1} points \
             across the week.",
            low, peak, variability
        )
    };

    Some(PatternInsight {
        kind: PatternKind::WeeklyMoodCycle,
        name: "Weekly Mood Cycle".to_string(),
        frequency: "weekly".to_string(),
        strength: (variability / 10.0).min(1.0),
        description,
        action_items: vec![
            format!("Schedule enjoyable or restorative activities on {}s", low),
            format!("Use {}s for tasks that need the most emotional energy", peak),
            "Notice what is different about your routine on low days".to_string(),
        ],
    })
}

fn temperature_pattern(
    check_ins: &[CheckIn],
    timing: &dyn TimingClassifier,
) -> Option<PatternInsight> {
    let symptomatic: Vec<&CheckIn> =
        check_ins.iter().filter(|c| c.has_temperature_symptom()).collect();
    let frequency = symptomatic.len() as f64 / check_ins.len() as f64;
    if frequency <= 0.2 {
        return None;
    }

    let night_votes = timing
        .classify(&symptomatic)
        .into_iter()
        .filter(|t| *t == SymptomTime::Night)
        .count();
    let day_votes = symptomatic.len() - night_votes;
    tracing::debug!(
        classifier = timing.name(),
        night_votes,
        day_votes,
        "Classified symptom timing"
    );

    let when = if night_votes > day_votes {
        "most often at night"
    } else {
        "most often during the day"
    };

    Some(PatternInsight {
        kind: PatternKind::HotFlashTiming,
        name: "Hot Flash Timing".to_string(),
        frequency: format!("{} of {} days", symptomatic.len(), check_ins.len()),
        strength: frequency * 2.0,
        description: format!(
            "You experience hot flashes or night sweats on {:.0}% of days, {}.",
            frequency * 100.0,
            when
        ),
        action_items: strings(&[
            "Log possible triggers such as caffeine, alcohol or spicy food",
            "Keep a fan and layered clothing close at hand",
            "Discuss treatment options with your healthcare provider",
        ]),
    })
}

fn sleep_energy_cascade(check_ins: &[CheckIn]) -> Option<PatternInsight> {
    let comparisons = check_ins.len().saturating_sub(1);
    if comparisons == 0 {
        return None;
    }

    let cascades = check_ins
        .windows(2)
        .filter(|pair| pair[0].sleep < 5 && pair[1].energy < 5)
        .count();
    let strength = cascades as f64 / comparisons as f64;
    if strength <= 0.6 {
        return None;
    }

    Some(PatternInsight {
        kind: PatternKind::SleepEnergyCascade,
        name: "Sleep-Energy Cascade".to_string(),
        frequency: format!("{} of {} day transitions", cascades, comparisons),
        strength,
        description: "A poor night's sleep is usually followed by a low-energy day for you."
            .to_string(),
        action_items: strings(&[
            "After a poor night, plan a lighter day and protect time for rest",
            "Keep a consistent wake time even after bad nights",
        ]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::timing::{RandomTiming, RecordedTiming};
    use crate::checkin::BodyTemperature;
    use chrono::{Duration, NaiveDate};

    // 2024-01-01 is a Monday
    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    fn constant(len: i64) -> Vec<CheckIn> {
        (0..len).map(|i| CheckIn::new(day(i), 5, 6, 5, 7, 4)).collect()
    }

    fn find(patterns: &[PatternInsight], kind: PatternKind) -> Option<&PatternInsight> {
        patterns.iter().find(|p| p.kind == kind)
    }

    #[test]
    fn test_too_few_check_ins() {
        let mut check_ins = constant(13);
        for c in check_ins.iter_mut() {
            c.body_temperature = BodyTemperature::HotFlash;
        }
        assert!(detect_patterns(&check_ins, &RecordedTiming).is_empty());
    }

    #[test]
    fn test_flat_mood_has_no_weekly_pattern() {
        let patterns = detect_patterns(&constant(14), &RecordedTiming);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_weekly_cycle_peak_and_dip() {
        // Saturdays 9, Mondays 2, everything else 5
        let check_ins: Vec<CheckIn> = (0..21)
            .map(|i| {
                let mood = match day(i).weekday().num_days_from_sunday() {
                    6 => 9,
                    1 => 2,
                    _ => 5,
                };
                CheckIn::new(day(i), mood, 6, 5, 7, 4)
            })
            .collect();

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        let weekly = find(&patterns, PatternKind::WeeklyMoodCycle).unwrap();
        assert!(weekly.description.contains("peak on Saturdays"));
        assert!(weekly.description.contains("dip on Mondays"));
        assert!((weekly.strength - 0.7).abs() < 1e-9);
        assert_eq!(weekly.action_items.len(), 3);
    }

    #[test]
    fn test_weekly_buckets_two_week_split() {
        // Week one mood 3, week two mood 8, from Monday 2024-01-01:
        // every weekday bucket holds one 3 and one 8, so no variability
        let check_ins: Vec<CheckIn> = (0..14)
            .map(|i| CheckIn::new(day(i), if i < 7 { 3 } else { 8 }, 6, 5, 7, 4))
            .collect();

        let averages = weekday_mood_averages(&check_ins);
        assert!(averages.iter().all(|a| *a == Some(5.5)));
        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        assert!(find(&patterns, PatternKind::WeeklyMoodCycle).is_none());
    }

    #[test]
    fn test_empty_weekday_buckets_are_skipped() {
        // Only Mondays and Tuesdays
        let check_ins: Vec<CheckIn> = (0..14)
            .map(|i| {
                let date = day((i / 2) * 7 + (i % 2));
                CheckIn::new(date, if i % 2 == 0 { 2 } else { 8 }, 6, 5, 7, 4)
            })
            .collect();

        let averages = weekday_mood_averages(&check_ins);
        assert_eq!(averages[0], None);
        assert_eq!(averages[1], Some(2.0));
        assert_eq!(averages[2], Some(8.0));

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        let weekly = find(&patterns, PatternKind::WeeklyMoodCycle).unwrap();
        assert!(weekly.description.contains("peak on Tuesdays"));
    }

    #[test]
    fn test_temperature_strength_uncapped() {
        let mut check_ins = constant(14);
        for c in check_ins.iter_mut().take(9) {
            c.body_temperature = BodyTemperature::NightSweats;
        }

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        let temperature = find(&patterns, PatternKind::HotFlashTiming).unwrap();
        assert!((temperature.strength - 18.0 / 14.0).abs() < 1e-9);
        assert!(temperature.strength > 1.0);
        assert!(temperature.description.contains("at night"));
        assert_eq!(temperature.frequency, "9 of 14 days");
    }

    #[test]
    fn test_temperature_threshold() {
        // 3 of 15 = 0.2, not above threshold
        let mut check_ins = constant(15);
        for c in check_ins.iter_mut().take(3) {
            c.body_temperature = BodyTemperature::HotFlash;
        }
        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        assert!(find(&patterns, PatternKind::HotFlashTiming).is_none());
    }

    #[test]
    fn test_temperature_with_seeded_random() {
        let mut check_ins = constant(14);
        for c in check_ins.iter_mut().take(7) {
            c.body_temperature = BodyTemperature::HotFlash;
        }

        let first = detect_patterns(&check_ins, &RandomTiming::seeded(99));
        let second = detect_patterns(&check_ins, &RandomTiming::seeded(99));
        assert_eq!(first, second);
        assert!(find(&first, PatternKind::HotFlashTiming).is_some());
    }

    #[test]
    fn test_sleep_energy_cascade() {
        // Poor sleep and low energy every day: 13 of 13 transitions
        let check_ins: Vec<CheckIn> =
            (0..14).map(|i| CheckIn::new(day(i), 5, 3, 5, 3, 4)).collect();

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        let cascade = find(&patterns, PatternKind::SleepEnergyCascade).unwrap();
        assert_eq!(cascade.strength, 1.0);
        assert_eq!(cascade.frequency, "13 of 13 day transitions");
    }

    #[test]
    fn test_sleep_energy_cascade_threshold() {
        // Alternate poor and good nights: 7 cascades over 13 transitions
        let check_ins: Vec<CheckIn> = (0..14)
            .map(|i| {
                let sleep = if i % 2 == 0 { 3 } else { 8 };
                CheckIn::new(day(i), 5, 3, 5, sleep, 4)
            })
            .collect();

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        assert!(find(&patterns, PatternKind::SleepEnergyCascade).is_none());
    }

    #[test]
    fn test_sleep_energy_cascade_at_threshold() {
        // 9 cascades over 15 transitions is exactly 0.6
        let check_ins: Vec<CheckIn> = (0..16)
            .map(|i| {
                let sleep = if i < 9 { 3 } else { 8 };
                CheckIn::new(day(i), 5, 3, 5, sleep, 4)
            })
            .collect();

        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        assert!(find(&patterns, PatternKind::SleepEnergyCascade).is_none());

        // One more poor night tips it over
        let mut check_ins = check_ins;
        check_ins[9].sleep = 3;
        let patterns = detect_patterns(&check_ins, &RecordedTiming);
        let cascade = find(&patterns, PatternKind::SleepEnergyCascade).unwrap();
        assert_eq!(cascade.frequency, "10 of 15 day transitions");
    }
}
