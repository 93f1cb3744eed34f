//! Core data types for daily wellness check-ins
//!
//! This module defines the input records consumed by the analytics layer:
//! - `CheckIn`: One day's self-reported ratings
//! - `BodyTemperature`: Categorical temperature symptom
//! - `Metric`: The five rated dimensions, used to address series
//! - `TrackerReading`: Raw device-sync sample (carried, not analysed)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lowest valid rating on the check-in scale
pub const RATING_MIN: u8 = 1;
/// Highest valid rating on the check-in scale
pub const RATING_MAX: u8 = 10;

/// A single daily check-in
///
/// Ratings are on a 1-10 scale. For mood, energy, libido and sleep
/// 10 is best; for stress 10 is most stressed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// Calendar day of the check-in
    pub date: NaiveDate,
    pub mood: u8,
    pub energy: u8,
    pub libido: u8,
    pub sleep: u8,
    pub stress: u8,
    pub body_temperature: BodyTemperature,
    /// Where this record came from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CheckInSource>,
    /// Raw values from a synced device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_data: Option<DeviceMetrics>,
    /// When temperature symptoms occurred, if the user recorded it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom_time: Option<SymptomTime>,
}

impl CheckIn {
    /// Create a manual check-in with normal temperature
    pub fn new(date: NaiveDate, mood: u8, energy: u8, libido: u8, sleep: u8, stress: u8) -> Self {
        Self {
            date,
            mood,
            energy,
            libido,
            sleep,
            stress,
            body_temperature: BodyTemperature::Normal,
            source: None,
            device_data: None,
            symptom_time: None,
        }
    }

    /// Builder method: set body temperature
    pub fn temperature(mut self, body_temperature: BodyTemperature) -> Self {
        self.body_temperature = body_temperature;
        self
    }

    /// Builder method: set provenance
    pub fn source(mut self, source: CheckInSource) -> Self {
        self.source = Some(source);
        self
    }

    /// Builder method: record when symptoms occurred
    pub fn symptom_time(mut self, time: SymptomTime) -> Self {
        self.symptom_time = Some(time);
        self
    }

    /// Builder method: attach raw device values
    pub fn device_data(mut self, data: DeviceMetrics) -> Self {
        self.device_data = Some(data);
        self
    }

    /// Get the rating for a metric
    pub fn rating(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Mood => self.mood,
            Metric::Energy => self.energy,
            Metric::Libido => self.libido,
            Metric::Sleep => self.sleep,
            Metric::Stress => self.stress,
        }
    }

    /// True for hot flashes and night sweats
    pub fn has_temperature_symptom(&self) -> bool {
        matches!(
            self.body_temperature,
            BodyTemperature::HotFlash | BodyTemperature::NightSweats
        )
    }
}

/// Reported body temperature for the day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BodyTemperature {
    #[default]
    Normal,
    HotFlash,
    NightSweats,
    Cold,
}

impl std::fmt::Display for BodyTemperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyTemperature::Normal => write!(f, "normal"),
            BodyTemperature::HotFlash => write!(f, "hot-flash"),
            BodyTemperature::NightSweats => write!(f, "night-sweats"),
            BodyTemperature::Cold => write!(f, "cold"),
        }
    }
}

impl std::str::FromStr for BodyTemperature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "normal" => Ok(BodyTemperature::Normal),
            "hot-flash" | "hotflash" => Ok(BodyTemperature::HotFlash),
            "night-sweats" | "nightsweats" => Ok(BodyTemperature::NightSweats),
            "cold" => Ok(BodyTemperature::Cold),
            other => Err(format!("Unknown body temperature: {}", other)),
        }
    }
}

/// Provenance of a check-in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum CheckInSource {
    Manual,
    Fitbit,
    Oura,
    AppleHealth,
    GoogleFit,
}

impl std::str::FromStr for CheckInSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "manual" => Ok(CheckInSource::Manual),
            "fitbit" => Ok(CheckInSource::Fitbit),
            "oura" => Ok(CheckInSource::Oura),
            "apple-health" => Ok(CheckInSource::AppleHealth),
            "google-fit" => Ok(CheckInSource::GoogleFit),
            other => Err(format!("Unknown check-in source: {}", other)),
        }
    }
}

/// Time of day a temperature symptom occurred
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SymptomTime {
    Day,
    Night,
}

impl std::str::FromStr for SymptomTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(SymptomTime::Day),
            "night" => Ok(SymptomTime::Night),
            other => Err(format!("Unknown symptom time: {}", other)),
        }
    }
}

/// Raw values reported by a wearable for the day
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeviceMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resting_heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate_variability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin_temperature_delta: Option<f64>,
}

/// A single device-sync sample
///
/// Accepted by predictive analysis for future use; no rule reads it yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrackerReading {
    pub date: NaiveDate,
    pub source: CheckInSource,
    #[serde(flatten)]
    pub metrics: DeviceMetrics,
}

/// The five rated check-in dimensions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Mood,
    Energy,
    Libido,
    Sleep,
    Stress,
}

impl Metric {
    /// Get all metrics for iteration
    pub fn all() -> &'static [Metric] {
        &[
            Metric::Mood,
            Metric::Energy,
            Metric::Libido,
            Metric::Sleep,
            Metric::Stress,
        ]
    }

    /// Extract this metric's series from a slice of check-ins
    pub fn series(self, check_ins: &[CheckIn]) -> Vec<f64> {
        check_ins.iter().map(|c| f64::from(c.rating(self))).collect()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Mood => write!(f, "mood"),
            Metric::Energy => write!(f, "energy"),
            Metric::Libido => write!(f, "libido"),
            Metric::Sleep => write!(f, "sleep"),
            Metric::Stress => write!(f, "stress"),
        }
    }
}
