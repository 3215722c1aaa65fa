//! Severity grading boundary.
//!
//! The engine never knows how severity is computed. It hands the classifier four
//! features in a fixed order (latitude, longitude, metres to the assigned station,
//! hour of day) and takes back one of three labels. Trained models live behind
//! [`SeverityClassifier`]; [`ThresholdClassifier`] is a deterministic stand-in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown severity label '{other}'")),
        }
    }
}

/// Classifier inputs, in the order models were trained on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityFeatures {
    pub lat: f64,
    pub lon: f64,
    pub distance_to_station_m: f64,
    pub hour_of_day: u8,
}

impl SeverityFeatures {
    /// `[lat, lon, distance_to_station_m, hour_of_day]`. Reordering changes predictions.
    pub fn to_vector(&self) -> [f64; 4] {
        [
            self.lat,
            self.lon,
            self.distance_to_station_m,
            self.hour_of_day as f64,
        ]
    }
}

/// Deterministic, side-effect-free severity predictor.
pub trait SeverityClassifier {
    fn predict(&self, lat: f64, lon: f64, distance_to_station_m: f64, hour_of_day: u8) -> Severity;

    fn predict_features(&self, features: &SeverityFeatures) -> Severity {
        self.predict(
            features.lat,
            features.lon,
            features.distance_to_station_m,
            features.hour_of_day,
        )
    }
}

impl<F> SeverityClassifier for F
where
    F: Fn(f64, f64, f64, u8) -> Severity,
{
    fn predict(&self, lat: f64, lon: f64, distance_to_station_m: f64, hour_of_day: u8) -> Severity {
        self(lat, lon, distance_to_station_m, hour_of_day)
    }
}

/// Linear score over distance and hour, cut into three bands.
///
/// `score = distance_m * distance_weight + hour * hour_weight + bias`; below
/// `medium_from` is low, below `high_from` is medium, anything else is high.
/// Location does not contribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdClassifier {
    pub distance_weight: f64,
    pub hour_weight: f64,
    pub bias: f64,
    pub medium_from: f64,
    pub high_from: f64,
}

impl Default for ThresholdClassifier {
    fn default() -> Self {
        Self {
            distance_weight: 0.001,
            hour_weight: 0.02,
            bias: 1.0,
            medium_from: 5.0,
            high_from: 9.0,
        }
    }
}

impl ThresholdClassifier {
    pub fn score(&self, distance_to_station_m: f64, hour_of_day: u8) -> f64 {
        distance_to_station_m * self.distance_weight
            + hour_of_day as f64 * self.hour_weight
            + self.bias
    }
}

impl SeverityClassifier for ThresholdClassifier {
    fn predict(
        &self,
        _lat: f64,
        _lon: f64,
        distance_to_station_m: f64,
        hour_of_day: u8,
    ) -> Severity {
        let score = self.score(distance_to_station_m, hour_of_day);
        if score < self.medium_from {
            Severity::Low
        } else if score < self.high_from {
            Severity::Medium
        } else {
            Severity::High
        }
    }
}
