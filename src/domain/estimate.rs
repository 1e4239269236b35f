//! Structured time estimates
//!
//! The AI backend suggests durations as free text ("2 hours", "30 minutes").
//! Estimates are parsed into a structured form at the point they enter the
//! system so the aggregation views never re-parse display strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseEstimateError {
    #[error("No duration unit found in '{0}' (expected minutes or hours)")]
    MissingUnit(String),

    #[error("Invalid duration magnitude in '{0}'")]
    InvalidMagnitude(String),
}

/// Unit of an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateUnit {
    Minutes,
    Hours,
}

/// A structured duration estimate for a task
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Estimate {
    magnitude: f64,
    unit: EstimateUnit,
}

impl Estimate {
    /// Creates an estimate; negative magnitudes are clamped to zero
    pub fn new(magnitude: f64, unit: EstimateUnit) -> Self {
        Self {
            magnitude: magnitude.max(0.0),
            unit,
        }
    }

    pub fn minutes(magnitude: f64) -> Self {
        Self::new(magnitude, EstimateUnit::Minutes)
    }

    pub fn hours(magnitude: f64) -> Self {
        Self::new(magnitude, EstimateUnit::Hours)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> EstimateUnit {
        self.unit
    }

    /// Returns the estimate in hours, for aggregation
    pub fn as_hours(&self) -> f64 {
        match self.unit {
            EstimateUnit::Hours => self.magnitude,
            EstimateUnit::Minutes => self.magnitude / 60.0,
        }
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match (self.unit, self.magnitude) {
            (EstimateUnit::Hours, m) if (m - 1.0).abs() < f64::EPSILON => "hour",
            (EstimateUnit::Hours, _) => "hours",
            (EstimateUnit::Minutes, m) if (m - 1.0).abs() < f64::EPSILON => "minute",
            (EstimateUnit::Minutes, _) => "minutes",
        };
        if self.magnitude.fract() == 0.0 {
            write!(f, "{} {}", self.magnitude as i64, unit)
        } else {
            write!(f, "{} {}", self.magnitude, unit)
        }
    }
}

impl FromStr for Estimate {
    type Err = ParseEstimateError;

    /// Parses free text like "2 hours", "90 minutes", "1.5 hours", "30 min".
    ///
    /// The unit word decides the unit; everything before it must parse as a
    /// number once trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();

        let (unit, unit_pos) = if let Some(pos) = lower.find("hour").or_else(|| lower.find("hr")) {
            (EstimateUnit::Hours, pos)
        } else if let Some(pos) = lower.find("min") {
            (EstimateUnit::Minutes, pos)
        } else {
            return Err(ParseEstimateError::MissingUnit(s.to_string()));
        };

        let magnitude: f64 = lower[..unit_pos]
            .trim()
            .parse()
            .map_err(|_| ParseEstimateError::InvalidMagnitude(s.to_string()))?;

        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(ParseEstimateError::InvalidMagnitude(s.to_string()));
        }

        Ok(Self { magnitude, unit })
    }
}

impl TryFrom<String> for Estimate {
    type Error = ParseEstimateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Estimate> for String {
    fn from(estimate: Estimate) -> Self {
        estimate.to_string()
    }
}
