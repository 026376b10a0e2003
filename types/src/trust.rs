//! Trust score thresholds and levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trust score assigned to a newly created identity.
pub const INITIAL_TRUST_SCORE: f64 = 50.0;

/// Upper bound the service clamps trust scores to.
pub const MAX_TRUST_SCORE: f64 = 100.0;

/// Scores at or above this render as high trust.
pub const HIGH_THRESHOLD: f64 = 75.0;

/// Scores at or above this (but below [`HIGH_THRESHOLD`]) render as medium trust.
pub const MEDIUM_THRESHOLD: f64 = 50.0;

/// Threshold-based classification of a trust or consistency score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustLevel {
    High,
    Medium,
    Low,
}

impl TrustLevel {
    /// Classify a score. Boundary-exact: 75 is High, 50 is Medium.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for TrustLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
