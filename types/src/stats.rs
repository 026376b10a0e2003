//! Aggregate dashboard statistics.

use serde::{Deserialize, Serialize};

/// Aggregate counts and averages shown at the top of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct Statistics {
    pub total_identities: u64,
    pub total_verifications: u64,
    pub avg_trust_score: f64,
    pub avg_consistency_score: f64,
}
