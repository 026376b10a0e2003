//! Cross-platform consistency check records.

use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// A comparison of an identity's presentation across two platforms.
///
/// The service computes the score (observed range [65, 98]); the two
/// platforms are always distinct.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    pub check_id: u64,
    pub user_group: String,
    pub platform_a: String,
    pub platform_b: String,
    pub consistency_score: f64,
    pub checked_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_service_json() {
        let json = r#"{
            "check_id": 11,
            "user_group": "beta-testers",
            "platform_a": "github",
            "platform_b": "linkedin",
            "consistency_score": 87.25,
            "checked_at": "2025-02-15T10:00:00Z"
        }"#;
        let check: ConsistencyCheck = serde_json::from_str(json).unwrap();
        assert_eq!(check.check_id, 11);
        assert!(check.consistency_score > 65.0);
    }
}
