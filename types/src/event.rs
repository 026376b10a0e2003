//! Reputation events and trust score history.

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorId;
use crate::time::Timestamp;

/// Event type the service logs when a verification succeeds.
pub const EVENT_SUCCESSFUL_VERIFICATION: &str = "successful_verification";

/// A logged change to an identity's reputation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReputationEvent {
    pub event_id: u64,
    pub anchor_id: AnchorId,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default)]
    pub score_impact: Option<f64>,
    pub time_stamp: Timestamp,
}

/// One row of an identity's trust score history (most recent first).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub time_stamp: Timestamp,
    /// Score before this event, when the service can reconstruct it.
    #[serde(default)]
    pub prev_score: Option<f64>,
}

/// Trust score history for one identity: the current score plus up to the
/// 20 most recent events.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrustHistory {
    pub current_score: f64,
    pub history: Vec<HistoryEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_platform_may_be_absent() {
        let json = r#"{
            "event_id": 1,
            "anchor_id": 7,
            "event_type": "manual_adjustment",
            "time_stamp": "2025-02-14T12:00:00Z"
        }"#;
        let event: ReputationEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.platform, None);
        assert_eq!(event.score_impact, None);
    }

    #[test]
    fn history_deserializes_with_prev_scores() {
        let json = r#"{
            "current_score": 70.0,
            "history": [
                {"event_type": "successful_verification", "platform": "github",
                 "time_stamp": "2025-02-14T12:00:00Z", "prev_score": 65.0},
                {"event_type": "successful_verification", "platform": "twitter",
                 "time_stamp": "2025-02-13T12:00:00Z", "prev_score": null}
            ]
        }"#;
        let history: TrustHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[0].prev_score, Some(65.0));
        assert_eq!(history.history[1].prev_score, None);
    }
}
