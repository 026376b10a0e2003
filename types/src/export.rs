//! Identity detail and export payloads.

use serde::{Deserialize, Serialize};

use crate::anchor::Identity;
use crate::event::ReputationEvent;
use crate::verification::Verification;

/// Full detail view of one identity: the record plus its verifications and
/// reputation events, both most recent first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IdentityDetails {
    pub identity: Identity,
    pub verifications: Vec<Verification>,
    pub events: Vec<ReputationEvent>,
}

/// Per-export summary counts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStats {
    pub total_verifications: u64,
    pub total_events: u64,
}

/// The downloadable export document for one identity.
///
/// `export_date` is the service's export timestamp, passed through verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportPayload {
    pub export_date: String,
    pub identity: Identity,
    pub verifications: Vec<Verification>,
    pub events: Vec<ReputationEvent>,
    pub statistics: ExportStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::AnchorId;
    use crate::time::Timestamp;

    fn sample_identity() -> Identity {
        Identity {
            anchor_id: AnchorId(7),
            user_pub_key: "ab".repeat(32),
            trust_score: 55.0,
            created_at: Timestamp::parse("2025-02-14T09:00:00Z").unwrap(),
        }
    }

    #[test]
    fn export_payload_roundtrips() {
        let payload = ExportPayload {
            export_date: "2025-02-20T08:00:00Z".into(),
            identity: sample_identity(),
            verifications: Vec::new(),
            events: Vec::new(),
            statistics: ExportStats {
                total_verifications: 0,
                total_events: 0,
            },
        };
        let json = serde_json::to_string_pretty(&payload).unwrap();
        let back: ExportPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(payload, back);
    }
}
