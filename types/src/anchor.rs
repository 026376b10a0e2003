//! Identity anchor records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::time::Timestamp;
use crate::trust::TrustLevel;

/// Numeric identifier of an identity anchor, assigned by the service.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct AnchorId(pub u64);

impl fmt::Display for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnchorId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}

/// A user-created record representing a claimed identity.
///
/// Created server-side with an initial trust score of 50; the score moves
/// with verifications and reputation events, clamped into [0, 100].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub anchor_id: AnchorId,
    pub user_pub_key: String,
    pub trust_score: f64,
    pub created_at: Timestamp,
}

impl Identity {
    pub fn trust_level(&self) -> TrustLevel {
        TrustLevel::from_score(self.trust_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_deserializes_from_service_json() {
        let json = r#"{
            "anchor_id": 7,
            "user_pub_key": "9f2c1d4e8a7b3c5d6e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1c2d",
            "trust_score": 55.0,
            "created_at": "2025-02-14T09:00:00Z"
        }"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.anchor_id, AnchorId(7));
        assert_eq!(identity.trust_level(), TrustLevel::Medium);
    }

    #[test]
    fn anchor_id_parses_from_str() {
        assert_eq!(" 42 ".parse::<AnchorId>().unwrap(), AnchorId(42));
        assert!("x42".parse::<AnchorId>().is_err());
    }
}
