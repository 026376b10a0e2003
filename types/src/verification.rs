//! Platform verification records.

use serde::{Deserialize, Serialize};

use crate::anchor::AnchorId;
use crate::time::Timestamp;

/// A claimed link between an identity anchor and an external platform profile.
///
/// `trust_score` is a snapshot of the owning identity's score; the service
/// includes it on list responses but not on identity-detail responses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub verification_id: u64,
    pub anchor_id: AnchorId,
    pub platform_name: String,
    pub profile_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_token: Option<String>,
    pub verified_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trust_score: Option<f64>,
}
