//! Core types for the ANCR dashboard.
//!
//! This crate defines the records exchanged with the identity-anchor
//! reputation service, plus the timestamp, trust-level, and platform types
//! shared across every other crate in the workspace. Entities here are
//! pass-through records: the service owns their lifecycle, this client never
//! mutates or persists them.

pub mod anchor;
pub mod consistency;
pub mod error;
pub mod event;
pub mod export;
pub mod platform;
pub mod stats;
pub mod time;
pub mod trust;
pub mod verification;

pub use anchor::{AnchorId, Identity};
pub use consistency::ConsistencyCheck;
pub use error::AncrError;
pub use event::{HistoryEntry, ReputationEvent, TrustHistory};
pub use export::{ExportPayload, ExportStats, IdentityDetails};
pub use platform::Platform;
pub use stats::Statistics;
pub use time::Timestamp;
pub use trust::{TrustLevel, INITIAL_TRUST_SCORE, MAX_TRUST_SCORE};
pub use verification::Verification;
