//! HTTP client for the identity-anchor reputation service.
//!
//! Wraps the service's REST endpoints (base path `/api`):
//! - Dashboard statistics
//! - Identity creation, listing, search, detail, export, trust history
//! - Platform verifications
//! - Cross-platform consistency checks
//! - Reputation events
//! - Liveness
//!
//! Every response is a JSON envelope `{"success": bool, ...payload}` or
//! `{"success": false, "error": "..."}`. The client unwraps the envelope and
//! maps failures to [`ClientError`]. No retries, no batching.

pub mod api;
pub mod config;
pub mod error;

pub use api::{ApiClient, HealthStatus, NewConsistencyCheck, NewReputationEvent, NewVerification};
pub use config::ApiConfig;
pub use error::ClientError;
