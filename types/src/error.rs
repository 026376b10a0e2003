//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for the ANCR dashboard.
#[derive(Debug, Error)]
pub enum AncrError {
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("{0}")]
    Other(String),
}
