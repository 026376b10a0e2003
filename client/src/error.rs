//! Client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("service unreachable: {0}")]
    Unreachable(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response from service: {0}")]
    InvalidResponse(String),

    /// The service answered with `success: false` and (usually) a message.
    #[error("service error: {0}")]
    Service(String),
}

impl From<ClientError> for ancr_types::AncrError {
    fn from(e: ClientError) -> Self {
        match e {
            ClientError::Service(msg) => ancr_types::AncrError::Service(msg),
            other => ancr_types::AncrError::Other(other.to_string()),
        }
    }
}
