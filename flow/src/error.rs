//! Flow error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("success rate must be within [0, 1], got {0}")]
    InvalidSuccessRate(f64),
}
