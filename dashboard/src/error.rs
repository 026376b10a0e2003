//! Dashboard error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Client(#[from] ancr_client::ClientError),

    #[error(transparent)]
    Flow(#[from] ancr_flow::FlowError),

    #[error("config error: {0}")]
    Config(String),

    #[error("consistency checks need two different platforms")]
    SamePlatform,

    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),
}
