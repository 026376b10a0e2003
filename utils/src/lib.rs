//! Shared utilities for the ANCR dashboard.

pub mod logging;
pub mod stats;
pub mod time;

pub use logging::init_tracing;
pub use stats::RequestStats;
pub use time::{format_duration, format_relative};
