//! Page controller for the ANCR dashboard.
//!
//! Wires user actions to API calls and keeps the per-tab display state:
//! cached lists, page numbers, and the debounced search timer. All state is
//! owned by the [`Dashboard`] value; a fetch replaces a tab's cached list
//! wholesale and resets its pagination.

pub mod config;
pub mod controller;
pub mod error;
pub mod search;
pub mod tabs;

pub use config::DashboardConfig;
pub use controller::{write_export, Dashboard, VerifyOutcome};
pub use error::DashboardError;
pub use search::SearchDebouncer;
pub use tabs::{Tab, TabState};
