//! Dashboard configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ancr_client::ApiConfig;
use ancr_flow::FlowConfig;

use crate::error::DashboardError;

/// Configuration for the dashboard and its API client.
///
/// Can be loaded from a TOML file via [`DashboardConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a serde default
/// so a partial file parses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Base URL of the reputation service, including the `/api` prefix.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Items per page in list views.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before a search term is sent.
    #[serde(default = "default_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Probability in [0, 1] that a simulated verification flow succeeds.
    #[serde(default = "default_success_rate")]
    pub flow_success_rate: f64,

    /// Directory export files are written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_api_url() -> String {
    ancr_client::config::DEFAULT_API_URL.to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_page_size() -> usize {
    ancr_render::DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_success_rate() -> f64 {
    ancr_flow::DEFAULT_SUCCESS_RATE
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            page_size: default_page_size(),
            search_debounce_ms: default_debounce_ms(),
            flow_success_rate: default_success_rate(),
            export_dir: default_export_dir(),
            log_level: default_log_level(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, DashboardError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("read {}: {e}", path.display())))?;
        toml::from_str(&contents)
            .map_err(|e| DashboardError::Config(format!("parse {}: {e}", path.display())))
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }

    pub fn flow_config(&self) -> FlowConfig {
        FlowConfig {
            success_rate: self.flow_success_rate,
            ..FlowConfig::default()
        }
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_conventions() {
        let config = DashboardConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.search_debounce_ms, 300);
        assert!((config.flow_success_rate - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: DashboardConfig =
            toml::from_str("api_url = \"http://reputation.internal/api\"\npage_size = 25\n")
                .unwrap();
        assert_eq!(config.api_url, "http://reputation.internal/api");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = DashboardConfig::from_toml_file(Path::new("/nonexistent/ancr.toml"));
        assert!(matches!(err, Err(DashboardError::Config(_))));
    }
}
