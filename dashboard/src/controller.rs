//! The dashboard controller: user actions wired to API calls.

use std::path::{Path, PathBuf};

use ancr_client::{ApiClient, HealthStatus, NewConsistencyCheck, NewReputationEvent, NewVerification};
use ancr_flow::{FlowEvent, FlowRequest, FlowRunner, OutcomeSource, Sleeper};
use ancr_types::{
    AnchorId, ConsistencyCheck, ExportPayload, Identity, IdentityDetails, Platform,
    ReputationEvent, Statistics, Timestamp, TrustHistory, Verification,
};

use crate::config::DashboardConfig;
use crate::error::DashboardError;
use crate::tabs::{Tab, TabState};

/// Result of a verification attempt that went through the simulated flow.
#[derive(Clone, Debug)]
pub enum VerifyOutcome {
    /// The flow succeeded and the record was persisted.
    Verified(Verification),
    /// The flow failed; nothing was persisted.
    FlowFailed,
}

/// Owns all display state and the API client.
///
/// Fetches replace the relevant tab's cached list wholesale; nothing here
/// retries or escalates failures — callers surface them as messages.
pub struct Dashboard {
    client: ApiClient,
    config: DashboardConfig,
    active_tab: Tab,
    identities: TabState<Identity>,
    verifications: TabState<Verification>,
    checks: TabState<ConsistencyCheck>,
    statistics: Option<Statistics>,
    search_term: Option<String>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let client = ApiClient::new(&config.api_config());
        Self {
            client,
            config,
            active_tab: Tab::Identities,
            identities: TabState::new(),
            verifications: TabState::new(),
            checks: TabState::new(),
            statistics: None,
            search_term: None,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    /// The identity-search filter currently applied, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn identities(&self) -> &TabState<Identity> {
        &self.identities
    }

    pub fn verifications(&self) -> &TabState<Verification> {
        &self.verifications
    }

    pub fn checks(&self) -> &TabState<ConsistencyCheck> {
        &self.checks
    }

    // ── Fetching ─────────────────────────────────────────────────────

    pub async fn refresh_statistics(&mut self) -> Result<Statistics, DashboardError> {
        let stats = self.client.statistics().await?;
        self.statistics = Some(stats);
        Ok(stats)
    }

    /// Switch to a tab (explicit target) and refresh its list.
    pub async fn switch_tab(&mut self, tab: Tab) -> Result<(), DashboardError> {
        self.active_tab = tab;
        self.refresh_tab(tab).await
    }

    /// Re-fetch one tab's list, replacing the cache and resetting pagination.
    pub async fn refresh_tab(&mut self, tab: Tab) -> Result<(), DashboardError> {
        match tab {
            Tab::Identities => {
                let items = match self.search_term.as_deref() {
                    Some(term) => self.client.search_identities(term).await?,
                    None => self.client.identities().await?,
                };
                self.identities.replace(items);
            }
            Tab::Verifications => {
                self.verifications.replace(self.client.verifications().await?);
            }
            Tab::Consistency => {
                self.checks.replace(self.client.consistency_checks().await?);
            }
        }
        Ok(())
    }

    pub async fn refresh_active(&mut self) -> Result<(), DashboardError> {
        self.refresh_tab(self.active_tab).await
    }

    /// Apply a (debounced) search term to the identities tab.
    ///
    /// An empty term clears the filter and reloads the full list. Returns
    /// the number of matches.
    pub async fn apply_search(&mut self, term: &str) -> Result<usize, DashboardError> {
        let term = term.trim();
        self.search_term = if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        };
        self.refresh_tab(Tab::Identities).await?;
        Ok(self.identities.items().len())
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Create a new identity, then refresh the identities tab and the
    /// statistics header.
    pub async fn create_identity(&mut self) -> Result<Identity, DashboardError> {
        let identity = self.client.create_identity().await?;
        tracing::info!(anchor = %identity.anchor_id, "created identity");
        self.refresh_tab(Tab::Identities).await?;
        let _ = self.refresh_statistics().await;
        Ok(identity)
    }

    /// Run the simulated verification flow; persist the record only on
    /// success. Flow events are forwarded to `on_event` as they happen.
    pub async fn verify_with_flow<S: Sleeper, O: OutcomeSource>(
        &mut self,
        runner: &FlowRunner<S, O>,
        anchor_id: AnchorId,
        platform: Platform,
        profile_url: String,
        on_event: impl FnMut(&FlowEvent),
    ) -> Result<VerifyOutcome, DashboardError> {
        let request = FlowRequest {
            anchor_id,
            platform: platform.clone(),
            profile_url: profile_url.clone(),
        };
        let report = runner.run(&request, on_event).await;

        if !report.success {
            tracing::info!(anchor = %anchor_id, platform = %platform, "verification flow failed");
            return Ok(VerifyOutcome::FlowFailed);
        }

        let verification = self
            .add_verification_direct(anchor_id, &platform, profile_url)
            .await?;
        Ok(VerifyOutcome::Verified(verification))
    }

    /// Persist a verification record without running the flow.
    pub async fn add_verification_direct(
        &mut self,
        anchor_id: AnchorId,
        platform: &Platform,
        profile_url: String,
    ) -> Result<Verification, DashboardError> {
        let verification = self
            .client
            .add_verification(&NewVerification {
                anchor_id,
                platform_name: platform.as_str().to_string(),
                profile_url,
            })
            .await?;
        self.refresh_tab(Tab::Verifications).await?;
        let _ = self.refresh_statistics().await;
        Ok(verification)
    }

    /// Run a consistency check between two distinct platforms.
    pub async fn run_consistency_check(
        &mut self,
        user_group: String,
        platform_a: &Platform,
        platform_b: &Platform,
    ) -> Result<ConsistencyCheck, DashboardError> {
        if platform_a == platform_b {
            return Err(DashboardError::SamePlatform);
        }
        let check = self
            .client
            .run_consistency_check(&NewConsistencyCheck {
                user_group,
                platform_a: platform_a.as_str().to_string(),
                platform_b: platform_b.as_str().to_string(),
            })
            .await?;
        self.refresh_tab(Tab::Consistency).await?;
        let _ = self.refresh_statistics().await;
        Ok(check)
    }

    /// Log a reputation event against an identity.
    pub async fn log_event(
        &mut self,
        anchor_id: AnchorId,
        event_type: String,
        platform: Option<Platform>,
        score_impact: f64,
    ) -> Result<ReputationEvent, DashboardError> {
        let event = self
            .client
            .log_reputation_event(&NewReputationEvent {
                anchor_id,
                event_type,
                platform: platform.map(|p| p.as_str().to_string()),
                score_impact,
            })
            .await?;
        let _ = self.refresh_statistics().await;
        Ok(event)
    }

    // ── Read-only views ──────────────────────────────────────────────

    pub async fn identity_details(&self, id: AnchorId) -> Result<IdentityDetails, DashboardError> {
        Ok(self.client.identity_details(id).await?)
    }

    pub async fn trust_history(&self, id: AnchorId) -> Result<TrustHistory, DashboardError> {
        Ok(self.client.trust_history(id).await?)
    }

    pub async fn health(&self) -> Result<HealthStatus, DashboardError> {
        Ok(self.client.health().await?)
    }

    /// Fetch an identity's export payload and write it to the export
    /// directory as `identity_{id}_export_{YYYY-MM-DD}.json`.
    pub async fn export_identity(&self, id: AnchorId) -> Result<PathBuf, DashboardError> {
        let payload = self.client.export_identity(id).await?;
        let date = Timestamp::now().date_string();
        let path = write_export(&payload, &self.config.export_dir, &date)?;
        tracing::info!(anchor = %id, path = %path.display(), "exported identity");
        Ok(path)
    }

    // ── Pagination ───────────────────────────────────────────────────

    pub fn next_page(&mut self) {
        let size = self.config.page_size;
        match self.active_tab {
            Tab::Identities => self.identities.next_page(size),
            Tab::Verifications => self.verifications.next_page(size),
            Tab::Consistency => self.checks.next_page(size),
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_tab {
            Tab::Identities => self.identities.prev_page(),
            Tab::Verifications => self.verifications.prev_page(),
            Tab::Consistency => self.checks.prev_page(),
        }
    }

    /// Render the active tab's current page plus a pagination footer.
    pub fn render_active(&self, now: Timestamp) -> String {
        let size = self.config.page_size;
        let (body, page, pages, total) = match self.active_tab {
            Tab::Identities => (
                ancr_render::identities_table(self.identities.visible(size), now),
                self.identities.page(),
                self.identities.page_count(size),
                self.identities.items().len(),
            ),
            Tab::Verifications => (
                ancr_render::verifications_table(self.verifications.visible(size), now),
                self.verifications.page(),
                self.verifications.page_count(size),
                self.verifications.items().len(),
            ),
            Tab::Consistency => (
                ancr_render::checks_table(self.checks.visible(size), now),
                self.checks.page(),
                self.checks.page_count(size),
                self.checks.items().len(),
            ),
        };
        if total == 0 {
            body
        } else {
            format!("{body}\npage {page} of {} ({total} items)", pages.max(1))
        }
    }
}

/// Write an export payload as pretty-printed JSON.
///
/// The filename is `identity_{id}_export_{date}.json`; the directory is
/// created if needed. Returns the full path written.
pub fn write_export(
    payload: &ExportPayload,
    dir: &Path,
    date: &str,
) -> Result<PathBuf, std::io::Error> {
    std::fs::create_dir_all(dir)?;
    let filename = format!("identity_{}_export_{}.json", payload.identity.anchor_id, date);
    let path = dir.join(filename);
    let json = serde_json::to_string_pretty(payload).map_err(std::io::Error::other)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ancr_types::ExportStats;

    fn sample_payload() -> ExportPayload {
        ExportPayload {
            export_date: "2025-03-01T12:00:00Z".into(),
            identity: Identity {
                anchor_id: AnchorId(7),
                user_pub_key: "cd".repeat(32),
                trust_score: 60.0,
                created_at: Timestamp::parse("2025-02-14T09:00:00Z").unwrap(),
            },
            verifications: Vec::new(),
            events: Vec::new(),
            statistics: ExportStats {
                total_verifications: 0,
                total_events: 0,
            },
        }
    }

    #[test]
    fn export_file_name_and_contents() {
        let dir = tempfile::tempdir().unwrap();
        let payload = sample_payload();

        let path = write_export(&payload, dir.path(), "2025-03-01").unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "identity_7_export_2025-03-01.json"
        );
        let written = std::fs::read_to_string(&path).unwrap();
        let back: ExportPayload = serde_json::from_str(&written).unwrap();
        assert_eq!(back, payload);
        // Pretty-printed, not a single line.
        assert!(written.lines().count() > 1);
    }

    #[test]
    fn export_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports/march");
        let path = write_export(&sample_payload(), &nested, "2025-03-01").unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn flow_failure_persists_nothing() {
        use ancr_nullables::{NullOutcome, NullSleeper};

        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let runner = FlowRunner::with_runtime(
            dashboard.config().flow_config(),
            NullSleeper::new(),
            NullOutcome::constant(false),
        )
        .unwrap();

        let mut events = Vec::new();
        let outcome = dashboard
            .verify_with_flow(
                &runner,
                AnchorId(1),
                Platform::parse("github"),
                "https://github.com/example".into(),
                |e| events.push(e.clone()),
            )
            .await
            .unwrap();

        assert!(matches!(outcome, VerifyOutcome::FlowFailed));
        assert!(matches!(
            events.last(),
            Some(FlowEvent::Finished { success: false })
        ));
        // Persisting only happens on success: no verification request fired.
        assert_eq!(dashboard.client().request_stats().get("verifications"), 0);
    }

    #[tokio::test]
    async fn same_platform_guard_rejects_before_any_request() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let a = Platform::parse("github");
        let b = Platform::parse("GitHub");

        let result = dashboard
            .run_consistency_check("beta-testers".into(), &a, &b)
            .await;
        assert!(matches!(result, Err(DashboardError::SamePlatform)));
    }

    #[test]
    fn render_active_empty_has_no_footer() {
        let dashboard = Dashboard::new(DashboardConfig::default());
        let rendered = dashboard.render_active(Timestamp::now());
        assert_eq!(rendered, "(no identities)");
    }
}
