//! API operations against the reputation service.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ancr_types::{
    AnchorId, ConsistencyCheck, ExportPayload, Identity, IdentityDetails, ReputationEvent,
    Statistics, TrustHistory, Verification,
};
use ancr_utils::RequestStats;

use crate::config::ApiConfig;
use crate::error::ClientError;

/// Endpoint families tracked in the request counters.
const STAT_NAMES: &[&str] = &[
    "statistics",
    "identities",
    "verifications",
    "consistency",
    "events",
    "health",
];

/// Client for the identity-anchor reputation service.
///
/// Holds a pooled `reqwest` client; cheap to clone per request internally,
/// construct once per process.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    stats: RequestStats,
}

// ── Request bodies ───────────────────────────────────────────────────────

/// Body of `POST /verification`.
#[derive(Clone, Debug, Serialize)]
pub struct NewVerification {
    pub anchor_id: AnchorId,
    pub platform_name: String,
    pub profile_url: String,
}

/// Body of `POST /consistency-check`.
#[derive(Clone, Debug, Serialize)]
pub struct NewConsistencyCheck {
    pub user_group: String,
    pub platform_a: String,
    pub platform_b: String,
}

/// Body of `POST /reputation-event`.
#[derive(Clone, Debug, Serialize)]
pub struct NewReputationEvent {
    pub anchor_id: AnchorId,
    pub event_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    pub score_impact: f64,
}

/// Liveness report from `GET /health`.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Response envelopes ───────────────────────────────────────────────────
//
// One envelope struct per payload key. The `success` flag and `error`
// message are shared; payload fields are optional so a failure envelope
// (which carries no payload) still deserializes.

#[derive(Debug, Deserialize)]
struct StatisticsEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    statistics: Option<Statistics>,
}

#[derive(Debug, Deserialize)]
struct IdentityEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    identity: Option<Identity>,
}

#[derive(Debug, Deserialize)]
struct IdentitiesEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    identities: Option<Vec<Identity>>,
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    identity: Option<Identity>,
    #[serde(default)]
    verifications: Option<Vec<Verification>>,
    #[serde(default)]
    events: Option<Vec<ReputationEvent>>,
}

#[derive(Debug, Deserialize)]
struct ExportEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    data: Option<ExportPayload>,
}

#[derive(Debug, Deserialize)]
struct HistoryEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    current_score: Option<f64>,
    #[serde(default)]
    history: Option<Vec<ancr_types::HistoryEntry>>,
}

#[derive(Debug, Deserialize)]
struct VerificationEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    verification: Option<Verification>,
}

#[derive(Debug, Deserialize)]
struct VerificationsEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    verifications: Option<Vec<Verification>>,
}

#[derive(Debug, Deserialize)]
struct CheckEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    check: Option<ConsistencyCheck>,
}

#[derive(Debug, Deserialize)]
struct ChecksEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    checks: Option<Vec<ConsistencyCheck>>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    event: Option<ReputationEvent>,
}

#[derive(Debug, Deserialize)]
struct HealthEnvelope {
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Unwrap an envelope's payload, mapping `success: false` to a service error.
fn unwrap_payload<T>(
    success: bool,
    error: Option<String>,
    payload: Option<T>,
    what: &str,
) -> Result<T, ClientError> {
    if !success {
        return Err(ClientError::Service(
            error.unwrap_or_else(|| "unknown service error".to_string()),
        ));
    }
    payload.ok_or_else(|| ClientError::InvalidResponse(format!("missing `{what}` in response")))
}

impl ApiClient {
    /// Create a client from config. Falls back to reqwest defaults if the
    /// builder rejects the timeouts.
    pub fn new(config: &ApiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            stats: RequestStats::new(STAT_NAMES),
        }
    }

    /// Request counters, keyed by endpoint family.
    pub fn request_stats(&self) -> &RequestStats {
        &self.stats
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /statistics`
    pub async fn statistics(&self) -> Result<Statistics, ClientError> {
        self.stats.increment("statistics");
        let env: StatisticsEnvelope = self.get(&self.url("/statistics"), &[]).await?;
        unwrap_payload(env.success, env.error, env.statistics, "statistics")
    }

    /// `POST /identity`
    pub async fn create_identity(&self) -> Result<Identity, ClientError> {
        self.stats.increment("identities");
        let env: IdentityEnvelope = self
            .post(&self.url("/identity"), &serde_json::json!({}))
            .await?;
        unwrap_payload(env.success, env.error, env.identity, "identity")
    }

    /// `GET /identities`
    pub async fn identities(&self) -> Result<Vec<Identity>, ClientError> {
        self.stats.increment("identities");
        let env: IdentitiesEnvelope = self.get(&self.url("/identities"), &[]).await?;
        unwrap_payload(env.success, env.error, env.identities, "identities")
    }

    /// `GET /identities/search?q=`
    ///
    /// The service matches the term against anchor ids and public keys.
    /// The term is percent-encoded by the query builder, never interpolated.
    pub async fn search_identities(&self, term: &str) -> Result<Vec<Identity>, ClientError> {
        self.stats.increment("identities");
        let env: IdentitiesEnvelope = self
            .get(&self.url("/identities/search"), &[("q", term)])
            .await?;
        unwrap_payload(env.success, env.error, env.identities, "identities")
    }

    /// `GET /identity/{id}`
    pub async fn identity_details(&self, id: AnchorId) -> Result<IdentityDetails, ClientError> {
        self.stats.increment("identities");
        let env: DetailsEnvelope = self.get(&self.url(&format!("/identity/{id}")), &[]).await?;
        if !env.success {
            return Err(ClientError::Service(
                env.error.unwrap_or_else(|| "unknown service error".to_string()),
            ));
        }
        Ok(IdentityDetails {
            identity: env
                .identity
                .ok_or_else(|| ClientError::InvalidResponse("missing `identity`".into()))?,
            verifications: env.verifications.unwrap_or_default(),
            events: env.events.unwrap_or_default(),
        })
    }

    /// `GET /identity/{id}/export`
    pub async fn export_identity(&self, id: AnchorId) -> Result<ExportPayload, ClientError> {
        self.stats.increment("identities");
        let env: ExportEnvelope = self
            .get(&self.url(&format!("/identity/{id}/export")), &[])
            .await?;
        unwrap_payload(env.success, env.error, env.data, "data")
    }

    /// `GET /identity/{id}/history`
    pub async fn trust_history(&self, id: AnchorId) -> Result<TrustHistory, ClientError> {
        self.stats.increment("identities");
        let env: HistoryEnvelope = self
            .get(&self.url(&format!("/identity/{id}/history")), &[])
            .await?;
        if !env.success {
            return Err(ClientError::Service(
                env.error.unwrap_or_else(|| "unknown service error".to_string()),
            ));
        }
        Ok(TrustHistory {
            current_score: env
                .current_score
                .ok_or_else(|| ClientError::InvalidResponse("missing `current_score`".into()))?,
            history: env.history.unwrap_or_default(),
        })
    }

    /// `POST /verification`
    pub async fn add_verification(
        &self,
        body: &NewVerification,
    ) -> Result<Verification, ClientError> {
        self.stats.increment("verifications");
        let env: VerificationEnvelope = self.post(&self.url("/verification"), body).await?;
        unwrap_payload(env.success, env.error, env.verification, "verification")
    }

    /// `GET /verifications`
    pub async fn verifications(&self) -> Result<Vec<Verification>, ClientError> {
        self.stats.increment("verifications");
        let env: VerificationsEnvelope = self.get(&self.url("/verifications"), &[]).await?;
        unwrap_payload(env.success, env.error, env.verifications, "verifications")
    }

    /// `POST /consistency-check`
    ///
    /// The service rejects checks where the two platforms are equal.
    pub async fn run_consistency_check(
        &self,
        body: &NewConsistencyCheck,
    ) -> Result<ConsistencyCheck, ClientError> {
        self.stats.increment("consistency");
        let env: CheckEnvelope = self.post(&self.url("/consistency-check"), body).await?;
        unwrap_payload(env.success, env.error, env.check, "check")
    }

    /// `GET /consistency-checks`
    pub async fn consistency_checks(&self) -> Result<Vec<ConsistencyCheck>, ClientError> {
        self.stats.increment("consistency");
        let env: ChecksEnvelope = self.get(&self.url("/consistency-checks"), &[]).await?;
        unwrap_payload(env.success, env.error, env.checks, "checks")
    }

    /// `POST /reputation-event`
    pub async fn log_reputation_event(
        &self,
        body: &NewReputationEvent,
    ) -> Result<ReputationEvent, ClientError> {
        self.stats.increment("events");
        let env: EventEnvelope = self.post(&self.url("/reputation-event"), body).await?;
        unwrap_payload(env.success, env.error, env.event, "event")
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.stats.increment("health");
        let env: HealthEnvelope = self.get(&self.url("/health"), &[]).await?;
        if !env.success {
            return Err(ClientError::Service(
                env.error.unwrap_or_else(|| "service unhealthy".to_string()),
            ));
        }
        Ok(HealthStatus {
            status: env
                .status
                .ok_or_else(|| ClientError::InvalidResponse("missing `status`".into()))?,
            message: env.message,
        })
    }

    // ── Transport ────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "GET");
        let mut req = self.http.get(url);
        if !query.is_empty() {
            req = req.query(query);
        }
        let response = req.send().await.map_err(map_transport_error)?;
        Self::decode(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        Self::decode(response).await
    }

    /// Decode an envelope from the response body.
    ///
    /// The service reports failures as `success: false` envelopes on 4xx/5xx
    /// statuses, so the body is parsed before the status is given up on.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        match serde_json::from_slice::<T>(&bytes) {
            Ok(envelope) => Ok(envelope),
            Err(e) if status.is_success() => Err(ClientError::InvalidResponse(format!(
                "failed to parse response: {e}"
            ))),
            Err(_) => Err(ClientError::RequestFailed(format!("HTTP status {status}"))),
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Unreachable(format!("request timed out: {e}"))
    } else if e.is_connect() {
        ClientError::Unreachable(format!("connection failed: {e}"))
    } else {
        ClientError::RequestFailed(e.to_string())
    }
}
