//! Datastore RPC Client
//!
//! HTTP client wrapper for the hosted datastore's RPC endpoints. Provides
//! timeout configuration, user-agent headers, and bearer authentication with
//! the service key. Every public fetch returns a `Sourced` value: transport
//! and parse failures are logged and degraded, never propagated as
//! request-fatal errors.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::credentials::{Credentials, SecretString};
use crate::error::DatastoreError;
use crate::insights::types::{
    BaselineMetrics, ConfidenceSignals, EngagementSignals, Period, RiskSignals, Sourced,
    StepCount, Track,
};

/// Hosted datastore RPC client
///
/// Wraps reqwest::Client with datastore-specific configuration including
/// timeouts, base URL, user-agent headers, and the service key for
/// authenticated calls.
#[derive(Clone)]
pub struct DatastoreClient {
    client: Client,
    base_url: String,
    service_key: Option<SecretString>,
}

impl std::fmt::Debug for DatastoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatastoreClient")
            .field("base_url", &self.base_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Wire shape of the funnel_step_counts RPC
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepCountsResponse {
    steps: Vec<StepCount>,
    /// Set by the source when counts were backfilled from sampled data
    #[serde(default)]
    is_estimated: bool,
}

impl DatastoreClient {
    /// Creates a client for the given base URL with default settings
    ///
    /// Default configuration:
    /// - Timeout: 10 seconds
    /// - User-Agent: founder-insights/0.1.0
    /// - No service key (only works against an unauthenticated dev datastore)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Self::build_http_client(Duration::from_secs(10)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: None,
        }
    }

    /// Creates a client from `DATASTORE_URL` / `DATASTORE_SERVICE_KEY`
    pub fn from_env() -> Result<Self, String> {
        let credentials = Credentials::from_env()?;
        Ok(Self {
            client: Self::build_http_client(Duration::from_secs(10)),
            base_url: credentials.base_url,
            service_key: Some(credentials.service_key),
        })
    }

    fn build_http_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("founder-insights/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ordered funnel stage counts for one period/track selection
    pub async fn funnel_step_counts(
        &self,
        period: Period,
        track: Track,
    ) -> Sourced<Vec<StepCount>> {
        let params = serde_json::json!({
            "period": period.as_str(),
            "track": track.as_str(),
        });

        match self.rpc::<StepCountsResponse>("funnel_step_counts", params).await {
            Ok(response) if response.is_estimated => Sourced::estimated(
                response.steps,
                "Funnel counts backfilled from sampled data.",
            ),
            Ok(response) => Sourced::ok(response.steps),
            Err(err) => self.degrade("funnel_step_counts", err, "Funnel data unavailable."),
        }
    }

    /// Coverage/volume signals feeding the confidence scorer
    pub async fn confidence_signals(&self) -> Sourced<ConfidenceSignals> {
        match self
            .rpc::<ConfidenceSignals>("confidence_signals", serde_json::json!({}))
            .await
        {
            Ok(signals) => Sourced::ok(signals),
            Err(err) => self.degrade(
                "confidence_signals",
                err,
                "Analytics coverage signals unavailable.",
            ),
        }
    }

    /// Named 7d/30d KPI snapshot for one track
    pub async fn baseline_metrics(&self, track: Track) -> Sourced<BaselineMetrics> {
        let params = serde_json::json!({ "track": track.as_str() });
        match self.rpc::<BaselineMetrics>("baseline_metrics", params).await {
            Ok(metrics) => Sourced::ok(metrics),
            Err(err) => self.degrade("baseline_metrics", err, "Baseline metrics unavailable."),
        }
    }

    /// Session-depth signals feeding blocker detection
    pub async fn engagement_signals(&self) -> Sourced<EngagementSignals> {
        match self
            .rpc::<EngagementSignals>("engagement_signals", serde_json::json!({}))
            .await
        {
            Ok(signals) => Sourced::ok(signals),
            Err(err) => self.degrade("engagement_signals", err, "Engagement signals unavailable."),
        }
    }

    /// Fraud/payment-health signals feeding blocker detection
    pub async fn risk_signals(&self) -> Sourced<RiskSignals> {
        match self
            .rpc::<RiskSignals>("risk_signals", serde_json::json!({}))
            .await
        {
            Ok(signals) => Sourced::ok(signals),
            Err(err) => self.degrade("risk_signals", err, "Risk signals unavailable."),
        }
    }

    /// POST an RPC call and deserialize the response body
    async fn rpc<T: DeserializeOwned>(
        &self,
        function: &str,
        params: serde_json::Value,
    ) -> Result<T, DatastoreError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);

        let mut request = self.client.post(&url).json(&params);
        if let Some(key) = &self.service_key {
            request = request
                .header("apikey", key.expose_secret())
                .bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(DatastoreError::from)?;
        let response = response
            .error_for_status()
            .map_err(DatastoreError::from)?;

        response
            .json::<T>()
            .await
            .map_err(|err| DatastoreError::ParseError(format!("{}: {}", function, err)))
    }

    /// Fold a failed fetch into a degraded `Sourced` value
    fn degrade<T>(&self, function: &str, err: DatastoreError, note: &str) -> Sourced<T> {
        tracing::warn!(
            rpc = %function,
            error = %err,
            error_type = err.error_type(),
            retryable = err.is_retryable(),
            "Datastore fetch failed; degrading to sentinel"
        );
        Sourced::missing(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DatastoreClient::new("https://project.example.co/");
        assert_eq!(client.base_url(), "https://project.example.co");
    }

    #[test]
    fn test_debug_masks_service_key() {
        let mut client = DatastoreClient::new("https://project.example.co");
        client.service_key = Some(SecretString::new("service-role-key-123456".to_string()));
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("service-role-key"));
        assert!(rendered.contains("***"));
    }

    #[tokio::test]
    async fn test_unreachable_datastore_degrades() {
        // Closed local port refuses connections immediately
        let client = DatastoreClient::new("http://127.0.0.1:9");
        let sourced = client.confidence_signals().await;
        assert!(sourced.value.is_none());
        assert!(sourced.note.is_some());
    }
}
