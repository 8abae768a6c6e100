//! CareLink API client.
//!
//! This module is the network boundary of the crate. It issues the two
//! operations the external service exposes and normalizes their responses:
//!
//! - `POST /publish-vitals` — publish one reading or a batch of readings
//!   for a device
//! - `GET /latest-vitals` — fetch the vitals history, the model's risk
//!   score, and the narrative summary, wrapped in a double-encoded JSON
//!   envelope
//!
//! [`VitalsClient`] performs the calls; [`worker`] bridges them onto a
//! background runtime so the UI loop never blocks on the network.
//!
//! There is no caching, no retry, and no timeout beyond the transport
//! default: a hung request leaves the caller loading until the transport
//! gives up. Callers that need liveness must treat that as a known
//! limitation of the upstream contract.

mod envelope;
mod error;
pub mod worker;

pub use error::ClientError;
pub use worker::{ClientCommand, ClientHandle, ClientResponse, ResponseFeed};

use tracing::debug;

use crate::data::{VitalsReading, VitalsReport};

/// Device identifier used when none is configured.
pub const DEFAULT_DEVICE_ID: &str = "carelink-health-monitor";

/// Months of history requested when none is configured.
pub const DEFAULT_MONTHS_BACK: u32 = 3;

/// Client for the CareLink publish and fetch endpoints.
///
/// Stateless apart from the underlying connection pool; clones are cheap
/// and share the pool.
#[derive(Debug, Clone)]
pub struct VitalsClient {
    http: reqwest::Client,
    base_url: String,
    device_id: String,
}

impl VitalsClient {
    /// Create a client for the given API origin and device identifier.
    pub fn new(base_url: impl Into<String>, device_id: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            device_id: device_id.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Publish a single reading.
    ///
    /// Rejects non-finite values before dispatch. Any transport failure or
    /// non-2xx response is a [`ClientError::Submit`].
    pub async fn submit(&self, reading: &VitalsReading) -> Result<(), ClientError> {
        if !reading.is_finite() {
            return Err(ClientError::NonFiniteReading);
        }

        let body = serde_json::json!({
            "device_id": self.device_id,
            "heart_rate": reading.heart_rate,
            "blood_oxygen": reading.blood_oxygen,
            "temperature": reading.temperature,
        });

        debug!(device_id = %self.device_id, "publishing reading");
        self.http
            .post(format!("{}/publish-vitals", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Submit)?
            .error_for_status()
            .map_err(ClientError::Submit)?;

        Ok(())
    }

    /// Parse and publish a batch of readings from raw text.
    ///
    /// The text must deserialize into an array of readings; a parse failure
    /// is a [`ClientError::MalformedBatch`] and no network call is made.
    /// Returns the number of readings published.
    pub async fn submit_batch(&self, raw: &str) -> Result<usize, ClientError> {
        let readings: Vec<VitalsReading> =
            serde_json::from_str(raw).map_err(ClientError::MalformedBatch)?;
        if readings.iter().any(|r| !r.is_finite()) {
            return Err(ClientError::NonFiniteReading);
        }
        let count = readings.len();

        let body = serde_json::json!({
            "device_id": self.device_id,
            "vitals": readings,
        });

        debug!(device_id = %self.device_id, count, "publishing batch");
        self.http
            .post(format!("{}/publish-vitals", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(ClientError::Submit)?
            .error_for_status()
            .map_err(ClientError::Submit)?;

        Ok(count)
    }

    /// Fetch the latest report for this client's device.
    ///
    /// The response body is a JSON envelope whose `body` field is itself a
    /// JSON-encoded string; both decodes must succeed. Non-2xx responses
    /// (including the upstream's 404 when no vitals exist yet) are a
    /// [`ClientError::Fetch`].
    pub async fn fetch_latest(&self, months_back: u32) -> Result<VitalsReport, ClientError> {
        let months = months_back.to_string();

        debug!(device_id = %self.device_id, months_back, "fetching latest report");
        let response = self
            .http
            .get(format!("{}/latest-vitals", self.base_url))
            .query(&[("device_id", self.device_id.as_str()), ("months_back", months.as_str())])
            .send()
            .await
            .map_err(ClientError::Fetch)?
            .error_for_status()
            .map_err(ClientError::Fetch)?;

        let outer = response.text().await.map_err(ClientError::Fetch)?;
        envelope::decode_report(&outer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{any, body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn reading() -> VitalsReading {
        VitalsReading {
            heart_rate: 72.0,
            blood_oxygen: 97.5,
            temperature: 36.8,
            timestamp: None,
        }
    }

    #[tokio::test]
    async fn test_submit_posts_device_and_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/publish-vitals"))
            .and(body_partial_json(serde_json::json!({
                "device_id": "test-device",
                "heart_rate": 72.0,
                "blood_oxygen": 97.5,
                "temperature": 36.8,
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = VitalsClient::new(server.uri(), "test-device");
        client.submit(&reading()).await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_non_2xx_is_submit_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/publish-vitals"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let err = client.submit(&reading()).await.unwrap_err();
        assert!(matches!(err, ClientError::Submit(_)));
    }

    #[tokio::test]
    async fn test_submit_rejects_non_finite_without_network() {
        let server = MockServer::start().await;
        Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let bad = VitalsReading { heart_rate: f64::NAN, ..reading() };
        let err = client.submit(&bad).await.unwrap_err();
        assert!(matches!(err, ClientError::NonFiniteReading));
    }

    #[tokio::test]
    async fn test_malformed_batch_never_reaches_transport() {
        let server = MockServer::start().await;
        Mock::given(any()).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let err = client.submit_batch("{not valid json").await.unwrap_err();
        assert!(matches!(err, ClientError::MalformedBatch(_)));
    }

    #[tokio::test]
    async fn test_submit_batch_posts_vitals_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/publish-vitals"))
            .and(body_partial_json(serde_json::json!({
                "device_id": "test-device",
                "vitals": [
                    { "heart_rate": 71.0, "blood_oxygen": 96.0, "temperature": 36.6 },
                    { "heart_rate": 74.0, "blood_oxygen": 97.0, "temperature": 36.9 },
                ],
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let raw = r#"[
            { "heart_rate": 71.0, "blood_oxygen": 96.0, "temperature": 36.6 },
            { "heart_rate": 74.0, "blood_oxygen": 97.0, "temperature": 36.9 }
        ]"#;

        let client = VitalsClient::new(server.uri(), "test-device");
        assert_eq!(client.submit_batch(raw).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_fetch_decodes_envelope_and_query() {
        let server = MockServer::start().await;
        let inner = serde_json::json!({
            "vitals_history": [{
                "timestamp": "2025-04-12T08:00:00Z",
                "heart_rate": 72.0,
                "blood_oxygen": 97.5,
                "temperature": 36.8
            }],
            "sagemaker_prediction": 0.82,
            "bedrock_summary": "oxygen trending down"
        });
        Mock::given(method("GET"))
            .and(path("/latest-vitals"))
            .and(query_param("device_id", "test-device"))
            .and(query_param("months_back", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "body": inner.to_string() })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let report = client.fetch_latest(3).await.unwrap();
        assert_eq!(report.vitals_history.len(), 1);
        assert_eq!(report.risk_score, Some(0.82));
        assert_eq!(report.summary.as_deref(), Some("oxygen trending down"));
    }

    #[tokio::test]
    async fn test_fetch_invalid_inner_is_envelope_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest-vitals"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "body": "{not valid json" })),
            )
            .mount(&server)
            .await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let err = client.fetch_latest(3).await.unwrap_err();
        assert!(matches!(err, ClientError::EnvelopeDecode(_)));
    }

    #[tokio::test]
    async fn test_fetch_404_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest-vitals"))
            .respond_with(ResponseTemplate::new(404).set_body_string("\"No vitals found.\""))
            .mount(&server)
            .await;

        let client = VitalsClient::new(server.uri(), "test-device");
        let err = client.fetch_latest(3).await.unwrap_err();
        assert!(matches!(err, ClientError::Fetch(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = VitalsClient::new("https://api.example.com/prod/", "d");
        assert_eq!(client.base_url(), "https://api.example.com/prod");
    }
}
