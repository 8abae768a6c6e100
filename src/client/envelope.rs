//! Wire format of the latest-vitals response.
//!
//! The endpoint wraps its payload twice: the HTTP body is JSON holding a
//! single `body` field whose value is itself a JSON-encoded string, and
//! that inner string decodes to the report fields. Two generations of
//! field names exist for the model outputs; both are accepted here and
//! normalized into one [`VitalsReport`] at the boundary.

use serde::Deserialize;

use super::error::ClientError;
use crate::data::{VitalsReport, VitalsSample};

/// Outer envelope: `{"body": "<JSON-encoded string>"}`.
#[derive(Debug, Deserialize)]
struct Envelope {
    body: String,
}

/// Inner payload.
///
/// `sagemaker_prediction` and `bedrock_summary` are the canonical names
/// (what the producing endpoint emits); the aliases come from older
/// deployments and map to the same fields.
#[derive(Debug, Deserialize)]
struct RawReport {
    #[serde(default)]
    vitals_history: Vec<VitalsSample>,

    #[serde(default, alias = "prediction_probability")]
    sagemaker_prediction: Option<f64>,

    #[serde(default, alias = "alert_summary")]
    bedrock_summary: Option<String>,
}

/// Decode the double-encoded envelope into a normalized report.
///
/// Fails with [`ClientError::EnvelopeDecode`] if either decode fails. A
/// missing score or summary is not an error; it normalizes to `None`.
pub(crate) fn decode_report(outer: &str) -> Result<VitalsReport, ClientError> {
    let envelope: Envelope = serde_json::from_str(outer).map_err(ClientError::EnvelopeDecode)?;
    let raw: RawReport =
        serde_json::from_str(&envelope.body).map_err(ClientError::EnvelopeDecode)?;

    Ok(VitalsReport {
        vitals_history: raw.vitals_history,
        risk_score: raw.sagemaker_prediction,
        summary: raw.bedrock_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Wrap an inner JSON document in the double-encoded envelope.
    fn envelope(inner: &serde_json::Value) -> String {
        serde_json::json!({ "body": inner.to_string() }).to_string()
    }

    fn inner_history() -> serde_json::Value {
        serde_json::json!([{
            "timestamp": "2025-04-12T08:00:00Z",
            "heart_rate": 72.0,
            "blood_oxygen": 97.5,
            "temperature": 36.8
        }])
    }

    #[test]
    fn test_decode_canonical_fields() {
        let outer = envelope(&serde_json::json!({
            "vitals_history": inner_history(),
            "sagemaker_prediction": 0.82,
            "bedrock_summary": "oxygen trending down"
        }));

        let report = decode_report(&outer).unwrap();
        assert_eq!(report.vitals_history.len(), 1);
        assert_eq!(report.risk_score, Some(0.82));
        assert_eq!(report.summary.as_deref(), Some("oxygen trending down"));
    }

    #[test]
    fn test_decode_superseded_field_names() {
        let outer = envelope(&serde_json::json!({
            "vitals_history": inner_history(),
            "prediction_probability": 0.82,
            "alert_summary": "oxygen trending down"
        }));

        let report = decode_report(&outer).unwrap();
        assert_eq!(report.risk_score, Some(0.82));
        assert_eq!(report.summary.as_deref(), Some("oxygen trending down"));
    }

    #[test]
    fn test_missing_score_is_none_not_zero() {
        let outer = envelope(&serde_json::json!({
            "vitals_history": inner_history(),
            "bedrock_summary": "no prediction available"
        }));

        let report = decode_report(&outer).unwrap();
        assert_eq!(report.risk_score, None);
    }

    #[test]
    fn test_missing_history_is_empty() {
        let outer = envelope(&serde_json::json!({ "sagemaker_prediction": 0.1 }));
        let report = decode_report(&outer).unwrap();
        assert!(report.vitals_history.is_empty());
    }

    #[test]
    fn test_invalid_outer_body() {
        let err = decode_report("{not valid json").unwrap_err();
        assert!(matches!(err, ClientError::EnvelopeDecode(_)));
    }

    #[test]
    fn test_valid_outer_invalid_inner() {
        let outer = serde_json::json!({ "body": "{not valid json" }).to_string();
        let err = decode_report(&outer).unwrap_err();
        assert!(matches!(err, ClientError::EnvelopeDecode(_)));
    }

    #[test]
    fn test_outer_without_body_field() {
        let err = decode_report(r#"{"statusCode": 200}"#).unwrap_err();
        assert!(matches!(err, ClientError::EnvelopeDecode(_)));
    }
}
