//! Vitals data models and risk classification.
//!
//! This module holds the domain types shared by the client and the UI:
//! samples and reports as fetched from the API, outbound readings for
//! submission, and the risk level derived from the external model's score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scores below this threshold classify as [`RiskLevel::Stable`].
pub const STABLE_BELOW: f64 = 0.4;

/// Scores below this threshold (and at or above [`STABLE_BELOW`]) classify
/// as [`RiskLevel::Caution`]; everything else is [`RiskLevel::Critical`].
pub const CAUTION_BELOW: f64 = 0.7;

/// One timestamped observation of the three monitored vital signs.
///
/// Samples are immutable once received; they are produced by the API's
/// history payload or by operator input before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsSample {
    pub timestamp: DateTime<Utc>,

    /// Heart rate in beats per minute.
    pub heart_rate: f64,

    /// Blood oxygen saturation in percent (0-100).
    pub blood_oxygen: f64,

    /// Body temperature in degrees Celsius.
    pub temperature: f64,
}

/// An outbound reading for the publish endpoint.
///
/// The timestamp is optional on the wire; the ingestion side fills in a
/// server-side timestamp when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsReading {
    pub heart_rate: f64,
    pub blood_oxygen: f64,
    pub temperature: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl VitalsReading {
    /// True when every numeric field is a finite float.
    ///
    /// Readings must pass this check before any network call is attempted.
    pub fn is_finite(&self) -> bool {
        self.heart_rate.is_finite() && self.blood_oxygen.is_finite() && self.temperature.is_finite()
    }
}

/// The normalized result of a fetch.
///
/// A report is replaced wholesale by the next successful fetch and left
/// untouched by a failed one. `risk_score` is `None` when the payload omits
/// it; absence means "unknown", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VitalsReport {
    /// Chronological history of samples; may be empty.
    pub vitals_history: Vec<VitalsSample>,

    /// The external model's instability probability in [0, 1].
    pub risk_score: Option<f64>,

    /// Free-form narrative summary; unbounded, truncated at display time.
    pub summary: Option<String>,
}

impl VitalsReport {
    /// The most recent sample in the history, if any.
    pub fn latest(&self) -> Option<&VitalsSample> {
        self.vitals_history.last()
    }

    /// The risk level for this report's score.
    ///
    /// `None` when the score is absent; callers branch on presence and
    /// render no classification in that case.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.risk_score.map(RiskLevel::classify)
    }
}

/// Patient risk level derived from the model's instability probability.
///
/// Derived on every render from the held report, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Stable,
    Caution,
    Critical,
}

impl RiskLevel {
    /// Classify a score against the fixed thresholds.
    pub fn classify(score: f64) -> Self {
        if score < STABLE_BELOW {
            RiskLevel::Stable
        } else if score < CAUTION_BELOW {
            RiskLevel::Caution
        } else {
            RiskLevel::Critical
        }
    }

    /// Returns the display label for this level.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Stable => "Stable",
            RiskLevel::Caution => "Caution",
            RiskLevel::Critical => "Critical",
        }
    }
}

/// Format a risk score for display.
///
/// Three decimal places, the probability convention, used consistently
/// across the report panel and the gauge.
pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(hour: u32) -> VitalsSample {
        VitalsSample {
            timestamp: Utc.with_ymd_and_hms(2025, 4, 12, hour, 0, 0).unwrap(),
            heart_rate: 72.0,
            blood_oxygen: 97.5,
            temperature: 36.8,
        }
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(RiskLevel::classify(0.0), RiskLevel::Stable);
        assert_eq!(RiskLevel::classify(0.39), RiskLevel::Stable);
        assert_eq!(RiskLevel::classify(0.4), RiskLevel::Caution);
        assert_eq!(RiskLevel::classify(0.69), RiskLevel::Caution);
        assert_eq!(RiskLevel::classify(0.7), RiskLevel::Critical);
        assert_eq!(RiskLevel::classify(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Stable < RiskLevel::Caution);
        assert!(RiskLevel::Caution < RiskLevel::Critical);
    }

    #[test]
    fn test_missing_score_yields_no_level() {
        let report = VitalsReport {
            vitals_history: vec![sample(8)],
            risk_score: None,
            summary: Some("within normal limits".to_string()),
        };
        assert!(report.risk_level().is_none());

        // A zero score is a real classification, distinct from absence
        let report = VitalsReport {
            risk_score: Some(0.0),
            ..report
        };
        assert_eq!(report.risk_level(), Some(RiskLevel::Stable));
    }

    #[test]
    fn test_latest_is_last_in_history() {
        let report = VitalsReport {
            vitals_history: vec![sample(8), sample(9), sample(10)],
            risk_score: None,
            summary: None,
        };
        assert_eq!(report.latest().unwrap().timestamp, sample(10).timestamp);

        let empty = VitalsReport::default();
        assert!(empty.latest().is_none());
    }

    #[test]
    fn test_reading_finite_check() {
        let reading = VitalsReading {
            heart_rate: 72.0,
            blood_oxygen: 97.5,
            temperature: 36.8,
            timestamp: None,
        };
        assert!(reading.is_finite());

        let reading = VitalsReading {
            heart_rate: f64::NAN,
            ..reading
        };
        assert!(!reading.is_finite());

        let reading = VitalsReading {
            heart_rate: 72.0,
            temperature: f64::INFINITY,
            ..reading
        };
        assert!(!reading.is_finite());
    }

    #[test]
    fn test_format_score_three_decimals() {
        assert_eq!(format_score(0.51234), "0.512");
        assert_eq!(format_score(0.7), "0.700");
        assert_eq!(format_score(0.0), "0.000");
    }

    #[test]
    fn test_reading_omits_absent_timestamp() {
        let reading = VitalsReading {
            heart_rate: 72.0,
            blood_oxygen: 97.5,
            temperature: 36.8,
            timestamp: None,
        };
        let json = serde_json::to_value(&reading).unwrap();
        assert!(json.get("timestamp").is_none());
    }
}
