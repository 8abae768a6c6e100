//! Chart series derivation from a vitals history.
//!
//! Transforms a time-ordered list of samples into the parallel sequences
//! the chart widgets consume: one label per sample plus one value sequence
//! per vital sign, all in source order.

use chrono::Local;

use super::vitals::VitalsSample;

/// Timestamp format used for chart labels (operator-local time).
const LABEL_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parallel per-field sequences derived from a vitals history.
///
/// Every vector has the same length and order as the source history, so
/// `labels[i]` names the sample that produced `heart_rate[i]`,
/// `blood_oxygen[i]`, and `temperature[i]`. There is no aggregation,
/// resampling, or gap filling: a gap in the source data appears as a gap
/// in the rendered series.
#[derive(Debug, Clone, PartialEq)]
pub struct VitalSeries {
    /// Human-readable local timestamps, one per sample.
    pub labels: Vec<String>,
    pub heart_rate: Vec<f64>,
    pub blood_oxygen: Vec<f64>,
    pub temperature: Vec<f64>,
}

impl VitalSeries {
    /// Build chart series from a history.
    ///
    /// Returns `None` when the history is empty; callers must not render
    /// a chart in that case.
    pub fn build(history: &[VitalsSample]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }

        Some(Self {
            labels: history
                .iter()
                .map(|s| s.timestamp.with_timezone(&Local).format(LABEL_FORMAT).to_string())
                .collect(),
            heart_rate: history.iter().map(|s| s.heart_rate).collect(),
            blood_oxygen: history.iter().map(|s| s.blood_oxygen).collect(),
            temperature: history.iter().map(|s| s.temperature).collect(),
        })
    }

    /// Number of samples in the series.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Pair a field's values with their sample indices for plotting.
    pub fn points(values: &[f64]) -> Vec<(f64, f64)> {
        values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
    }

    /// The (min, max) value across all three fields.
    ///
    /// The chart shares one value axis between the fields, as the source
    /// dashboard does, so the bounds span all of them.
    pub fn value_bounds(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in
            self.heart_rate.iter().chain(self.blood_oxygen.iter()).chain(self.temperature.iter())
        {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample(hour: u32, heart_rate: f64) -> VitalsSample {
        VitalsSample {
            timestamp: Utc.with_ymd_and_hms(2025, 4, 12, hour, 30, 0).unwrap(),
            heart_rate,
            blood_oxygen: 97.0,
            temperature: 36.8,
        }
    }

    #[test]
    fn test_empty_history_builds_nothing() {
        assert!(VitalSeries::build(&[]).is_none());
    }

    #[test]
    fn test_single_sample_builds_four_length_one_sequences() {
        let series = VitalSeries::build(&[sample(8, 71.0)]).unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series.labels.len(), 1);
        assert_eq!(series.heart_rate, vec![71.0]);
        assert_eq!(series.blood_oxygen, vec![97.0]);
        assert_eq!(series.temperature, vec![36.8]);
    }

    #[test]
    fn test_order_is_preserved() {
        let history = vec![sample(8, 70.0), sample(9, 75.0), sample(10, 80.0)];
        let series = VitalSeries::build(&history).unwrap();

        assert_eq!(series.heart_rate, vec![70.0, 75.0, 80.0]);
        for (i, s) in history.iter().enumerate() {
            let expected = s.timestamp.with_timezone(&Local).format(LABEL_FORMAT).to_string();
            assert_eq!(series.labels[i], expected);
        }
    }

    #[test]
    fn test_points_index_values() {
        let points = VitalSeries::points(&[70.0, 75.0, 80.0]);
        assert_eq!(points, vec![(0.0, 70.0), (1.0, 75.0), (2.0, 80.0)]);
    }

    #[test]
    fn test_value_bounds_span_all_fields() {
        let series = VitalSeries::build(&[sample(8, 120.0), sample(9, 55.0)]).unwrap();
        let (min, max) = series.value_bounds();
        assert_eq!(min, 36.8);
        assert_eq!(max, 120.0);
    }
}
