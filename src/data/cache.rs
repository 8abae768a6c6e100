//! Soft display cache across process restarts.
//!
//! After each successful fetch the two most-recent string fields (the
//! summary text and the serialized vitals history) are written to a small
//! JSON file. On the next start they seed the display until the first live
//! fetch replaces them. The cache is never validated on read: missing,
//! unreadable, or unparseable contents are silently ignored.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::vitals::{VitalsReport, VitalsSample};

/// Default cache file name, relative to the working directory.
pub const DEFAULT_CACHE_FILE: &str = ".carelink-cache.json";

/// On-disk shape: the summary text plus the history as a JSON string.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheRecord {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    vitals_json: String,
}

/// File-backed store for the last fetched summary and history.
#[derive(Debug, Clone)]
pub struct SoftCache {
    path: PathBuf,
}

impl SoftCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store the display fields from a fetched report.
    ///
    /// Only the summary and the serialized history are kept; the risk score
    /// is not cached, so a cache-seeded view shows no classification.
    pub fn store(&self, report: &VitalsReport) -> Result<()> {
        let record = CacheRecord {
            summary: report.summary.clone().unwrap_or_default(),
            vitals_json: serde_json::to_string(&report.vitals_history)?,
        };
        fs::write(&self.path, serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// Load a display seed, if a usable one exists.
    ///
    /// Returns `None` when the file is missing or unreadable, when the
    /// record does not parse, or when it holds nothing worth showing. A
    /// history string that no longer parses is dropped without failing the
    /// rest of the record.
    pub fn load(&self) -> Option<VitalsReport> {
        let content = fs::read_to_string(&self.path).ok()?;
        let record: CacheRecord = serde_json::from_str(&content).ok()?;

        let vitals_history: Vec<VitalsSample> =
            serde_json::from_str(&record.vitals_json).unwrap_or_default();
        let summary = (!record.summary.is_empty()).then_some(record.summary);

        if vitals_history.is_empty() && summary.is_none() {
            return None;
        }

        Some(VitalsReport { vitals_history, risk_score: None, summary })
    }
}
