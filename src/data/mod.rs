//! Data models and processing for vitals reports.
//!
//! This module turns fetched payloads into structured, display-ready data.
//!
//! ## Submodules
//!
//! - [`vitals`]: Core data models ([`VitalsSample`], [`VitalsReport`],
//!   [`RiskLevel`] classification)
//! - [`series`]: Chart series derivation ([`VitalSeries`])
//! - [`cache`]: Soft display cache across restarts ([`SoftCache`])
//!
//! ## Data Flow
//!
//! ```text
//! latest-vitals envelope (double-encoded JSON)
//!        │
//!        ▼
//! VitalsReport (normalized at the client boundary)
//!        │
//!        ├──▶ RiskLevel::classify() (on every render)
//!        │
//!        ├──▶ VitalSeries::build()  (for the chart)
//!        │
//!        └──▶ SoftCache::store()    (display seed for the next start)
//! ```

pub mod cache;
pub mod series;
pub mod vitals;

pub use cache::{SoftCache, DEFAULT_CACHE_FILE};
pub use series::VitalSeries;
pub use vitals::{format_score, RiskLevel, VitalsReading, VitalsReport, VitalsSample};
