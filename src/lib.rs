// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # carelink-monitor
//!
//! A terminal dashboard and library for the CareLink remote health
//! monitoring API.
//!
//! This crate submits vital-sign readings (heart rate, blood oxygen,
//! temperature) to the CareLink publish endpoint and fetches the service's
//! precomputed analysis: a vitals history, an instability risk score from
//! the external model, and a narrative summary. Results are rendered as a
//! risk gauge, a summary panel, and a time-series chart in an interactive
//! terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ client  │◀── VitalsClient + background worker (tokio)   │
//! │  │ (HTTP)  │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, request lifecycle,
//!   and response intake
//! - **[`client`]**: The CareLink API boundary - publish and fetch with
//!   envelope normalization, plus the async worker the UI polls
//! - **[`data`]**: Data models and processing - samples, reports, risk
//!   classification, chart series derivation, and the soft display cache
//! - **[`ui`]**: Terminal rendering using ratatui - dashboard, submit
//!   form, history table, and theme support
//!
//! ## Features
//!
//! - **Dashboard view**: Risk gauge, latest vitals, AI summary, and chart
//! - **Submit view**: Manual single-reading entry and batch JSON publish
//! - **History view**: Full fetched history as a scrollable table
//! - **Soft cache**: The last summary and history seed the display across
//!   restarts until the first live fetch
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard against an API origin
//! carelink-monitor --base-url https://api.example.com/prod
//!
//! # One-shot fetch, printed as JSON
//! carelink-monitor --base-url https://api.example.com/prod --fetch
//!
//! # Publish a batch of readings from a file
//! carelink-monitor --base-url https://api.example.com/prod \
//!     --submit-file readings.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use carelink_monitor::{VitalsClient, VitalsReading};
//!
//! # async fn run() -> Result<(), carelink_monitor::ClientError> {
//! let client = VitalsClient::new("https://api.example.com/prod", "ward-7-bed-3");
//!
//! client
//!     .submit(&VitalsReading {
//!         heart_rate: 72.0,
//!         blood_oxygen: 97.5,
//!         temperature: 36.8,
//!         timestamp: None,
//!     })
//!     .await?;
//!
//! let report = client.fetch_latest(3).await?;
//! if let Some(level) = report.risk_level() {
//!     println!("risk: {}", level.label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod client;
pub mod data;
pub mod events;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, RequestState, View};
pub use client::{ClientError, ClientHandle, ResponseFeed, VitalsClient};
pub use data::{RiskLevel, SoftCache, VitalSeries, VitalsReading, VitalsReport, VitalsSample};
pub use ui::Theme;
