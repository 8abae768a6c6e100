//! Error taxonomy for the CareLink API client.

use thiserror::Error;

/// Errors produced by client operations.
///
/// None of these are retried automatically and none are fatal: callers
/// surface a generic notice to the operator, log the cause, and keep the
/// previous view state.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Batch text failed to deserialize into a vitals array. Raised before
    /// any network call is attempted.
    #[error("batch is not a valid vitals array: {0}")]
    MalformedBatch(#[source] serde_json::Error),

    /// A reading contains a NaN or infinite value. Raised before any
    /// network call is attempted.
    #[error("vitals readings must be finite numbers")]
    NonFiniteReading,

    /// Transport failure or non-2xx status on publish.
    #[error("publish request failed: {0}")]
    Submit(#[source] reqwest::Error),

    /// Transport failure or non-2xx status on fetch.
    #[error("fetch request failed: {0}")]
    Fetch(#[source] reqwest::Error),

    /// One of the two decodes of the response envelope failed.
    #[error("could not decode latest-vitals envelope: {0}")]
    EnvelopeDecode(#[source] serde_json::Error),
}
