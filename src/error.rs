//! Backend error taxonomy.

use thiserror::Error;

/// Failures talking to the backend of record.
///
/// Poll-path callers treat every variant as transient: log it, keep the
/// last-known-good state, and wait for the next tick.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },
}
