//! Upstream client error types.
//!
//! Every variant is recoverable: the collector logs it and skips the affected
//! product or release cycle.

use thiserror::Error;

/// Errors that can occur while talking to the endoflife.date API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS or body transfer failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request did not complete within the per-request timeout.
    #[error("request timed out")]
    Timeout,

    /// Upstream answered with a non-200 status.
    #[error("upstream returned non-OK status: {status} {reason}")]
    Status { status: u16, reason: String },

    /// Response body is not the expected JSON envelope.
    #[error("failed to decode upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL cannot be used to build request paths.
    #[error("invalid upstream url: {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// Whether the failure happened below HTTP (network, TLS, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}
