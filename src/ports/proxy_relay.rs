//! Proxy Relay Port - Interface for reaching the SALIC dataset.
//!
//! The dataset does not serve browser-friendly CORS headers, so every query
//! goes through a public relay. Relays differ in URL shape and in how they
//! wrap the response body; each implementation hides one relay's quirks and
//! hands back the dataset's own JSON payload.

use async_trait::async_trait;
use serde_json::Value;

/// Port for one CORS relay.
#[async_trait]
pub trait ProxyRelay: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Fetches `target_url` through the relay and returns the unwrapped
    /// dataset payload.
    async fn fetch(&self, target_url: &str) -> Result<Value, ProxyError>;
}

/// Errors from a single relay attempt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    /// Transport failure (DNS, connection refused, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// Relay answered with a non-success status.
    #[error("relay returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not the JSON the relay promises.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request exceeded the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl ProxyError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }
}
