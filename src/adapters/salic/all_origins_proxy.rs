//! Relay that wraps the dataset body in a JSON envelope (allorigins).
//!
//! The envelope looks like `{"contents": "<json text>", "status": {...}}`;
//! `contents` is itself JSON text and must be parsed a second time. An
//! envelope without `contents` is used as is.

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{ProxyError, ProxyRelay};

use super::http_proxy::RelayEndpoint;

#[derive(Debug, Clone)]
pub struct AllOriginsProxy {
    endpoint: RelayEndpoint,
}

impl AllOriginsProxy {
    pub fn new(endpoint: RelayEndpoint) -> Self {
        Self { endpoint }
    }
}

/// Unwraps an allorigins envelope.
pub fn unwrap_all_origins(body: &str) -> Result<Value, ProxyError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| ProxyError::parse(format!("Invalid JSON from relay: {}", e)))?;

    match envelope.get("contents") {
        Some(Value::String(contents)) if !contents.is_empty() => serde_json::from_str(contents)
            .map_err(|e| ProxyError::parse(format!("Invalid JSON in contents: {}", e))),
        _ => Ok(envelope),
    }
}

#[async_trait]
impl ProxyRelay for AllOriginsProxy {
    fn name(&self) -> &str {
        self.endpoint.name()
    }

    async fn fetch(&self, target_url: &str) -> Result<Value, ProxyError> {
        let body = self.endpoint.get_body(target_url).await?;
        unwrap_all_origins(&body)
    }
}
