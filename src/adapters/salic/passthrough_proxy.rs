//! Relay that returns the dataset body unchanged (thingproxy, cors.sh).

use async_trait::async_trait;
use serde_json::Value;

use crate::ports::{ProxyError, ProxyRelay};

use super::http_proxy::RelayEndpoint;

#[derive(Debug, Clone)]
pub struct PassthroughProxy {
    endpoint: RelayEndpoint,
}

impl PassthroughProxy {
    pub fn new(endpoint: RelayEndpoint) -> Self {
        Self { endpoint }
    }
}

/// Parses a passthrough body.
pub fn unwrap_passthrough(body: &str) -> Result<Value, ProxyError> {
    serde_json::from_str(body).map_err(|e| ProxyError::parse(format!("Invalid JSON from relay: {}", e)))
}

#[async_trait]
impl ProxyRelay for PassthroughProxy {
    fn name(&self) -> &str {
        self.endpoint.name()
    }

    async fn fetch(&self, target_url: &str) -> Result<Value, ProxyError> {
        let body = self.endpoint.get_body(target_url).await?;
        unwrap_passthrough(&body)
    }
}
