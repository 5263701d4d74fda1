//! Shared HTTP plumbing for the public CORS relays.
//!
//! Every relay takes the target URL percent-encoded and appended to a
//! prefix. What differs is the body envelope, which the relay types
//! ([`super::PassthroughProxy`], [`super::AllOriginsProxy`]) unwrap.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::ProxyError;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Address and credentials of one relay.
#[derive(Clone)]
pub struct RelayEndpoint {
    name: String,
    prefix: String,
    api_key: Option<(String, Secret<String>)>,
    client: Client,
    timeout: Duration,
}

impl RelayEndpoint {
    pub fn new(name: impl Into<String>, prefix: impl Into<String>, client: Client) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            api_key: None,
            client,
            timeout: Duration::from_secs(15),
        }
    }

    /// Sends an API key header with every request.
    pub fn with_api_key(mut self, header: impl Into<String>, key: Secret<String>) -> Self {
        self.api_key = Some((header.into(), key));
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Relay URL for a target.
    pub fn proxied_url(&self, target_url: &str) -> String {
        format!("{}{}", self.prefix, urlencoding::encode(target_url))
    }

    /// GETs the target through the relay and returns the raw body.
    pub async fn get_body(&self, target_url: &str) -> Result<String, ProxyError> {
        let mut request = self
            .client
            .get(self.proxied_url(target_url))
            .timeout(self.timeout)
            .header(ACCEPT, JSON_UTF8)
            .header(CONTENT_TYPE, JSON_UTF8);
        if let Some((header, key)) = &self.api_key {
            request = request.header(header.as_str(), key.expose_secret().as_str());
        }

        let response = request.send().await.map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::status(status.as_u16()));
        }

        response.text().await.map_err(|e| self.map_error(e))
    }

    fn map_error(&self, e: reqwest::Error) -> ProxyError {
        if e.is_timeout() {
            ProxyError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if e.is_connect() {
            ProxyError::network(format!("Connection failed: {}", e))
        } else {
            ProxyError::network(e.to_string())
        }
    }
}

impl std::fmt::Debug for RelayEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayEndpoint")
            .field("name", &self.name)
            .field("prefix", &self.prefix)
            .field("has_api_key", &self.api_key.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
