//! HTTP Suggestion Relay - Implementation of SuggestionRelay over HTTP.
//!
//! The relay is a small local service that forwards free text to an AI
//! search provider and answers with `{sugestao, fonte, modelo?, erro?}`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpRelayConfig::new("http://localhost:3000/consulta-perplexity")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let relay = HttpSuggestionRelay::new(config, reqwest::Client::new());
//! ```

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::ports::{RelayError, RelayRequest, RelaySuggestion, SuggestionRelay};

/// Configuration for the HTTP relay.
#[derive(Debug, Clone)]
pub struct HttpRelayConfig {
    /// Endpoint receiving `POST {texto}`.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpRelayConfig {
    pub const DEFAULT_URL: &'static str = "http://localhost:3000/consulta-perplexity";

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for HttpRelayConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_URL)
    }
}

/// Suggestion relay reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSuggestionRelay {
    config: HttpRelayConfig,
    client: Client,
}

impl HttpSuggestionRelay {
    pub fn new(config: HttpRelayConfig, client: Client) -> Self {
        Self { config, client }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn map_error(&self, e: reqwest::Error) -> RelayError {
        if e.is_timeout() {
            RelayError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            RelayError::network(format!("Connection failed: {}", e))
        } else {
            RelayError::network(e.to_string())
        }
    }
}

#[async_trait]
impl SuggestionRelay for HttpSuggestionRelay {
    async fn suggest(&self, text: &str) -> Result<RelaySuggestion, RelayError> {
        tracing::debug!(url = %self.config.url, chars = text.chars().count(), "sending text to relay");

        let response = self
            .client
            .post(&self.config.url)
            .timeout(self.config.timeout)
            .json(&RelayRequest { texto: text })
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_error(e))?;
        let suggestion = parse_suggestion(&body)?;

        if suggestion.is_soft_failure() {
            tracing::warn!(
                source = %suggestion.source,
                error = suggestion.error.as_deref().unwrap_or_default(),
                "relay answered with a fallback suggestion"
            );
        }
        Ok(suggestion)
    }
}

/// Parses a relay answer body.
pub fn parse_suggestion(body: &str) -> Result<RelaySuggestion, RelayError> {
    serde_json::from_str(body).map_err(|e| RelayError::parse(e.to_string()))
}
