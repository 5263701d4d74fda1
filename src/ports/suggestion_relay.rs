//! Suggestion Relay Port - Interface for the AI suggestion endpoint.
//!
//! The relay accepts free text and answers with a suggestion. It may answer
//! successfully with an `erro` field set, meaning it fell back to a canned
//! suggestion; callers treat that as a soft failure and still use the text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for the AI suggestion relay.
#[async_trait]
pub trait SuggestionRelay: Send + Sync {
    /// Sends `text` and returns the relay's suggestion.
    async fn suggest(&self, text: &str) -> Result<RelaySuggestion, RelayError>;
}

/// Request body sent to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayRequest<'a> {
    pub texto: &'a str,
}

/// Relay answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelaySuggestion {
    #[serde(rename = "sugestao")]
    pub suggestion: String,
    #[serde(rename = "fonte", default)]
    pub source: String,
    #[serde(rename = "modelo", default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(rename = "erro", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RelaySuggestion {
    pub fn new(suggestion: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            suggestion: suggestion.into(),
            source: source.into(),
            model: None,
            error: None,
        }
    }

    /// Marks the answer as a fallback produced after an upstream error.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// True when the relay fell back to a canned suggestion.
    pub fn is_soft_failure(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// Hard failures talking to the relay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("relay returned HTTP {status}")]
    Status { status: u16 },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl RelayError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
