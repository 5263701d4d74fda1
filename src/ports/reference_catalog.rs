//! Reference Catalog Port - Interface for SALIC reference projects.
//!
//! The wizard shows a handful of funded projects as inspiration and lets the
//! user reopen any of them. The catalog hides how those projects are fetched
//! and cached.

use async_trait::async_trait;

use crate::domain::foundation::ProjectId;
use crate::domain::salic::{ReferenceProject, SalicStatistics};

use super::proxy_relay::ProxyError;

/// Port for browsing reference projects.
#[async_trait]
pub trait ReferenceCatalog: Send + Sync {
    /// A small, varied sample of projects. Returns an empty list when the
    /// dataset cannot be reached; never fails.
    ///
    /// Every returned project becomes retrievable through
    /// [`ReferenceCatalog::lookup_by_id`] without network access.
    async fn search_diversified(&self) -> Vec<ReferenceProject>;

    /// Finds a project by identifier.
    ///
    /// # Returns
    /// `Ok(None)` when the dataset answered but the project was not found
    ///
    /// # Errors
    /// Returns `SalicError` when the dataset could not be reached at all
    async fn lookup_by_id(&self, id: &ProjectId) -> Result<Option<ReferenceProject>, SalicError>;

    /// Summary figures over a fresh sample.
    async fn statistics(&self) -> SalicStatistics;

    /// Forgets cached payloads and displayed projects.
    async fn reset(&self);
}

/// One failed relay attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyAttempt {
    pub proxy: String,
    pub error: ProxyError,
}

/// Errors from the SALIC dataset client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SalicError {
    /// Every relay failed or returned unusable content.
    #[error("no SALIC proxy succeeded ({})", summarize(.attempts))]
    AllProxiesFailed { attempts: Vec<ProxyAttempt> },

    #[error("invalid dataset URL: {0}")]
    InvalidUrl(String),
}

fn summarize(attempts: &[ProxyAttempt]) -> String {
    if attempts.is_empty() {
        return "no proxies configured".to_string();
    }
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.proxy, a.error))
        .collect::<Vec<_>>()
        .join("; ")
}
