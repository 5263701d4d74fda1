//! SALIC dataset client.
//!
//! Queries go through an ordered list of relays; the first relay that
//! returns a usable payload wins and the payload is cached by URL. Projects
//! shown to the user are remembered by identifier so they can be reopened
//! later without the network.
//!
//! # Example
//!
//! ```ignore
//! let client = SalicClient::new(SalicClient::DEFAULT_BASE_URL, proxies)
//!     .with_cache_ttl(Duration::from_secs(300))
//!     .with_display_limit(5);
//!
//! let projects = client.search_diversified().await;
//! let again = client.lookup_by_id(&projects[0].id).await?;
//! ```

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::ProjectId;
use crate::domain::salic::{
    extract_records, lookup_pages, normalize_project, QueryFilters, ReferenceProject,
    SalicStatistics, SearchPolicy,
};
use crate::ports::{ProxyAttempt, ProxyRelay, ReferenceCatalog, SalicError};

use super::query_cache::QueryCache;
use super::recently_displayed::RecentlyDisplayed;

/// Client for the SALIC projects endpoint.
pub struct SalicClient {
    base_url: String,
    proxies: Vec<Arc<dyn ProxyRelay>>,
    cache: QueryCache,
    displayed: RecentlyDisplayed,
    policy: SearchPolicy,
    display_limit: usize,
}

impl SalicClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.salic.cultura.gov.br/api/v1";
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);
    pub const DEFAULT_DISPLAY_LIMIT: usize = 5;

    /// Creates a client trying `proxies` in the given order.
    pub fn new(base_url: impl Into<String>, proxies: Vec<Arc<dyn ProxyRelay>>) -> Self {
        Self {
            base_url: base_url.into(),
            proxies,
            cache: QueryCache::new(Self::DEFAULT_CACHE_TTL),
            displayed: RecentlyDisplayed::new(),
            policy: SearchPolicy::random(),
            display_limit: Self::DEFAULT_DISPLAY_LIMIT,
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache = QueryCache::new(ttl);
        self
    }

    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_display_limit(mut self, limit: usize) -> Self {
        self.display_limit = limit;
        self
    }

    /// Request URL for a set of filters: `format=json` first, then the
    /// filters that are set.
    pub fn build_url(&self, filters: &QueryFilters) -> Result<String, SalicError> {
        let endpoint = format!("{}/projetos", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&endpoint)
            .map_err(|e| SalicError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("format", "json");
            for (key, value) in filters.params() {
                pairs.append_pair(key, &value);
            }
        }
        Ok(url.to_string())
    }

    /// Runs one query and normalizes the records it returns.
    ///
    /// # Errors
    /// Returns `SalicError::AllProxiesFailed` when no relay produced a
    /// usable payload. A payload without a recognizable record list is an
    /// empty result, not an error.
    pub async fn query(&self, filters: &QueryFilters) -> Result<Vec<ReferenceProject>, SalicError> {
        let url = self.build_url(filters)?;
        let payload = self.fetch_payload(&url).await?;
        Ok(extract_records(&payload).iter().map(normalize_project).collect())
    }

    async fn fetch_payload(&self, url: &str) -> Result<Value, SalicError> {
        if let Some(payload) = self.cache.get(url).await {
            tracing::debug!(url, "SALIC cache hit");
            return Ok(payload);
        }

        let mut attempts = Vec::with_capacity(self.proxies.len());
        for proxy in &self.proxies {
            match proxy.fetch(url).await {
                Ok(payload) => {
                    tracing::debug!(url, proxy = proxy.name(), "SALIC payload fetched");
                    self.cache.insert(url, payload.clone()).await;
                    return Ok(payload);
                }
                Err(error) => {
                    tracing::warn!(url, proxy = proxy.name(), error = %error, "SALIC proxy attempt failed");
                    attempts.push(ProxyAttempt {
                        proxy: proxy.name().to_string(),
                        error,
                    });
                }
            }
        }

        Err(SalicError::AllProxiesFailed { attempts })
    }

    /// Number of cached payloads.
    pub async fn cached_queries(&self) -> usize {
        self.cache.len().await
    }

    /// Number of projects reachable without the network.
    pub async fn displayed_count(&self) -> usize {
        self.displayed.len().await
    }
}

#[async_trait]
impl ReferenceCatalog for SalicClient {
    async fn search_diversified(&self) -> Vec<ReferenceProject> {
        for strategy in self.policy.strategies() {
            match self.query(&strategy.filters).await {
                Ok(mut projects) if !projects.is_empty() => {
                    self.policy.shuffle(&mut projects);
                    projects.truncate(self.display_limit);
                    self.displayed.insert_all(&projects).await;
                    tracing::info!(
                        strategy = strategy.name,
                        count = projects.len(),
                        "SALIC diversified search succeeded"
                    );
                    return projects;
                }
                Ok(_) => {
                    tracing::debug!(strategy = strategy.name, "SALIC strategy returned no projects");
                }
                Err(error) => {
                    tracing::warn!(strategy = strategy.name, error = %error, "SALIC strategy failed");
                }
            }
        }

        tracing::warn!("SALIC diversified search found nothing");
        Vec::new()
    }

    async fn lookup_by_id(&self, id: &ProjectId) -> Result<Option<ReferenceProject>, SalicError> {
        if let Some(project) = self.displayed.get(id).await {
            tracing::debug!(id = %id, "project found among displayed projects");
            return Ok(Some(project));
        }

        let mut answered = false;
        let mut last_error = None;
        for page in lookup_pages() {
            match self.query(&page).await {
                Ok(projects) => {
                    answered = true;
                    if let Some(project) = projects.into_iter().find(|p| &p.id == id) {
                        self.displayed.insert(project.clone()).await;
                        return Ok(Some(project));
                    }
                }
                Err(error) => {
                    tracing::warn!(id = %id, error = %error, "SALIC lookup page failed");
                    last_error = Some(error);
                }
            }
        }

        match last_error {
            Some(error) if !answered => Err(error),
            _ => {
                tracing::info!(id = %id, "project not found in lookup pages");
                Ok(None)
            }
        }
    }

    async fn statistics(&self) -> SalicStatistics {
        SalicStatistics::from_sample(&self.search_diversified().await)
    }

    async fn reset(&self) {
        self.cache.clear().await;
        self.displayed.clear().await;
    }
}
