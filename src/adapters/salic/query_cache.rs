//! Time-boxed cache of dataset payloads, keyed by the full request URL.

use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct CachedPayload {
    payload: Value,
    stored_at: Instant,
}

/// Payload cache with a fixed time-to-live.
///
/// Entries older than the TTL are treated as absent and dropped on the next
/// lookup. A zero TTL disables caching.
#[derive(Debug)]
pub struct QueryCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, CachedPayload>>,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh payload for a URL, if any.
    pub async fn get(&self, url: &str) -> Option<Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(url) {
                None => return None,
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Some(entry.payload.clone())
                }
                Some(_) => {}
            }
        }
        self.entries.write().await.remove(url);
        None
    }

    pub async fn insert(&self, url: impl Into<String>, payload: Value) {
        self.entries.write().await.insert(
            url.into(),
            CachedPayload {
                payload,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
