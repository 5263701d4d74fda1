//! In-Memory Session Store Adapter
//!
//! Keeps the serialized session in memory. Useful for testing and for
//! running the wizard without touching disk. Tests can seed raw payloads
//! (including corrupt ones) and make reads or writes fail.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::wizard::{SessionSnapshot, StoredSession};
use crate::ports::{SessionStore, SessionStoreError};

/// In-memory storage for the wizard session
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    raw: Arc<RwLock<Option<String>>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    save_count: Arc<AtomicUsize>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a raw payload
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(RwLock::new(Some(raw.into()))),
            ..Self::default()
        }
    }

    /// Make every subsequent load fail with an IO error
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Make every subsequent save fail (simulates a full or blocked store)
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Raw stored payload, if any
    pub async fn raw(&self) -> Option<String> {
        self.raw.read().await.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SessionStoreError::Io("reads disabled".to_string()));
        }
        let raw = self.raw.read().await;
        match raw.as_deref() {
            None => Ok(None),
            Some(raw) => StoredSession::parse(raw)
                .map(Some)
                .map_err(|e| SessionStoreError::Corrupt(e.to_string())),
        }
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SessionStoreError::Unavailable("writes disabled".to_string()));
        }
        let json = snapshot
            .to_json()
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        *self.raw.write().await = Some(json);
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.raw.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::WizardSession;

    #[tokio::test]
    async fn empty_store_loads_none() {
        let store = InMemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_and_load() {
        let store = InMemorySessionStore::new();
        let mut session = WizardSession::new(9);
        session.advance();

        store.save(&SessionSnapshot::capture(&session)).await.unwrap();

        assert_eq!(store.save_count(), 1);
        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.current_step, Some(2));
    }

    #[tokio::test]
    async fn corrupt_payload_is_reported() {
        let store = InMemorySessionStore::with_raw("not json");
        assert!(matches!(store.load().await, Err(SessionStoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn failing_reads() {
        let store = InMemorySessionStore::with_raw("{}");
        store.fail_reads();
        assert!(matches!(store.load().await, Err(SessionStoreError::Io(_))));
    }

    #[tokio::test]
    async fn failing_writes() {
        let store = InMemorySessionStore::new();
        store.fail_writes();
        let snapshot = SessionSnapshot::capture(&WizardSession::new(9));
        assert!(store.save(&snapshot).await.is_err());
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn clear_drops_payload() {
        let store = InMemorySessionStore::with_raw("{}");
        store.clear().await.unwrap();
        assert!(store.raw().await.is_none());
    }
}
