//! File-based Session Store Adapter
//!
//! Stores the wizard session as a single JSON file named after the storage
//! key, e.g. `./data/ona-progress.json`.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::wizard::{SessionSnapshot, StoredSession};
use crate::ports::{SessionStore, SessionStoreError};

/// File-based storage for the wizard session
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
    key: String,
}

impl FileSessionStore {
    /// Create a new file store
    ///
    /// # Arguments
    /// * `base_path` - Directory holding the session file
    /// * `key` - Storage key; the file is `<key>.json`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSessionStore::new("./data", "ona-progress");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Path of the session file
    pub fn file_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", self.key))
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let raw = match fs::read_to_string(self.file_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(SessionStoreError::Io(e.to_string())),
        };

        StoredSession::parse(&raw)
            .map(Some)
            .map_err(|e| SessionStoreError::Corrupt(e.to_string()))
    }

    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        let json = snapshot
            .to_json()
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        // Write to a temp file, then rename over the old one.
        let tmp_path = self.base_path.join(format!("{}.json.tmp", self.key));
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;
        fs::rename(&tmp_path, self.file_path())
            .await
            .map_err(|e| SessionStoreError::Io(e.to_string()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(self.file_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionStoreError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::wizard::WizardSession;
    use tempfile::TempDir;

    fn snapshot_at(step: u32) -> SessionSnapshot {
        let mut session = WizardSession::new(9);
        while session.current_step() < step {
            session.advance();
        }
        session.project_data.idea = "Orquestra jovem comunitária".into();
        SessionSnapshot::capture(&session)
    }

    #[tokio::test]
    async fn load_returns_none_when_nothing_saved() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), "ona-progress");

        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested"), "ona-progress");

        store.save(&snapshot_at(4)).await.unwrap();
        assert!(store.file_path().exists());

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.current_step, Some(4));
    }

    #[tokio::test]
    async fn save_replaces_previous_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), "ona-progress");

        store.save(&snapshot_at(2)).await.unwrap();
        store.save(&snapshot_at(5)).await.unwrap();

        let stored = store.load().await.unwrap().unwrap();
        assert_eq!(stored.current_step, Some(5));
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), "ona-progress");
        std::fs::write(store.file_path(), "{ nope").unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(SessionStoreError::Corrupt(_))));
    }

    #[tokio::test]
    async fn clear_removes_file_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path(), "ona-progress");

        store.save(&snapshot_at(3)).await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.file_path().exists());
        store.clear().await.unwrap();
    }
}
