//! Session Store Port - Interface for persisting the wizard session.
//!
//! The wizard keeps exactly one session per storage key. Adapters decide
//! where the JSON snapshot lives (file, memory, browser storage bridge).

use async_trait::async_trait;

use crate::domain::wizard::{SessionSnapshot, StoredSession};

/// Errors that can occur during session storage operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize session: {0}")]
    Serialization(String),

    #[error("Stored session is corrupt: {0}")]
    Corrupt(String),

    #[error("Session storage unavailable: {0}")]
    Unavailable(String),
}

/// Port for persisting and loading the wizard session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the stored session
    ///
    /// # Returns
    /// `None` when nothing has been stored yet
    ///
    /// # Errors
    /// Returns `SessionStoreError::Corrupt` if the stored payload is not a
    /// JSON object, or an IO error if it cannot be read
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError>;

    /// Save a snapshot, replacing any previous one
    ///
    /// # Errors
    /// Returns `SessionStoreError` if save fails
    async fn save(&self, snapshot: &SessionSnapshot) -> Result<(), SessionStoreError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), SessionStoreError>;
}
