//! Wizard flow configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Wizard flow and session storage settings
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Number of steps in the flow
    #[serde(default = "default_total_steps")]
    pub total_steps: u32,

    /// Directory holding the stored session
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,

    /// Storage key (file name without extension)
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Minimum characters for the project idea
    #[serde(default = "default_idea_min_length")]
    pub idea_min_length: usize,

    /// Delay before the consultant answers a chat message
    #[serde(default = "default_chat_reply_delay_ms")]
    pub chat_reply_delay_ms: u64,
}

impl WizardConfig {
    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.total_steps == 0 {
            return Err(ValidationError::InvalidTotalSteps);
        }
        if self.storage_key.trim().is_empty() {
            return Err(ValidationError::MissingRequired("wizard.storage_key"));
        }
        Ok(())
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            total_steps: default_total_steps(),
            storage_dir: default_storage_dir(),
            storage_key: default_storage_key(),
            idea_min_length: default_idea_min_length(),
            chat_reply_delay_ms: default_chat_reply_delay_ms(),
        }
    }
}

fn default_total_steps() -> u32 {
    9
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_storage_key() -> String {
    "ona-progress".to_string()
}

fn default_idea_min_length() -> usize {
    50
}

fn default_chat_reply_delay_ms() -> u64 {
    1500
}
