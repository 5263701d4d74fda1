//! Consultive chat messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Greeting shown when the chat step opens on an empty history.
pub const CHAT_GREETING: &str = "💬 Chat Consultivo Ativado! Como posso ajudar?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }

    /// Canned consultant reply to a user message.
    pub fn reply_to(message: &str) -> Self {
        let excerpt: String = message.chars().take(30).collect();
        Self::assistant(format!("Sobre \"{}...\", recomendo focar em...", excerpt))
    }
}
