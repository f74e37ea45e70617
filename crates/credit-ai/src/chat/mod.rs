//! Assistant chat backed by an external streaming chat-completion endpoint.

mod client;
mod stream;

use serde::{Deserialize, Serialize};

pub use client::{ChatClient, ChatError};
pub use stream::ChatStreamDecoder;

/// Opening assistant message for a new conversation.
pub const GREETING: &str = "Hi! I'm the CreditAI assistant. Ask me about credit scores, risk bands, or how to improve your score.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }

    pub fn greeting() -> Self {
        Self::assistant(GREETING)
    }
}
