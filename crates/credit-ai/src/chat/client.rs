use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, warn};

use super::stream::ChatStreamDecoder;
use super::ChatMessage;
use crate::config::ChatConfig;

/// Client for the streaming chat-completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

impl ChatClient {
    /// Build a client for `config`, or `None` when no endpoint is configured.
    pub fn from_config(config: &ChatConfig) -> Result<Option<Self>, ChatError> {
        let Some(endpoint) = config.endpoint.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ChatError::Transport)?;

        Ok(Some(Self {
            http,
            endpoint,
            api_key: config.api_key.clone(),
        }))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the conversation and stream the assistant reply, invoking `on_delta` for every content
    /// fragment as it arrives. Returns the assembled reply.
    pub async fn stream_reply<F>(
        &self,
        messages: &[ChatMessage],
        mut on_delta: F,
    ) -> Result<String, ChatError>
    where
        F: FnMut(&str),
    {
        let mut request = self.http.post(&self.endpoint).json(&ChatRequest { messages });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let mut response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::from_status(status));
        }

        let mut decoder = ChatStreamDecoder::new();
        let mut reply = String::new();
        while let Some(chunk) = response.chunk().await? {
            for delta in decoder.push(&chunk) {
                on_delta(&delta);
                reply.push_str(&delta);
            }
            if decoder.is_done() {
                break;
            }
        }

        info!(characters = reply.chars().count(), "chat reply streamed");
        Ok(reply)
    }

    /// Like [`ChatClient::stream_reply`], but failures become a fixed assistant message instead of
    /// an error. Text streamed before a failure is kept ahead of that message.
    pub async fn reply(&self, messages: &[ChatMessage]) -> ChatMessage {
        let mut partial = String::new();
        let outcome = self
            .stream_reply(messages, |delta| partial.push_str(delta))
            .await;

        match outcome {
            Ok(content) => ChatMessage::assistant(content),
            Err(err) => {
                warn!(
                    error = %err,
                    streamed = partial.chars().count(),
                    "chat request failed"
                );
                if partial.is_empty() {
                    ChatMessage::assistant(err.user_message())
                } else {
                    ChatMessage::assistant(format!("{partial}\n\n{}", err.user_message()))
                }
            }
        }
    }
}

/// Failure classes surfaced by the chat endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat endpoint rate limited the request")]
    RateLimited,
    #[error("chat usage quota exhausted")]
    QuotaExceeded,
    #[error("chat endpoint returned status {0}")]
    Status(u16),
    #[error("chat transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ChatError {
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::PAYMENT_REQUIRED => Self::QuotaExceeded,
            other => Self::Status(other.as_u16()),
        }
    }

    /// Message shown to the user in place of the assistant reply.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited => "Rate limited. Please try again later.",
            Self::QuotaExceeded => "Usage limit reached.",
            Self::Status(_) => "Something went wrong.",
            Self::Transport(_) => "Connection error. Please try again.",
        }
    }
}
