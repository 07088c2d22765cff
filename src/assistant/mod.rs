pub mod prompts;
pub mod sender;

use crate::config::AssistantConfig;
use crate::model::AssistantError;
use prompts::{Language, system_prompt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    /// Any role other than `user` is replayed as the assistant.
    #[serde(other)]
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Relays a conversation to a chat model. Failures come back as reply text.
#[async_trait::async_trait]
pub trait ChatRelay: Send + Sync {
    async fn reply(&self, messages: &[ChatMessage], language: Language) -> String;
}

pub struct GeminiAssistant {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub client: Client,
}

impl GeminiAssistant {
    pub fn new(cfg: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()
            .map_err(|e| AssistantError::Http(e.to_string()))?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone().filter(|k| !k.trim().is_empty()),
            client,
        })
    }
}

/// Flattens the history into `User:` / `Assistant:` lines.
pub fn conversation_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            let prefix = match msg.role {
                Role::User => "User:",
                Role::Assistant => "Assistant:",
            };
            format!("{} {}\n", prefix, msg.content)
        })
        .collect()
}

#[async_trait::async_trait]
impl ChatRelay for GeminiAssistant {
    async fn reply(&self, messages: &[ChatMessage], language: Language) -> String {
        let prompt = format!("{}{}", system_prompt(language), conversation_text(messages));
        match sender::generate_content(self, &prompt).await {
            Ok(text) => text,
            Err(AssistantError::ConfigurationMissing) => {
                warn!("Assistant called without GOOGLE_API_KEY");
                "The farming assistant is not configured yet (GOOGLE_API_KEY is missing).".into()
            }
            Err(e) => {
                warn!("Assistant error: {}", e);
                format!("Error from assistant: {}", e)
            }
        }
    }
}
