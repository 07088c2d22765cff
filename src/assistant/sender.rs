// assistant/sender.rs

use crate::assistant::GeminiAssistant;
use crate::model::AssistantError;
use serde_json::{Value, json};
use tracing::{info, warn};

/// Sends one prompt to the `generateContent` endpoint and returns the first candidate's text.
pub async fn generate_content(
    assistant: &GeminiAssistant,
    prompt: &str,
) -> Result<String, AssistantError> {
    let api_key = assistant
        .api_key
        .as_deref()
        .ok_or(AssistantError::ConfigurationMissing)?;
    let url = format!(
        "{}/models/{}:generateContent",
        assistant.base_url, assistant.model
    );
    let body = json!({
        "contents": [{"parts": [{"text": prompt}]}]
    });

    info!("📤 Calling assistant model {}", assistant.model);
    let response = assistant
        .client
        .post(&url)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AssistantError::Timeout
            } else {
                AssistantError::Http(e.to_string())
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_else(|_| "unknown".into());
        warn!("❌ Assistant API responded [{}]: {}", status, text);
        return Err(AssistantError::Status(status.as_u16(), text));
    }

    let payload: Value = response
        .json()
        .await
        .map_err(|_| AssistantError::UnexpectedResponse)?;
    let text = payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or(AssistantError::UnexpectedResponse)?;
    info!("✅ Assistant replied ({} chars)", text.len());
    Ok(text.trim().to_string())
}
