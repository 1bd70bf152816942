use crate::config::CompletionConfig;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Completion response contained no choices")]
    MissingContent,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChatCompletionChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat-completion endpoint. Each inbound SMS
/// produces exactly one single-turn request, there is no history or retrying.
#[derive(Clone)]
pub struct CompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    system_prompt: String,
}
impl CompletionClient {
    pub fn new(config: &CompletionConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Completion API key is not configured")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build completion API HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/chat/completions",
                config.base_url.trim_end_matches('/')
            ),
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// Sends the user text as the sole conversational turn and returns the
    /// trimmed text of the first completion choice.
    pub async fn complete(&self, user_text: &str) -> Result<String, CompletionError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_text,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Requesting completion from {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("Completion API error: {status} - {body}");
            return Err(CompletionError::Status { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(CompletionError::MissingContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joining() {
        let config = CompletionConfig {
            api_key: Some("key".to_string()),
            base_url: "https://api.example.com/openai/".to_string(),
            ..CompletionConfig::default()
        };

        let client = CompletionClient::new(&config).expect("client should build");
        assert_eq!(client.endpoint, "https://api.example.com/openai/chat/completions");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let config = CompletionConfig::default();
        assert!(CompletionClient::new(&config).is_err());
    }

    #[test]
    fn test_response_shape() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"c1","choices":[{"index":0,"message":{"role":"assistant","content":" hi there \n"}}]}"#,
        )
        .expect("response should parse");

        let reply = response
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string());
        assert_eq!(reply.as_deref(), Some("hi there"));
    }

    #[test]
    fn test_empty_choices_is_missing_content() {
        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices":[]}"#).expect("response should parse");
        assert!(response.choices.first().is_none());
    }
}
