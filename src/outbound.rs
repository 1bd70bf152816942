use crate::config::MessagingConfig;
use anyhow::{Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum OutboundError {
    #[error("Send API returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Client for the messaging provider's outbound send API. The provider's
/// structured response is passed through unchanged so callers can inspect
/// per-message status codes themselves.
#[derive(Clone)]
pub struct MessagingClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_secret: String,
    from_number: String,
}
impl MessagingClient {
    pub fn new(config: &MessagingConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .context("Messaging API key is not configured")?;
        let api_secret = config
            .api_secret
            .clone()
            .context("Messaging API secret is not configured")?;
        let from_number = config
            .from_number
            .clone()
            .context("Messaging sender number is not configured")?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build send API HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!("{}/sms/json", config.base_url.trim_end_matches('/')),
            api_key,
            api_secret,
            from_number,
        })
    }

    pub fn from_number(&self) -> &str {
        &self.from_number
    }

    pub async fn send(&self, from: &str, to: &str, text: &str) -> Result<Value, OutboundError> {
        let params = [
            ("api_key", self.api_key.as_str()),
            ("api_secret", self.api_secret.as_str()),
            ("from", from),
            ("to", to),
            ("text", text),
        ];

        debug!("Submitting outbound SMS to {to}");
        let response = self.client.post(&self.endpoint).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!("Send API error: {status} - {body}");
            return Err(OutboundError::Status { status, body });
        }

        Ok(response.json().await?)
    }
}

/// The send API reports a 200 even for rejected messages, success lives in the
/// per-message `status` field ("0" means accepted).
pub fn send_accepted(response: &Value) -> bool {
    response
        .get("messages")
        .and_then(Value::as_array)
        .is_some_and(|messages| {
            !messages.is_empty()
                && messages
                    .iter()
                    .all(|message| message.get("status").and_then(Value::as_str) == Some("0"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_accepted() {
        let response = json!({
            "message-count": "1",
            "messages": [{"to": "447700900000", "status": "0", "message-id": "abc"}]
        });
        assert!(send_accepted(&response));
    }

    #[test]
    fn test_send_rejected() {
        let response = json!({
            "message-count": "1",
            "messages": [{"status": "4", "error-text": "Invalid credentials"}]
        });
        assert!(!send_accepted(&response));

        assert!(!send_accepted(&json!({"messages": []})));
        assert!(!send_accepted(&json!({})));
    }

    #[test]
    fn test_missing_credentials_is_an_error() {
        let config = MessagingConfig::default();
        assert!(MessagingClient::new(&config).is_err());
    }
}
