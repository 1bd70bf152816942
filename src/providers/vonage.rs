use crate::providers::InboundMessage;
use serde::Deserialize;

/// Callback payload, delivered as either GET query parameters or a POST form.
#[derive(Debug, Deserialize)]
pub struct VonageWebhook {
    #[serde(default)]
    pub msisdn: String,

    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub text: Option<String>,
}
impl From<VonageWebhook> for InboundMessage {
    fn from(payload: VonageWebhook) -> Self {
        InboundMessage::new(payload.msisdn, payload.to, payload.text)
    }
}
