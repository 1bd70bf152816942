use crate::providers::InboundMessage;
use serde::Deserialize;

/// Form-encoded webhook payload, field names are fixed by the provider.
#[derive(Debug, Deserialize)]
pub struct TwilioWebhook {
    #[serde(rename = "From", default)]
    pub from: String,

    #[serde(rename = "To", default)]
    pub to: Option<String>,

    #[serde(rename = "Body", default)]
    pub body: Option<String>,
}
impl From<TwilioWebhook> for InboundMessage {
    fn from(payload: TwilioWebhook) -> Self {
        InboundMessage::new(payload.from, payload.to, payload.body)
    }
}

/// Builds the synchronous TwiML reply document. The reply text is always
/// escaped so that replies containing markup characters stay well-formed.
pub fn render_twiml(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(reply)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
