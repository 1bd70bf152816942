pub mod twilio;
pub mod vonage;

/// Canonical inbound SMS, normalized away from provider field naming.
/// Lives only for the duration of one webhook request.
#[derive(Debug, Clone, PartialEq)]
pub struct InboundMessage {
    pub sender: String,
    pub recipient: Option<String>,
    pub body: Option<String>,
}
impl InboundMessage {
    /// Empty or whitespace-only bodies normalize to `None` so handlers have a
    /// single "nothing to answer" case.
    pub fn new(sender: String, recipient: Option<String>, body: Option<String>) -> Self {
        let body = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());

        Self {
            sender,
            recipient,
            body,
        }
    }
}
