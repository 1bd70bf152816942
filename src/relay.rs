use crate::completion::CompletionClient;
use crate::providers::InboundMessage;
use tracing::{debug, error};

/// Returned when the webhook carried no usable message text. The completion
/// API is never contacted in that case.
pub const MISSING_MESSAGE_REPLY: &str = "I didn't receive a message. Please text me again.";

/// Returned when the completion API call fails for any reason. The real error
/// is logged but never shown to the SMS user.
pub const COMPLETION_FAILURE_REPLY: &str = "Sorry, I'm having trouble answering right now.";

/// Owns the inbound-message-to-reply-text policy shared by every webhook
/// route, regardless of which provider delivered the message.
#[derive(Clone)]
pub struct RelayService {
    completion: CompletionClient,
}
impl RelayService {
    pub fn new(completion: CompletionClient) -> Self {
        Self { completion }
    }

    /// Always produces reply text. Errors end at this boundary.
    pub async fn reply_to(&self, inbound: &InboundMessage) -> String {
        let body = match &inbound.body {
            Some(body) => body,
            None => {
                debug!("Inbound message from {} had no text", inbound.sender);
                return MISSING_MESSAGE_REPLY.to_string();
            }
        };

        match self.completion.complete(body).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Failed to get completion reply: {e}");
                COMPLETION_FAILURE_REPLY.to_string()
            }
        }
    }
}
