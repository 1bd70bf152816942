use crate::http::types::{HttpError, SendSmsRequest, SetLogLevelRequest, TwimlResponse};
use crate::http::HttpState;
use crate::outbound::send_accepted;
use crate::providers::twilio::{render_twiml, TwilioWebhook};
use crate::providers::vonage::VonageWebhook;
use crate::providers::InboundMessage;
use axum::extract::{Query, State};
use axum::{Form, Json};
use serde_json::Value;
use std::str::FromStr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub async fn health() -> &'static str {
    "SMS AI relay is running."
}

/// Synchronous auto-reply: the provider turns the returned TwiML document
/// into the outgoing SMS itself, so this route never calls the send API.
pub async fn twilio_webhook(
    State(state): State<HttpState>,
    Form(payload): Form<TwilioWebhook>,
) -> TwimlResponse {
    let inbound = InboundMessage::from(payload);
    info!("Inbound Twilio message from {}", inbound.sender);

    let reply = state.relay.reply_to(&inbound).await;
    TwimlResponse(render_twiml(&reply))
}

pub async fn vonage_webhook_query(
    State(state): State<HttpState>,
    Query(payload): Query<VonageWebhook>,
) -> &'static str {
    vonage_reply(state, payload.into()).await
}

pub async fn vonage_webhook_form(
    State(state): State<HttpState>,
    Form(payload): Form<VonageWebhook>,
) -> &'static str {
    vonage_reply(state, payload.into()).await
}

/// Callback-style auto-reply: the webhook is acknowledged with a plain OK no
/// matter what, and the reply goes out through the send API. Send failures
/// are logged only, there is nothing useful to tell the provider.
async fn vonage_reply(state: HttpState, inbound: InboundMessage) -> &'static str {
    info!("Inbound Vonage message from {}", inbound.sender);

    let reply = state.relay.reply_to(&inbound).await;

    // Reply from the number the user actually texted when the webhook
    // carried it, otherwise fall back to the configured sender.
    let from = inbound
        .recipient
        .as_deref()
        .unwrap_or_else(|| state.messaging.from_number());
    match state.messaging.send(from, &inbound.sender, &reply).await {
        Ok(response) if send_accepted(&response) => {
            info!("Sent auto-reply to {}", inbound.sender);
        }
        Ok(response) => {
            warn!("Send API rejected auto-reply to {}: {response}", inbound.sender);
        }
        Err(e) => {
            warn!("Failed to send auto-reply to {}: {e}", inbound.sender);
        }
    }

    "OK"
}

/// Manual send endpoint, mostly useful for testing credentials. The
/// provider's structured response is returned to the caller unchanged.
pub async fn sms_send(
    State(state): State<HttpState>,
    Json(payload): Json<SendSmsRequest>,
) -> Result<Json<Value>, HttpError> {
    let (to, message) = match (
        payload.to.filter(|t| !t.is_empty()),
        payload.message.filter(|m| !m.is_empty()),
    ) {
        (Some(to), Some(message)) => (to, message),
        _ => return Err(HttpError::bad_request("Missing 'to' or 'message'")),
    };

    let response = state
        .messaging
        .send(state.messaging.from_number(), &to, &message)
        .await
        .map_err(|e| HttpError::bad_gateway(e.to_string()))?;

    Ok(Json(response))
}

pub async fn sys_version() -> &'static str {
    crate::VERSION
}

pub async fn sys_set_log_level(
    State(state): State<HttpState>,
    Json(payload): Json<SetLogLevelRequest>,
) -> Result<&'static str, HttpError> {
    let filter = EnvFilter::from_str(&payload.level)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    info!("Setting log level to {filter} via API");
    state.tracing_reload.reload(filter).map_err(|e| HttpError {
        status: axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        message: e.to_string(),
    })?;

    Ok("OK")
}
