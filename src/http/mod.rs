mod routes;
mod types;

use crate::outbound::MessagingClient;
use crate::relay::RelayService;
use crate::TracingReloadHandle;
use axum::http::{HeaderName, HeaderValue};
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;

/// Per-request shared state. Everything in here is read-only after startup,
/// requests never coordinate with each other.
#[derive(Clone)]
pub struct HttpState {
    pub relay: RelayService,
    pub messaging: MessagingClient,
    pub tracing_reload: TracingReloadHandle,
}

pub fn create_app(state: HttpState) -> axum::Router {
    axum::Router::new()
        .route("/", get(routes::health))
        .route("/webhooks/twilio", post(routes::twilio_webhook))
        .route(
            "/webhooks/vonage",
            get(routes::vonage_webhook_query).post(routes::vonage_webhook_form),
        )
        .route("/sms/send", post(routes::sms_send))
        .route("/sys/version", get(routes::sys_version))
        .route("/sys/set-log-level", post(routes::sys_set_log_level))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-version"),
            HeaderValue::from_static(crate::VERSION),
        ))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()))
        .with_state(state)
}
