use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}
impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}
impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// TwiML document response, served with an XML content type.
pub struct TwimlResponse(pub String);
impl IntoResponse for TwimlResponse {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "text/xml")], self.0).into_response()
    }
}

#[derive(Deserialize)]
pub struct SendSmsRequest {
    #[serde(default)]
    pub to: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub struct SetLogLevelRequest {
    pub level: String,
}
