use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::Message;
use service::errors::ServiceError;
use tracing::error;

pub const NOT_FOUND_MESSAGE: &str = "Fecha no encontrada";

/// JSON error response: status code plus a `{"mensaje": ...}` body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub message: String,
}

impl JsonApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::Persistence(msg) => {
                error!(error = %msg, "persistence error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Error de almacenamiento")
            }
            ServiceError::IdExhausted(msg) => {
                error!(error = %msg, "id space exhausted");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "No quedan ids disponibles")
            }
        }
    }
}

/// Keeps axum's status (400/415/422) but answers in the `mensaje` shape.
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(Message::new(self.message))).into_response()
    }
}
