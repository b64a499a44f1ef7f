//! Mapping of crate errors onto HTTP responses.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::error::ValidationError;
use crate::error::{Error, ErrorKind};

/// Error returned by every handler.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not JSON or did not match the expected shape.
    BadRequest(String),
    /// Anything raised by the race service.
    Service(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Service(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Service(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Service(err) => match err.kind() {
                ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.to_string()),
                ErrorKind::PermissionDenied => (StatusCode::FORBIDDEN, err.to_string()),
                ErrorKind::StoreUnavailable | ErrorKind::Internal => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        match &self {
            Self::Service(err) if status.is_server_error() => {
                error!(error = %err, "Request failed");
            }
            _ => warn!(status = status.as_u16(), error = %message, "Rejected request"),
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
