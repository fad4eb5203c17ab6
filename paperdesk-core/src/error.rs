use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::validation::ValidationErrors;

/// `error` value shared by every client-input failure body.
pub const VALIDATION_ERROR: &str = "Validation Error";

/// `error` value for business-rule conflicts.
pub const CONSTRAINT_ERROR: &str = "Constraint Error";

/// Helper to create a JSON error response with a standard `{ "error": message }` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, Json(body)).into_response()
}

/// Error returned by handlers. Every variant renders a JSON body.
pub enum HttpError {
    /// 404 with `{ "error": msg }`.
    NotFound(String),
    /// 400 with `{ "error": "Validation Error", "message": msg }`, used for
    /// malformed path ids and query parameters.
    InvalidParameter(String),
    /// 400 with `{ "error": "Validation Error", "messages": [...] }`.
    Validation(ValidationErrors),
    /// 400 with `{ "error": "Constraint Error", "message": msg }`.
    Constraint(String),
    /// 500 with a generic body. The message is logged, never sent.
    Internal(String),
    Custom {
        status: StatusCode,
        body: serde_json::Value,
    },
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::InvalidParameter(_)
            | HttpError::Validation(_)
            | HttpError::Constraint(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Custom { status, .. } => *status,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            HttpError::Validation(errors) => {
                let body = serde_json::json!({
                    "error": VALIDATION_ERROR,
                    "messages": errors.into_messages(),
                });
                (status, Json(body)).into_response()
            }
            HttpError::InvalidParameter(message) => {
                let body = serde_json::json!({
                    "error": VALIDATION_ERROR,
                    "message": message,
                });
                (status, Json(body)).into_response()
            }
            HttpError::Constraint(message) => {
                let body = serde_json::json!({
                    "error": CONSTRAINT_ERROR,
                    "message": message,
                });
                (status, Json(body)).into_response()
            }
            HttpError::Internal(message) => {
                tracing::error!(error = %message, "Request failed with an internal error");
                error_response(status, "Internal Server Error")
            }
            HttpError::Custom { body, .. } => (status, Json(body)).into_response(),
            HttpError::NotFound(message) => {
                error_response(status, message)
            }
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::InvalidParameter(msg) => write!(f, "Invalid Parameter: {msg}"),
            HttpError::Validation(errors) => {
                write!(f, "Validation Error: {}", errors.messages().join(", "))
            }
            HttpError::Constraint(msg) => write!(f, "Constraint Error: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
            HttpError::Custom { status, body } => write!(f, "Custom Error ({status}): {body}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}

impl From<ValidationErrors> for HttpError {
    fn from(errors: ValidationErrors) -> Self {
        HttpError::Validation(errors)
    }
}

impl From<std::io::Error> for HttpError {
    fn from(err: std::io::Error) -> Self {
        HttpError::Internal(err.to_string())
    }
}
