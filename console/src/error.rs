//! Error handling for the inventory console
//!
//! `ApiError` is what the inventory backend can answer, already classified
//! so callers match on the variant instead of parsing message text.
//! `AppError` is what the console answers to the browser.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use shared::messages;
use shared::selection::SelectionError;
use thiserror::Error;

/// Failure reported by (or while talking to) the inventory backend
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("session is not authorized")]
    Unauthorized,

    #[error("permission denied: {message}")]
    Forbidden { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("backend error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid server response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Classify an error status and message
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden { message },
            _ if messages::is_permission_message(&message) => ApiError::Forbidden { message },
            404 => ApiError::NotFound { message },
            _ => ApiError::Server { status, message },
        }
    }

    /// Classify an error body such as `{statusCode, message}` or `{error}`
    pub fn from_body(status: u16, body: &Value) -> Self {
        let status = body
            .get("statusCode")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(status);
        Self::from_status(status, body_message(body))
    }

    /// Text shown to the user in a toast
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized | ApiError::Forbidden { .. } => {
                messages::PERMISSION_DENIED.to_string()
            }
            ApiError::NotFound { message } | ApiError::Server { message, .. } => {
                messages::display_message(message)
            }
            ApiError::Transport(_) => messages::CONNECTION_FAILED.to_string(),
            ApiError::InvalidResponse(_) => messages::INVALID_RESPONSE.to_string(),
        }
    }

    /// Authorization failures give the user a moment to read the toast
    /// before the form resets
    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden { .. })
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Server { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Transport(_) | ApiError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden { .. } => "FORBIDDEN",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Server { .. } => "BACKEND_ERROR",
            ApiError::Transport(_) => "BACKEND_UNREACHABLE",
            ApiError::InvalidResponse(_) => "INVALID_RESPONSE",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Backend messages are a string, a list of strings, or under `error`
fn body_message(body: &Value) -> String {
    let field = body.get("message").or_else(|| body.get("error"));
    match field {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
        None => body.to_string(),
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Console error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Validation error")]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
        /// Only populated when form diagnostics are enabled
        diagnostics: bool,
    },

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Missing or invalid session: {0}")]
    MissingSession(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::Api(err) => (
                err.status_code(),
                ErrorDetail {
                    code: err.code().to_string(),
                    message: err.user_message(),
                    fields: None,
                },
            ),
            AppError::Validation { fields, diagnostics } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "El formulario contiene errores".to_string(),
                    fields: diagnostics.then(|| fields.clone()),
                },
            ),
            AppError::Selection(err) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "SELECTION_ERROR".to_string(),
                    message: err.to_string(),
                    fields: None,
                },
            ),
            AppError::MissingSession(_) => (
                StatusCode::UNAUTHORIZED,
                ErrorDetail {
                    code: "UNAUTHORIZED".to_string(),
                    message: messages::PERMISSION_DENIED.to_string(),
                    fields: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: msg.clone(),
                    fields: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request failed: {:?}", self);
        }

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_401_is_unauthorized_regardless_of_text() {
        let err = ApiError::from_body(400, &json!({"statusCode": 401, "message": "jwt expired"}));
        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(err.user_message(), messages::PERMISSION_DENIED);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_401_body_renders_permission_text() {
        let err = ApiError::from_body(401, &json!({"statusCode": 401, "message": "Unauthorized"}));
        assert_eq!(err, ApiError::Unauthorized);
        assert!(err.is_authorization());
        assert_eq!(err.user_message(), "No tienes permisos para realizar esta acción");
    }

    #[test]
    fn test_permission_text_maps_to_forbidden() {
        for text in ["No autorizado para esta acción", "Unauthorized resource"] {
            let err = ApiError::from_status(400, text);
            assert!(matches!(err, ApiError::Forbidden { .. }));
            assert_eq!(err.user_message(), messages::PERMISSION_DENIED);
        }
    }

    #[test]
    fn test_backend_message_passes_through() {
        let err = ApiError::from_body(409, &json!({"error": "El producto ya existe"}));
        assert_eq!(err.user_message(), "El producto ya existe");
        assert!(!err.is_authorization());
    }

    #[test]
    fn test_message_lists_are_joined() {
        let err = ApiError::from_body(
            400,
            &json!({"statusCode": 400, "message": ["storageId must be a string", "date is required"]}),
        );
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "storageId must be a string, date is required".into()
            }
        );
    }

    #[test]
    fn test_not_found() {
        let err = ApiError::from_status(404, "Entrada no encontrada");
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
