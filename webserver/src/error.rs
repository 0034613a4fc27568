//! WebServer-specific error types

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use copywriter::CopywriterError;
use shared::{ErrorBody, ProcessId, process_error};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WebServerError {
    #[error("Server startup error: {0}")]
    ServerStartup(String),

    #[error("Copywriter error: {0}")]
    Copywriter(#[from] CopywriterError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type WebServerResult<T> = Result<T, WebServerError>;

/// Error returned by HTTP handlers, rendered as `{"error": message}`
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<CopywriterError> for ApiError {
    fn from(error: CopywriterError) -> Self {
        if error.is_input_error() {
            Self::bad_request(error.to_string())
        } else {
            process_error!(ProcessId::current(), "❌ Generation failed: {}", error);
            Self::internal(error.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // Oversized bodies keep their 413; every other rejection is the caller's fault
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copywriter::ProviderError;

    #[test]
    fn test_input_errors_map_to_bad_request() {
        let error = ApiError::from(CopywriterError::invalid_input("prompt required"));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "prompt required");
    }

    #[test]
    fn test_config_failures_surface_through_copywriter() {
        let error: WebServerError = CopywriterError::config("Invalid value for COPY_SMS_CHAR_CAP: 'lots'").into();
        assert!(matches!(error, WebServerError::Copywriter(CopywriterError::ConfigError { .. })));
        assert!(error.to_string().contains("COPY_SMS_CHAR_CAP"));
    }

    #[test]
    fn test_provider_errors_map_to_internal() {
        let error = ApiError::from(CopywriterError::Overloaded {
            attempts: 5,
            last_error: ProviderError::new("The model is overloaded.").with_status(503),
        });
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.message.starts_with("Model currently overloaded after multiple retries"));

        let error = ApiError::from(CopywriterError::Provider(ProviderError::new("API key not valid")));
        assert_eq!(error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.message, "API key not valid");
    }
}
