//! Copywriter-specific data types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fully formed, schema-constrained request to the text provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub prompt: String,
    pub system_instruction: String,
    pub response_schema: serde_json::Value,
}

/// Failure reported by the text provider
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    /// HTTP status or numeric error code
    pub status: Option<u16>,
    /// Provider status string such as `UNAVAILABLE` or `RESOURCE_EXHAUSTED`
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}
