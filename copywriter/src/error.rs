//! Copywriter error types

use thiserror::Error;

use crate::types::ProviderError;

/// Result type for copywriter operations
pub type CopywriterResult<T> = Result<T, CopywriterError>;

/// Copywriter error types
#[derive(Error, Debug)]
pub enum CopywriterError {
    /// Rejected before any provider call was made
    #[error("{message}")]
    InvalidInput { message: String },

    /// Non-retriable provider failure, original message preserved
    #[error("{0}")]
    Provider(ProviderError),

    /// Retriable failures persisted until the attempt budget ran out
    #[error("Model currently overloaded after multiple retries ({attempts} attempts). Last error: {last_error}")]
    Overloaded { attempts: u32, last_error: ProviderError },

    /// Provider output was not valid JSON or did not match the variant schema
    #[error("Invalid response format: {message}")]
    InvalidResponse { message: String },

    #[error("Generation cancelled")]
    Cancelled,

    #[error("Failed to generate content for \"{customer}\". {source}")]
    BatchAborted {
        customer: String,
        #[source]
        source: Box<CopywriterError>,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CopywriterError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into() }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }

    /// Whether the error was caused by the caller rather than the provider
    pub fn is_input_error(&self) -> bool {
        match self {
            CopywriterError::InvalidInput { .. } => true,
            CopywriterError::BatchAborted { source, .. } => source.is_input_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_message_is_preserved() {
        let err = CopywriterError::Provider(ProviderError::new("API key not valid").with_status(401));
        assert_eq!(err.to_string(), "API key not valid");
    }

    #[test]
    fn test_overloaded_message() {
        let err = CopywriterError::Overloaded {
            attempts: 5,
            last_error: ProviderError::new("The model is overloaded").with_status(503),
        };
        assert!(err.to_string().starts_with("Model currently overloaded after multiple retries"));
    }

    #[test]
    fn test_batch_error_names_customer() {
        let err = CopywriterError::BatchAborted {
            customer: "Maria Garcia".to_string(),
            source: Box::new(CopywriterError::invalid_input("prompt required")),
        };
        assert_eq!(err.to_string(), "Failed to generate content for \"Maria Garcia\". prompt required");
        assert!(err.is_input_error());
    }
}
