//! Shared error types for the campaign copy generation system

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Missing field `{field}` in {context}")]
    MissingField { field: &'static str, context: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
