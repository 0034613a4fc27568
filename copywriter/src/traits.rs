//! Trait definitions for dependency injection

use async_trait::async_trait;

use crate::types::{ProviderError, ProviderRequest};

/// External text generation provider
///
/// Implementations perform exactly one network call per `generate`; retrying
/// is the caller's concern.
#[mockall::automock]
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text constrained to the request's response schema
    async fn generate(&self, request: &ProviderRequest) -> Result<String, ProviderError>;
}
