//! Service trait definitions for dependency injection
//!
//! Handlers reach the copywriter core only through these traits so the HTTP
//! layer can be tested without a provider.

use async_trait::async_trait;
use copywriter::CopywriterResult;
use shared::{GeneratedVariants, GenerationRequest};

/// Copy generation service trait
#[mockall::automock]
#[async_trait]
pub trait CopyService: Send + Sync {
    /// Generate and normalize both variants for one request
    async fn generate(&self, request: GenerationRequest) -> CopywriterResult<GeneratedVariants>;
}
