//! Copywriter library for campaign copy generation
//!
//! Sends a schema-constrained prompt to a generative text provider through a
//! bounded retry protocol, then normalizes the returned A/B variants so that
//! subject lengths, SMS sizes, CTA phrasing and coupon codes hold regardless
//! of what the model produced.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::GeneratorConfig;
pub use crate::core::{
    CopyGenerator, ModelInvoker, NormalizationPolicy, Normalizer, RetryPolicy, VariantSchema,
};
pub use error::{CopywriterError, CopywriterResult};
pub use services::RealGeminiProvider;
pub use traits::*;
pub use types::*;
