//! Service implementations for external I/O

pub mod gemini_provider;

#[cfg(test)]
mod tests;

pub use gemini_provider::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, RealGeminiProvider};
