//! Copywriter core business logic

pub mod generator;
pub mod invoker;
pub mod normalizer;
pub mod prompt;
pub mod retry;
pub mod schema;

pub use generator::CopyGenerator;
pub use invoker::ModelInvoker;
pub use normalizer::{NormalizationPolicy, Normalizer};
pub use prompt::{PROMPT_LIBRARY, PromptTemplate, build_system_instruction, find_template, personalize};
pub use retry::{RetryPolicy, call_with_retry, is_retriable_error};
pub use schema::{VariantSchema, response_schema};
