//! Shared types for the campaign copy generation system
//!
//! Contains the campaign vocabulary, variant content shapes and the HTTP
//! wire messages used by both the copywriter core and the webserver.

pub mod types;
pub mod errors;
pub mod messages;
pub mod logging;

pub use types::*;
pub use errors::*;

pub use messages::{ErrorBody, GenerateBody};
