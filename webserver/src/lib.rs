//! Webserver library for campaign copy generation
//!
//! Exposes the copywriter core over HTTP: a single JSON endpoint that turns a
//! prompt plus campaign settings into normalized A/B variants.

pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use error::{ApiError, WebServerError, WebServerResult};
pub use state::WebServerState;
pub use webserver_impl::{MAX_BODY_BYTES, WebServer};

// Re-export trait definitions
pub use traits::{CopyService, MockCopyService};

// Re-export service implementations
pub use services::RealCopyService;
