//! Request handlers

pub mod api;

pub use api::{generate_handler, health_check};
