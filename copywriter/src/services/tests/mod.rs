//! Tests for provider services against a local mock HTTP server
