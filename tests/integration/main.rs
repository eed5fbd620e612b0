//! Integration tests for the Permit Rust client.
//!
//! These tests drive the real reqwest transport against local wiremock
//! servers standing in for the PDP and the cloud API.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With transport logs
//! RUST_LOG=permit=debug cargo test --test integration -- --nocapture
//! ```

mod client_tests;
mod common;
mod dispatch_tests;
mod timeout_tests;
