//! # tutor_core
//!
//! Core domain logic for the AI tutor.
//!
//! Holds the tutor prompt, the Gemini answer relay and the wire models shared
//! by the HTTP API and the chat client.

pub mod config;
pub mod models;
pub mod prompt;
pub mod relay;

/// Path of the ask endpoint served by the relay.
pub const ASK_PATH: &str = "/api/Tutor/ask";

/// Path of the health endpoint served by the relay.
pub const HEALTH_PATH: &str = "/api/health";

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
