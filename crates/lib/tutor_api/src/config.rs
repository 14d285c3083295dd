//! API server configuration.

use tutor_core::config::RelayConfig;

/// Default listen address, matching the port the chat client expects.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5268";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:5268").
    pub bind_addr: String,
    /// Gemini relay settings.
    pub relay: RelayConfig,
}
