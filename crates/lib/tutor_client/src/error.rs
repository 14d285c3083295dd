//! Client error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Failures of one relay exchange.
///
/// None of these end the session; they are shown in place of the reply.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Relay replied with null")]
    NullReply,
}

impl ClientError {
    /// Text shown in the chat instead of the bot reply.
    pub fn chat_message(&self) -> String {
        format!("Error: {self}. Please check your backend connection.")
    }
}
