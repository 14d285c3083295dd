//! Wire models.
//!
//! `ask` is the contract between the relay and the chat client; `gemini`
//! is the outbound request shape sent to the Gemini API.

pub mod ask;
pub mod gemini;
