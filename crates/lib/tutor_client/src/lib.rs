//! # tutor_client
//!
//! Chat client for the AI tutor relay.
//!
//! A [`session::ChatSession`] keeps the ordered list of messages. The
//! [`client::TutorClient`] sends the pending question to the relay and reveals
//! the reply into the session's bot placeholder, either as a simulated
//! per-character stream over a buffered JSON answer or chunk by chunk over a
//! streamed body. Both can be stopped through a
//! [`tokio_util::sync::CancellationToken`].

pub mod client;
pub mod error;
pub mod extract;
pub mod format;
pub mod message;
pub mod reveal;
pub mod session;

pub use client::{ClientConfig, TutorClient};
pub use error::{ClientError, ClientResult};
pub use message::{Message, MessageStatus, Sender};
pub use session::ChatSession;
