//! Chat message model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Lifecycle of a bot reply.
///
/// `Pending → Streaming → {Complete | Stopped | Errored}`. User messages and
/// greetings are created `Complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageStatus {
    /// Placeholder waiting for the relay.
    Pending,
    /// Text is being revealed.
    Streaming,
    Complete,
    /// Stopped by the user; keeps the partial text.
    Stopped,
    /// Text replaced by an error message.
    Errored,
}

impl MessageStatus {
    pub fn is_streaming(self) -> bool {
        matches!(self, Self::Pending | Self::Streaming)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_streaming()
    }
}

/// One entry of a chat session.
///
/// Text may contain the HTML produced by [`crate::format::format_response`].
/// Once the status is terminal the message no longer changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    id: Uuid,
    text: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    is_streaming: bool,
    status: MessageStatus,
}

impl Message {
    fn new(text: String, sender: Sender, status: MessageStatus) -> Self {
        Self {
            id: Uuid::now_v7(),
            text,
            sender,
            timestamp: Utc::now(),
            is_streaming: status.is_streaming(),
            status,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::User, MessageStatus::Complete)
    }

    /// A finished bot message, e.g. the session greeting.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text.into(), Sender::Bot, MessageStatus::Complete)
    }

    /// Empty bot message awaiting a relay reply.
    pub fn placeholder() -> Self {
        Self::new(String::new(), Sender::Bot, MessageStatus::Pending)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_streaming(&self) -> bool {
        self.is_streaming
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    fn set_status(&mut self, status: MessageStatus) {
        self.status = status;
        self.is_streaming = status.is_streaming();
    }

    /// Moves a pending placeholder to `Streaming`.
    pub fn start_streaming(&mut self) -> bool {
        if self.status != MessageStatus::Pending {
            return false;
        }
        self.set_status(MessageStatus::Streaming);
        true
    }

    /// Replaces the display text with a longer rendering of the reply.
    pub fn reveal(&mut self, text: String) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.set_status(MessageStatus::Streaming);
        self.text = text;
        true
    }

    /// Appends a streamed chunk to the display text.
    pub fn append(&mut self, chunk: &str) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.set_status(MessageStatus::Streaming);
        self.text.push_str(chunk);
        true
    }

    pub fn complete(&mut self) -> bool {
        self.finish(MessageStatus::Complete)
    }

    /// Ends the reveal early, keeping whatever text is shown.
    pub fn stop(&mut self) -> bool {
        self.finish(MessageStatus::Stopped)
    }

    /// Replaces the text with `error` and ends the reveal.
    pub fn fail(&mut self, error: impl Into<String>) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.text = error.into();
        self.set_status(MessageStatus::Errored);
        true
    }

    fn finish(&mut self, status: MessageStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.set_status(status);
        true
    }
}
