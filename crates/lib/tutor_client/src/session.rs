//! Chat session: the ordered message list and the send gate.

use uuid::Uuid;

use crate::message::Message;

/// Greeting shown when a session opens.
pub const GREETING: &str = "Hello! I'm your AI Tutor. I'm here to help you learn and answer any \
questions you might have. What would you like to learn today?";

/// A question accepted for sending, with the placeholder that will hold the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub bot_id: Uuid,
}

/// In-memory chat session. Messages are only ever appended.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
    input: String,
    in_flight: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A session opened with the tutor greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::bot(GREETING)],
            input: String::new(),
            in_flight: false,
        }
    }

    /// A session with no messages.
    pub fn empty() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            in_flight: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Whether a reply is still being received.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn message(&self, id: Uuid) -> Option<&Message> {
        self.messages.iter().find(|m| m.id() == id)
    }

    pub(crate) fn message_mut(&mut self, id: Uuid) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id() == id)
    }

    /// Accepts the current input for sending.
    ///
    /// Returns `None` when the trimmed input is empty or a send is already in
    /// flight. Otherwise appends the user message, clears the input, appends a
    /// pending bot placeholder and marks the session in flight.
    pub fn begin_send(&mut self) -> Option<Exchange> {
        if self.in_flight || self.input.trim().is_empty() {
            return None;
        }

        let question = std::mem::take(&mut self.input);
        self.messages.push(Message::user(question.clone()));

        let placeholder = Message::placeholder();
        let bot_id = placeholder.id();
        self.messages.push(placeholder);
        self.in_flight = true;

        Some(Exchange { question, bot_id })
    }

    /// Releases the send gate.
    pub fn finish_send(&mut self) {
        self.in_flight = false;
    }
}
