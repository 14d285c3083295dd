// @zen-component: TUTOR-ChatClient
//
//! Relay exchange: sends the pending question and reveals the reply.
//!
//! One call to [`TutorClient::ask`] drives a bot placeholder through
//! `Pending → Streaming → {Complete | Stopped | Errored}`:
//!
//! 1. the question is posted to the relay as `{ "question": ... }`;
//! 2. a non-2xx status or a transport/parse failure replaces the placeholder
//!    text with an error line;
//! 3. a JSON reply is revealed character by character through the formatter;
//!    any other content type is appended chunk by chunk as it arrives;
//! 4. the cancellation token stops the exchange at any point, keeping what
//!    has been revealed.

use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tutor_core::ASK_PATH;
use tutor_core::models::ask::AskRequest;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::extract::extract_answer;
use crate::message::Message;
use crate::reveal::{DEFAULT_REVEAL_DELAY, chunk_stream, reveal_stream};
use crate::session::ChatSession;

/// Default relay base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5268";

/// Client settings.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Relay base URL, without the endpoint path.
    pub base_url: String,
    /// Pause between characters of a buffered reply.
    pub reveal_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl ClientConfig {
    pub fn ask_url(&self) -> String {
        format!("{}{ASK_PATH}", self.base_url.trim_end_matches('/'))
    }
}

/// Observable steps of one exchange.
#[derive(Debug)]
pub enum ChatEvent<'a> {
    /// The bot message grew by `delta` (raw text, before formatting).
    Revealed { message: &'a Message, delta: &'a str },
    /// The bot message reached a terminal status.
    Finished { message: &'a Message },
}

/// How the relay answered.
enum Reply {
    /// A JSON body, already reduced to the answer text.
    Buffered(String),
    /// Any other body, still on the wire.
    Streamed(reqwest::Response),
}

/// HTTP client for the tutor relay.
#[derive(Clone, Debug)]
pub struct TutorClient {
    http: Client,
    config: ClientConfig,
}

impl TutorClient {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: ClientConfig) -> Self {
        Self { http, config }
    }

    async fn request(&self, question: &str) -> ClientResult<Reply> {
        let url = self.config.ask_url();
        debug!(%url, "posting question to relay");

        let resp = self
            .http
            .post(&url)
            .json(&AskRequest::new(question))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %body, "relay returned an error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));

        if is_json {
            let bytes = resp.bytes().await?;
            let reply: Value = serde_json::from_slice(&bytes)?;
            Ok(Reply::Buffered(extract_answer(&reply)?))
        } else {
            Ok(Reply::Streamed(resp))
        }
    }

    /// Sends the session's current input and reveals the reply into it.
    ///
    /// Returns `false` without doing anything when the session does not accept
    /// the input (blank, or a send already in flight). `on_event` sees every
    /// change to the bot message. Firing `cancel` stops the exchange and keeps
    /// the partial text; it is the only way to end a reveal early.
    pub async fn ask<F>(
        &self,
        session: &mut ChatSession,
        cancel: &CancellationToken,
        mut on_event: F,
    ) -> bool
    where
        F: FnMut(ChatEvent<'_>),
    {
        let Some(exchange) = session.begin_send() else {
            return false;
        };
        info!(question_len = exchange.question.len(), "sending question");

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            reply = self.request(&exchange.question) => Some(reply),
        };

        match reply {
            None => {
                debug!("stopped before the relay answered");
                with_bot(session, exchange.bot_id, Message::stop);
            }
            Some(Err(e)) => {
                warn!(error = %e, "exchange failed");
                with_bot(session, exchange.bot_id, |m| m.fail(e.chat_message()));
            }
            Some(Ok(Reply::Buffered(answer))) => {
                with_bot(session, exchange.bot_id, Message::start_streaming);
                let frames = reveal_stream(answer, self.config.reveal_delay, cancel.clone());
                futures::pin_mut!(frames);
                while let Some(frame) = frames.next().await {
                    let revealed = with_bot(session, exchange.bot_id, |m| m.reveal(frame.formatted));
                    if let Some(message) = revealed {
                        on_event(ChatEvent::Revealed {
                            message,
                            delta: &frame.delta,
                        });
                    }
                }
                end_reveal(session, exchange.bot_id, cancel);
            }
            Some(Ok(Reply::Streamed(resp))) => {
                with_bot(session, exchange.bot_id, Message::start_streaming);
                let chunks = chunk_stream(resp.bytes_stream(), cancel.clone());
                futures::pin_mut!(chunks);
                let mut failed = false;
                while let Some(chunk) = chunks.next().await {
                    match chunk {
                        Ok(text) => {
                            let appended = with_bot(session, exchange.bot_id, |m| m.append(&text));
                            if let Some(message) = appended {
                                on_event(ChatEvent::Revealed {
                                    message,
                                    delta: &text,
                                });
                            }
                        }
                        Err(e) => {
                            let e = ClientError::from(e);
                            warn!(error = %e, "relay stream broke off");
                            with_bot(session, exchange.bot_id, |m| m.fail(e.chat_message()));
                            failed = true;
                        }
                    }
                }
                if !failed {
                    end_reveal(session, exchange.bot_id, cancel);
                }
            }
        }

        session.finish_send();
        if let Some(message) = session.message(exchange.bot_id) {
            debug!(status = ?message.status(), "exchange finished");
            on_event(ChatEvent::Finished { message });
        }
        true
    }
}

/// Applies `change` to the bot message; yields it back if the change took.
fn with_bot<F>(session: &mut ChatSession, id: Uuid, change: F) -> Option<&Message>
where
    F: FnOnce(&mut Message) -> bool,
{
    let message = session.message_mut(id)?;
    if change(message) {
        Some(&*message)
    } else {
        None
    }
}

fn end_reveal(session: &mut ChatSession, id: Uuid, cancel: &CancellationToken) {
    if cancel.is_cancelled() {
        debug!("reveal stopped by user");
        with_bot(session, id, Message::stop);
    } else {
        with_bot(session, id, Message::complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_url_joins_base_and_path() {
        let config = ClientConfig {
            base_url: "http://localhost:5268/".into(),
            ..Default::default()
        };
        assert_eq!(config.ask_url(), "http://localhost:5268/api/Tutor/ask");
    }

    #[test]
    fn default_delay_is_twenty_millis() {
        assert_eq!(ClientConfig::default().reveal_delay, Duration::from_millis(20));
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let client = TutorClient::new(ClientConfig::default());
        let mut session = ChatSession::empty();
        session.set_input("   ");

        let mut events = 0;
        let sent = client
            .ask(&mut session, &CancellationToken::new(), |_| events += 1)
            .await;

        assert!(!sent);
        assert_eq!(events, 0);
        assert!(session.messages().is_empty());
    }
}
