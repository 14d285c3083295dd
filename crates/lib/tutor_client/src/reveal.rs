// @zen-component: TUTOR-RevealLoop
//
//! Reveal loop: incremental display of a bot reply.
//!
//! Two sources feed a bot message:
//!
//! - a buffered answer, replayed one character at a time by [`Typewriter`]
//!   and paced by [`reveal_stream`];
//! - a streamed body, decoded and forwarded chunk by chunk by [`chunk_stream`].
//!
//! Both streams check a [`CancellationToken`] before producing each item and
//! end as soon as it fires, dropping any read that is still in flight.

use std::pin::Pin;
use std::time::Duration;

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::format::format_response;

/// Default pause between two revealed characters.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(20);

/// Display state after one more character has been revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealFrame {
    /// Raw answer text revealed so far.
    pub revealed: String,
    /// The character added by this frame.
    pub delta: String,
    /// `revealed` run through [`format_response`].
    pub formatted: String,
}

/// Resumable per-character walk over an answer.
///
/// Each call to `next` reveals one more character; the iterator can be
/// dropped at any point to stop.
#[derive(Debug, Clone)]
pub struct Typewriter {
    answer: String,
    pos: usize,
}

impl Typewriter {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            pos: 0,
        }
    }

    /// Raw text revealed so far.
    pub fn revealed(&self) -> &str {
        &self.answer[..self.pos]
    }
}

impl Iterator for Typewriter {
    type Item = RevealFrame;

    fn next(&mut self) -> Option<RevealFrame> {
        let ch = self.answer[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        let revealed = self.revealed();
        Some(RevealFrame {
            revealed: revealed.to_string(),
            delta: ch.to_string(),
            formatted: format_response(revealed),
        })
    }
}

/// Paced, cancelable reveal of a buffered answer.
///
/// Yields one frame per character with `delay` between frames. Nothing is
/// yielded once `cancel` fires, including while waiting out the delay.
pub fn reveal_stream(
    answer: String,
    delay: Duration,
    cancel: CancellationToken,
) -> impl Stream<Item = RevealFrame> {
    stream::unfold(
        (Typewriter::new(answer), false, cancel),
        move |(mut typewriter, started, cancel)| async move {
            if started && !delay.is_zero() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return None,
                    _ = sleep(delay) => {}
                }
            }
            if cancel.is_cancelled() {
                return None;
            }
            let frame = typewriter.next()?;
            Some((frame, (typewriter, true, cancel)))
        },
    )
}

/// UTF-8 decoder that keeps incomplete sequences between chunks.
#[derive(Debug, Default)]
struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(s) => {
                    out.push_str(s);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // Truncated sequence: wait for the next chunk.
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                    }
                }
            }
        }
    }

    fn finish(&mut self) -> String {
        let tail = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        tail
    }
}

struct ChunkState<S> {
    body: Pin<Box<S>>,
    decoder: Utf8Decoder,
    cancel: CancellationToken,
    done: bool,
}

/// Cancelable text view over a streamed body.
///
/// Each transport chunk becomes one text item (multi-byte characters split
/// across chunks are held back until complete). Every read is raced against
/// `cancel`; when it fires the read is dropped and the stream ends. A
/// transport error is yielded once and ends the stream.
pub fn chunk_stream<S, E>(
    body: S,
    cancel: CancellationToken,
) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    let state = ChunkState {
        body: Box::pin(body),
        decoder: Utf8Decoder::default(),
        cancel,
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if st.done || st.cancel.is_cancelled() {
                return None;
            }

            let next = tokio::select! {
                biased;
                _ = st.cancel.cancelled() => return None,
                next = st.body.next() => next,
            };

            match next {
                Some(Ok(bytes)) => {
                    let text = st.decoder.push(&bytes);
                    if !text.is_empty() {
                        return Some((Ok(text), st));
                    }
                }
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.done = true;
                    let tail = st.decoder.finish();
                    if tail.is_empty() {
                        return None;
                    }
                    return Some((Ok(tail), st));
                }
            }
        }
    })
}
