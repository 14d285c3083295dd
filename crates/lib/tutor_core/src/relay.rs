// @zen-component: TUTOR-AnswerRelay
//
//! Answer relay: forwards a learner question to Gemini and returns plain text.
//!
//! `ask` never fails. Every problem (missing key, transport error, unexpected
//! response shape) is turned into a diagnostic string that is shown to the
//! learner in place of an answer:
//!
//! - missing key → `❌ Gemini API key is missing. Please check configuration.`
//! - transport error → `⚠️ Gemini request failed: ...`
//! - JSON without `candidates[0].content.parts[0].text` → `⚠️ Unexpected Gemini response:` + raw body
//! - `text` present but `null` → `⚠️ No answer text found.`
//! - body that is not JSON, or a path step of the wrong JSON type →
//!   `⚠️ Raw Gemini API response:` + raw body

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::RelayConfig;
use crate::models::gemini::GenerateContentRequest;
use crate::prompt::build_prompt;

/// Something that can answer a learner question.
#[async_trait]
pub trait Tutor: Send + Sync {
    /// Answers `question`, or returns a human-readable diagnostic.
    async fn ask(&self, question: &str) -> String;

    /// Whether the credential needed to reach the model is present.
    fn is_configured(&self) -> bool;
}

/// Reasons the relay could not produce a model answer.
///
/// The `Display` form of each variant is the diagnostic returned by `ask`.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("❌ Gemini API key is missing. Please check configuration.")]
    MissingKey,

    #[error("⚠️ Gemini request failed: {0}")]
    Request(reqwest::Error),

    #[error("⚠️ Unexpected Gemini response:\n{0}")]
    UnexpectedShape(String),

    #[error("⚠️ Raw Gemini API response:\n{0}")]
    Malformed(String),

    #[error("⚠️ No answer text found.")]
    NoText,
}

/// Relay backed by the Gemini `generateContent` REST API.
#[derive(Clone, Debug)]
pub struct GeminiRelay {
    client: Client,
    config: RelayConfig,
}

impl GeminiRelay {
    pub fn new(config: RelayConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Builds a relay that reuses an existing HTTP client.
    pub fn with_client(client: Client, config: RelayConfig) -> Self {
        Self { client, config }
    }

    async fn try_ask(&self, question: &str) -> Result<String, RelayError> {
        let api_key = self.config.api_key().ok_or(RelayError::MissingKey)?;

        let prompt = build_prompt(question);
        debug!(model = %self.config.model, question_len = question.len(), "asking Gemini");

        let response = self
            .client
            .post(self.config.generate_content_url())
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::user_text(&prompt))
            .send()
            .await
            .map_err(request_error)?;

        // The body is inspected whatever the status; error payloads are
        // reported through the shape check below.
        let status = response.status();
        let raw = response.text().await.map_err(request_error)?;
        debug!(%status, body_len = raw.len(), "Gemini responded");

        extract_text(&raw)
    }
}

#[async_trait]
impl Tutor for GeminiRelay {
    async fn ask(&self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(e) => {
                match &e {
                    RelayError::MissingKey => warn!("Gemini API key is not configured"),
                    RelayError::Request(err) => warn!(error = %err, "Gemini request failed"),
                    RelayError::UnexpectedShape(_) => warn!("unexpected Gemini response shape"),
                    RelayError::Malformed(_) => warn!("Gemini response could not be read"),
                    RelayError::NoText => warn!("Gemini response carried no answer text"),
                }
                e.to_string()
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.config.api_key().is_some()
    }
}

/// The request URL carries the key, so it is stripped from transport errors.
fn request_error(e: reqwest::Error) -> RelayError {
    RelayError::Request(e.without_url())
}

/// One lookup on the way to the answer text.
#[derive(Clone, Copy)]
enum Step {
    Key(&'static str),
    First,
}

const TEXT_PATH: [Step; 6] = [
    Step::Key("candidates"),
    Step::First,
    Step::Key("content"),
    Step::Key("parts"),
    Step::First,
    Step::Key("text"),
];

/// Pulls `candidates[0].content.parts[0].text` out of a raw Gemini body.
///
/// A missing key or an empty array is an unexpected shape. A step applied to
/// the wrong JSON type (indexing a non-array, a non-string `text`) is treated
/// like an unreadable body. An empty `text` is returned as is.
pub fn extract_text(raw: &str) -> Result<String, RelayError> {
    let malformed = || RelayError::Malformed(raw.to_string());
    let json: Value = serde_json::from_str(raw).map_err(|_| malformed())?;

    let mut node = &json;
    for step in TEXT_PATH {
        let next = match (step, node) {
            (Step::Key(key), Value::Object(fields)) => fields.get(key),
            (Step::First, Value::Array(items)) => items.first(),
            _ => return Err(malformed()),
        };
        node = next.ok_or_else(|| RelayError::UnexpectedShape(raw.to_string()))?;
    }

    match node {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Err(RelayError::NoText),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_candidate_first_part() {
        let raw = r#"{"candidates":[
            {"content":{"parts":[{"text":"first"},{"text":"second"}]}},
            {"content":{"parts":[{"text":"other"}]}}
        ]}"#;
        assert_eq!(extract_text(raw).expect("text"), "first");
    }

    #[test]
    fn missing_candidates_embeds_raw_payload() {
        let raw = r#"{"error":{"code":400,"message":"API key not valid"}}"#;
        let msg = extract_text(raw).unwrap_err().to_string();
        assert!(msg.starts_with("⚠️ Unexpected Gemini response:\n"));
        assert!(msg.ends_with(raw));
    }

    #[test]
    fn empty_candidate_list_is_unexpected() {
        let err = extract_text(r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnexpectedShape(_)));
    }

    #[test]
    fn empty_parts_is_unexpected() {
        let err = extract_text(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap_err();
        assert!(matches!(err, RelayError::UnexpectedShape(_)));
    }

    #[test]
    fn null_text_reports_no_answer() {
        let err = extract_text(r#"{"candidates":[{"content":{"parts":[{"text":null}]}}]}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "⚠️ No answer text found.");
    }

    #[test]
    fn empty_text_is_returned_as_is() {
        let text = extract_text(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(text.expect("text"), "");
    }

    #[test]
    fn non_string_text_is_reported_raw() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":42}]}}]}"#;
        let msg = extract_text(raw).unwrap_err().to_string();
        assert_eq!(msg, format!("⚠️ Raw Gemini API response:\n{raw}"));
    }

    #[test]
    fn wrongly_typed_path_is_reported_raw() {
        for raw in [
            r#"{"candidates":{"content":{}}}"#,
            r#"{"candidates":[{"content":{"parts":"text"}}]}"#,
            r#"{"candidates":["first"]}"#,
            "null",
        ] {
            let err = extract_text(raw).unwrap_err();
            assert!(matches!(err, RelayError::Malformed(_)), "{raw}: {err:?}");
        }
    }

    #[test]
    fn non_json_body_is_returned_raw() {
        let msg = extract_text("<html>bad gateway</html>").unwrap_err().to_string();
        assert_eq!(msg, "⚠️ Raw Gemini API response:\n<html>bad gateway</html>");
    }

    #[tokio::test]
    async fn missing_key_is_a_soft_failure() {
        let relay = GeminiRelay::new(RelayConfig::default());
        assert!(!relay.is_configured());
        assert_eq!(
            relay.ask("What is a stack?").await,
            "❌ Gemini API key is missing. Please check configuration."
        );
    }
}
