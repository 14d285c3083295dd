//! Gemini `generateContent` request payload.
//!
//! The response side is read as a raw `serde_json::Value` so a shape
//! mismatch can be reported with the payload attached.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
    pub role: &'a str,
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub struct Part<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    /// A single user turn carrying `text`.
    pub fn user_text(text: &'a str) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text }],
            }],
        }
    }
}
