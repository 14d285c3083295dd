//! Relay configuration.

/// Default Gemini REST base URL.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default Gemini model.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Settings for the Gemini answer relay.
///
/// The API key is optional here; its absence is reported per request.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Gemini API key, sent as the `key` query parameter.
    pub api_key: Option<String>,
    /// Base URL up to and including the API version segment.
    pub base_url: String,
    /// Model name used in the `generateContent` path.
    pub model: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.into(),
            model: DEFAULT_GEMINI_MODEL.into(),
        }
    }
}

impl RelayConfig {
    /// The configured key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Full `generateContent` endpoint, without the key.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}
