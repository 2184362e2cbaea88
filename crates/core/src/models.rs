//! # Pokedex Models
//!
//! Configuration for the generative-language model behind the chat
//! assistant. The assistant talks to Gemini's `generateContent` endpoint
//! with a key read from the environment.

use crate::chat::gemini::GeminiClient;
use crate::error::DexResult;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Configuration for the chat model
///
/// ## Example
/// ```rust,ignore
/// use pokedex_core::models::ModelConfig;
///
/// let config = ModelConfig::new("gemini-2.0-flash");
/// let client = config.create_client()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelConfig {
    /// Model name, e.g. "gemini-2.0-flash"
    pub model: String,
    /// Optional base URL override (proxies, local mocks)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL)
    }
}

impl ModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            base_url: None,
            api_key_env: default_api_key_env(),
        }
    }

    /// Set base URL (for proxies or a local mock)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
    }

    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
    }

    /// Create a Gemini client. A missing key is not an error here; it is
    /// reported when a prompt is sent.
    pub fn create_client(&self) -> DexResult<GeminiClient> {
        GeminiClient::new(self, self.api_key())
    }
}
