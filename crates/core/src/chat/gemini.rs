//! # Gemini Client
//!
//! One stateless `generateContent` call per chat turn: prompt parts in,
//! first candidate's text out. No streaming, no session.

use crate::error::{DexError, DexResult};
use crate::models::ModelConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Anything that turns prompt parts into text
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, parts: &[String]) -> DexResult<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// Single user turn carrying every part
    pub fn user(parts: &[String]) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: parts
                    .iter()
                    .map(|text| Part {
                        text: Some(text.clone()),
                    })
                    .collect(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateResponse {
    /// Blocked prompt first, then the first candidate's first text part
    pub fn into_text(self) -> DexResult<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(DexError::Blocked { reason });
        }

        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(DexError::EmptyResponse)
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key_env: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &ModelConfig, api_key: Option<String>) -> DexResult<Self> {
        let base_url = config.effective_base_url().to_string();
        let http = reqwest::Client::builder()
            .user_agent("pokedex-core/0.1")
            .build()
            .map_err(|e| DexError::http(base_url.clone(), e))?;

        Ok(Self {
            http,
            base_url,
            model: config.model.clone(),
            api_key_env: config.api_key_env.clone(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Endpoint without the key, safe to log
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, parts: &[String]) -> DexResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| DexError::MissingApiKey {
            env_var: self.api_key_env.clone(),
        })?;

        let endpoint = self.endpoint();
        let url = format!("{}?key={}", endpoint, urlencoding::encode(api_key));
        tracing::debug!(%endpoint, parts = parts.len(), "generateContent");

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest::user(parts))
            .send()
            .await
            .map_err(|e| DexError::http(endpoint.clone(), e.without_url()))?;

        // Gemini reports blocked prompts in a 200 body, but quota and key
        // errors come back as non-2xx with a JSON error body.
        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Status {
                url: endpoint,
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DexError::decode(endpoint, e.without_url()))?;
        body.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let parts = vec!["contexto".to_string(), "Usuario: hola".to_string()];
        let value = serde_json::to_value(GenerateRequest::user(&parts)).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "role": "user",
                    "parts": [{ "text": "contexto" }, { "text": "Usuario: hola" }]
                }]
            })
        );
    }

    #[test]
    fn test_extracts_first_candidate_text() {
        let r = response(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "- Tipo eléctrico" }, { "text": "ignored" }] } },
                { "content": { "parts": [{ "text": "second" }] } }
            ]
        }));
        assert_eq!(r.into_text().unwrap(), "- Tipo eléctrico");
    }

    #[test]
    fn test_blocked_prompt() {
        let r = response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));
        match r.into_text() {
            Err(DexError::Blocked { reason }) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected blocked, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response() {
        assert!(matches!(
            response(json!({})).into_text(),
            Err(DexError::EmptyResponse)
        ));
        assert!(matches!(
            response(json!({ "candidates": [{ "content": { "parts": [{ "text": "  " }] } }] }))
                .into_text(),
            Err(DexError::EmptyResponse)
        ));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let config = ModelConfig::default().with_base_url("http://127.0.0.1:1");
        let client = GeminiClient::new(&config, None).unwrap();
        assert!(!client.has_api_key());
        let err = client.generate(&["hola".to_string()]).await.unwrap_err();
        assert!(matches!(err, DexError::MissingApiKey { .. }));
    }

    #[test]
    fn test_endpoint_has_no_key() {
        let config = ModelConfig::default();
        let client = GeminiClient::new(&config, Some("secret".to_string())).unwrap();
        let endpoint = client.endpoint();
        assert!(endpoint.ends_with("/v1beta/models/gemini-2.0-flash:generateContent"));
        assert!(!endpoint.contains("secret"));
    }
}
