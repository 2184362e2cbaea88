//! # Errors
//!
//! One error type for everything that can go wrong talking to PokeAPI or the
//! generative-language endpoint. Callers either log it and fall back, or turn
//! it into an inline message with [`DexError::user_message`].

use thiserror::Error;

pub type DexResult<T> = Result<T, DexError>;

#[derive(Debug, Error)]
pub enum DexError {
    /// Transport failure (DNS, connect, TLS, body read)
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body was not the JSON shape we expected
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("missing API key: set {env_var}")]
    MissingApiKey { env_var: String },

    /// The model refused the prompt
    #[error("prompt blocked: {reason}")]
    Blocked { reason: String },

    #[error("the model returned no text")]
    EmptyResponse,

    #[error("image generation is disabled")]
    ImagesDisabled,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl DexError {
    pub(crate) fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        DexError::Http {
            url: url.into(),
            source,
        }
    }

    pub(crate) fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        DexError::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the upstream said the resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, DexError::Status { status: 404, .. })
    }

    /// Short string suitable for showing inline under the chat box or in
    /// place of a detail view.
    pub fn user_message(&self) -> String {
        match self {
            DexError::MissingApiKey { env_var } => format!("Falta {} en .env", env_var),
            DexError::Blocked { reason } => format!("Prompt bloqueado: {}", reason),
            DexError::EmptyResponse => "No se recibió texto del modelo.".to_string(),
            DexError::ImagesDisabled => {
                "La generación de imágenes está desactivada por ahora.".to_string()
            }
            DexError::Status { status: 404, .. } => "Pokémon no encontrado".to_string(),
            DexError::Http { .. } | DexError::Status { .. } => {
                "No se pudo cargar la información. Verifica tu conexión a internet.".to_string()
            }
            other => other.to_string(),
        }
    }
}
