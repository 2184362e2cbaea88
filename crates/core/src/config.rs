//! # Configuration
//!
//! `.pokedex/config.json` holds a sparse [`PersistedConfig`]; only the keys a
//! user actually changed are written. [`DexConfig`] is the effective view:
//! defaults, then the file, then environment overrides.

use crate::api::{PokeApiClient, DEFAULT_BASE_URL};
use crate::dex::generation::MAX_NATIONAL_ID;
use crate::dex::DexOptions;
use crate::error::DexResult;
use crate::models::{ModelConfig, DEFAULT_MODEL};
use crate::state::io::{get_runtime_path, read_optional, write_file};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.json";
pub const POKEAPI_BASE_URL_ENV: &str = "POKEAPI_BASE_URL";
pub const GEMINI_MODEL_ENV: &str = "GEMINI_MODEL";

const DEFAULT_CONCURRENCY: usize = 32;
const DEFAULT_LANGUAGE: &str = "es";

/// On-disk configuration. Every key is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pokeapi_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
    /// Preferred flavor-text language, e.g. "es"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini_base_url: Option<String>,
}

impl PersistedConfig {
    pub fn default_path() -> PathBuf {
        get_runtime_path().join(CONFIG_FILE)
    }

    /// Load from the runtime directory
    pub async fn load() -> Self {
        Self::load_from(Self::default_path()).await
    }

    /// Missing or unreadable files yield the empty config
    pub async fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match read_optional(path).await {
            Ok(Some(content)) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring malformed config");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read config");
                Self::default()
            }
        }
    }

    pub async fn save(&self) -> Result<()> {
        self.save_to(Self::default_path()).await
    }

    pub async fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        write_file(path, &content).await
    }

    /// Overlay the keys present in `other`
    pub fn merge(&mut self, other: PersistedConfig) {
        if other.pokeapi_base_url.is_some() {
            self.pokeapi_base_url = other.pokeapi_base_url;
        }
        if other.list_limit.is_some() {
            self.list_limit = other.list_limit;
        }
        if other.concurrency.is_some() {
            self.concurrency = other.concurrency;
        }
        if other.language.is_some() {
            self.language = other.language;
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.gemini_model.is_some() {
            self.gemini_model = other.gemini_model;
        }
        if other.gemini_base_url.is_some() {
            self.gemini_base_url = other.gemini_base_url;
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DexConfig {
    pub pokeapi_base_url: String,
    pub list_limit: u32,
    pub concurrency: usize,
    pub language: String,
    pub request_timeout_secs: Option<u64>,
    pub chat: ModelConfig,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            pokeapi_base_url: DEFAULT_BASE_URL.to_string(),
            list_limit: MAX_NATIONAL_ID,
            concurrency: DEFAULT_CONCURRENCY,
            language: DEFAULT_LANGUAGE.to_string(),
            request_timeout_secs: None,
            chat: ModelConfig::new(DEFAULT_MODEL),
        }
    }
}

impl DexConfig {
    /// Defaults overlaid with the persisted file and the process environment
    pub async fn load() -> Self {
        let persisted = PersistedConfig::load().await;
        let mut config = Self::from_persisted(&persisted);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn from_persisted(persisted: &PersistedConfig) -> Self {
        let mut config = Self::default();
        if let Some(url) = &persisted.pokeapi_base_url {
            config.pokeapi_base_url = url.clone();
        }
        if let Some(limit) = persisted.list_limit {
            config.list_limit = limit;
        }
        if let Some(concurrency) = persisted.concurrency {
            config.concurrency = concurrency.max(1);
        }
        if let Some(language) = &persisted.language {
            config.language = language.clone();
        }
        config.request_timeout_secs = persisted.request_timeout_secs;
        if let Some(model) = &persisted.gemini_model {
            config.chat.model = model.clone();
        }
        if let Some(url) = &persisted.gemini_base_url {
            config.chat = config.chat.with_base_url(url.clone());
        }
        config
    }

    /// Environment wins over the file. `lookup` is `std::env::var` outside
    /// of tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(POKEAPI_BASE_URL_ENV) {
            self.pokeapi_base_url = url;
        }
        if let Some(model) = non_empty(GEMINI_MODEL_ENV) {
            self.chat.model = model;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn dex_options(&self) -> DexOptions {
        DexOptions {
            list_limit: self.list_limit,
            concurrency: self.concurrency,
            language: self.language.clone(),
        }
    }

    pub fn create_source(&self) -> DexResult<PokeApiClient> {
        PokeApiClient::new(self.pokeapi_base_url.clone(), self.request_timeout())
    }
}
