//! # Config API
//!
//! Read and patch `.pokedex/config.json`. Changes apply on the next start;
//! the response shows both the stored file and what is running now.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use pokedex_core::config::{DexConfig, PersistedConfig};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{ApiError, ApiResult};
use crate::state::SharedState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ConfigResponse {
    /// Keys stored in the config file
    #[schema(value_type = Object)]
    pub stored: PersistedConfig,
    /// Effective configuration of the running process
    #[schema(value_type = Object)]
    pub running: DexConfig,
    pub chat_ready: bool,
}

/// Any subset of the stored keys
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ConfigPatch {
    pub pokeapi_base_url: Option<String>,
    pub list_limit: Option<u32>,
    pub concurrency: Option<usize>,
    pub language: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub gemini_model: Option<String>,
    pub gemini_base_url: Option<String>,
}

impl From<ConfigPatch> for PersistedConfig {
    fn from(patch: ConfigPatch) -> Self {
        PersistedConfig {
            pokeapi_base_url: patch.pokeapi_base_url,
            list_limit: patch.list_limit,
            concurrency: patch.concurrency,
            language: patch.language,
            request_timeout_secs: patch.request_timeout_secs,
            gemini_model: patch.gemini_model,
            gemini_base_url: patch.gemini_base_url,
        }
    }
}

pub fn config_routes() -> Router<SharedState> {
    Router::new().route("/", get(get_config).patch(update_config))
}

fn response(stored: PersistedConfig, state: &SharedState) -> ConfigResponse {
    ConfigResponse {
        stored,
        chat_ready: state.config.chat.api_key().is_some(),
        running: state.config.clone(),
    }
}

/// Get current configuration
#[utoipa::path(
    get,
    path = "/api/v1/config",
    tag = "config",
    responses((status = 200, description = "Stored and running configuration", body = ConfigResponse))
)]
pub async fn get_config(State(state): State<SharedState>) -> Json<ConfigResponse> {
    Json(response(PersistedConfig::load().await, &state))
}

/// Update configuration (partial merge)
#[utoipa::path(
    patch,
    path = "/api/v1/config",
    tag = "config",
    request_body = ConfigPatch,
    responses(
        (status = 200, description = "Stored and running configuration", body = ConfigResponse),
        (status = 500, description = "Config could not be written", body = super::ApiResponse)
    )
)]
pub async fn update_config(
    State(state): State<SharedState>,
    Json(updates): Json<ConfigPatch>,
) -> ApiResult<ConfigResponse> {
    let mut stored = PersistedConfig::load().await;
    stored.merge(updates.into());

    if let Err(e) = stored.save().await {
        eprintln!("Failed to save config: {}", e);
        return Err(ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("Failed to save config: {}", e),
        });
    }

    println!("⚙️ Config updated; restart to apply");
    Ok(Json(response(stored, &state)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_converts_only_given_keys() {
        let patch: ConfigPatch = serde_json::from_str(r#"{ "language": "en" }"#).unwrap();
        let persisted: PersistedConfig = patch.into();
        assert_eq!(persisted.language.as_deref(), Some("en"));
        assert!(persisted.gemini_model.is_none());
    }
}
