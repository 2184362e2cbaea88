//! # PokeAPI Client
//!
//! Thin `reqwest` wrapper over the read-only PokeAPI v2 endpoints.

use super::resources::{EvolutionChainResource, PokemonResource, ResourceList, SpeciesResource};
use crate::error::{DexError, DexResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Where Pokémon data comes from.
///
/// Resources are addressed by key: a numeric id or a lowercase name, exactly
/// as PokeAPI accepts them in its paths.
#[async_trait]
pub trait PokemonSource: Send + Sync {
    async fn list_pokemon(&self, limit: u32) -> DexResult<ResourceList>;
    async fn pokemon(&self, key: &str) -> DexResult<PokemonResource>;
    async fn species(&self, key: &str) -> DexResult<SpeciesResource>;
    async fn evolution_chain(&self, key: &str) -> DexResult<EvolutionChainResource>;
}

/// Extract the trailing key from a PokeAPI resource URL.
///
/// `https://pokeapi.co/api/v2/pokemon/10034/` -> `10034`
pub fn resource_key(url: &str) -> Option<&str> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|k| !k.is_empty() && !k.contains(':'))
}

pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl PokeApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> DexResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let mut builder = reqwest::Client::builder().user_agent("pokedex-core/0.1");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| DexError::http(base_url.clone(), e))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DexResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DexError::http(url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DexError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DexError::http(url.clone(), e))?;
        serde_json::from_slice(&body).map_err(|e| DexError::decode(url, e))
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn list_pokemon(&self, limit: u32) -> DexResult<ResourceList> {
        self.get_json(&format!("pokemon?limit={}", limit)).await
    }

    async fn pokemon(&self, key: &str) -> DexResult<PokemonResource> {
        self.get_json(&format!("pokemon/{}", urlencoding::encode(key)))
            .await
    }

    async fn species(&self, key: &str) -> DexResult<SpeciesResource> {
        self.get_json(&format!("pokemon-species/{}", urlencoding::encode(key)))
            .await
    }

    async fn evolution_chain(&self, key: &str) -> DexResult<EvolutionChainResource> {
        self.get_json(&format!("evolution-chain/{}", urlencoding::encode(key)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_key() {
        assert_eq!(
            resource_key("https://pokeapi.co/api/v2/pokemon/10034/"),
            Some("10034")
        );
        assert_eq!(
            resource_key("https://pokeapi.co/api/v2/evolution-chain/1"),
            Some("1")
        );
        assert_eq!(resource_key(""), None);
        assert_eq!(resource_key("https://"), None);
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = PokeApiClient::new("http://localhost:9000/api/v2/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000/api/v2");
    }
}
