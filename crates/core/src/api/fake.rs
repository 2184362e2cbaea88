//! In-memory [`PokemonSource`] for tests.

use super::client::PokemonSource;
use super::resources::*;
use crate::error::{DexError, DexResult};
use async_trait::async_trait;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeSource {
    pub pokemon: HashMap<String, PokemonResource>,
    pub species: HashMap<String, SpeciesResource>,
    pub chains: HashMap<String, EvolutionChainResource>,
    pub failing: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

fn not_found(path: String) -> DexError {
    DexError::Status {
        url: path,
        status: 404,
    }
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pokemon under both its id and its name
    pub fn with_pokemon(mut self, id: u32, name: &str, types: &[&str]) -> Self {
        let resource = pokemon_fixture(id, name, types);
        self.pokemon.insert(id.to_string(), resource.clone());
        self.pokemon.insert(name.to_string(), resource);
        self
    }

    pub fn with_species(mut self, species: SpeciesResource) -> Self {
        self.species.insert(species.id.to_string(), species);
        self
    }

    pub fn with_chain(mut self, chain: EvolutionChainResource) -> Self {
        self.chains.insert(chain.id.to_string(), chain);
        self
    }

    /// Make every lookup of `key` fail with HTTP 500
    pub fn failing(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, path: &str, key: &str) -> DexResult<()> {
        self.calls.lock().unwrap().push(format!("{}/{}", path, key));
        if self.failing.contains(key) {
            return Err(DexError::Status {
                url: format!("{}/{}", path, key),
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PokemonSource for FakeSource {
    async fn list_pokemon(&self, limit: u32) -> DexResult<ResourceList> {
        let mut ids: Vec<u32> = self
            .pokemon
            .keys()
            .filter_map(|k| k.parse::<u32>().ok())
            .collect();
        ids.sort_unstable();
        let results = ids
            .into_iter()
            .take(limit as usize)
            .map(|id| NamedResource {
                name: self.pokemon[&id.to_string()].name.clone(),
                url: format!("https://pokeapi.co/api/v2/pokemon/{}/", id),
            })
            .collect::<Vec<_>>();
        Ok(ResourceList {
            count: results.len() as u32,
            results,
        })
    }

    async fn pokemon(&self, key: &str) -> DexResult<PokemonResource> {
        self.record("pokemon", key)?;
        self.pokemon
            .get(key)
            .cloned()
            .ok_or_else(|| not_found(format!("pokemon/{}", key)))
    }

    async fn species(&self, key: &str) -> DexResult<SpeciesResource> {
        self.record("pokemon-species", key)?;
        self.species
            .get(key)
            .cloned()
            .ok_or_else(|| not_found(format!("pokemon-species/{}", key)))
    }

    async fn evolution_chain(&self, key: &str) -> DexResult<EvolutionChainResource> {
        self.record("evolution-chain", key)?;
        self.chains
            .get(key)
            .cloned()
            .ok_or_else(|| not_found(format!("evolution-chain/{}", key)))
    }
}

pub fn pokemon_fixture(id: u32, name: &str, types: &[&str]) -> PokemonResource {
    let types: Vec<serde_json::Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({ "slot": i + 1, "type": { "name": t, "url": "" } }))
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": types,
        "sprites": {
            "front_default": format!("pixel/{}.png", id),
            "front_shiny": format!("pixel/shiny/{}.png", id),
            "other": {
                "official-artwork": {
                    "front_default": format!("artwork/{}.png", id),
                    "front_shiny": format!("artwork/shiny/{}.png", id)
                }
            }
        },
        "stats": [
            { "base_stat": 45, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 49, "stat": { "name": "attack", "url": "" } }
        ],
        "cries": { "latest": format!("cries/{}.ogg", id), "legacy": null },
        "species": { "name": name, "url": format!("https://pokeapi.co/api/v2/pokemon-species/{}/", id) }
    }))
    .unwrap()
}

/// Build a chain node: `link("eevee", None, vec![...])`
pub fn link(name: &str, trigger: Option<&str>, children: Vec<ChainLink>) -> ChainLink {
    ChainLink {
        species: NamedResource {
            name: name.to_string(),
            url: String::new(),
        },
        evolution_details: trigger
            .map(|t| {
                vec![EvolutionDetail {
                    trigger: Some(NamedResource {
                        name: t.to_string(),
                        url: String::new(),
                    }),
                }]
            })
            .unwrap_or_default(),
        evolves_to: children,
    }
}
