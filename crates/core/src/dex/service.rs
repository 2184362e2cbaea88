//! # Pokedex Service
//!
//! The two screen-level operations: the list fetch and the detail
//! composition. Both sit on a [`PokemonSource`] and recompute everything on
//! every call.

use super::evolution::load_evolution_chain;
use super::generation::is_national_id;
use super::pokemon::{select_description, PokemonDetail, PokemonSummary};
use super::varieties::resolve_varieties;
use crate::api::client::{resource_key, PokemonSource};
use crate::error::DexResult;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

/// Knobs for the service, usually taken from `DexConfig`
#[derive(Debug, Clone)]
pub struct DexOptions {
    /// How many entries the list fetch asks for
    pub list_limit: u32,
    /// Concurrent per-item fetches during the list fan-out
    pub concurrency: usize,
    /// Preferred flavor-text language
    pub language: String,
}

impl Default for DexOptions {
    fn default() -> Self {
        Self {
            list_limit: super::generation::MAX_NATIONAL_ID,
            concurrency: 32,
            language: "es".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Pokedex {
    source: Arc<dyn PokemonSource>,
    options: DexOptions,
}

impl Pokedex {
    pub fn new(source: Arc<dyn PokemonSource>, options: DexOptions) -> Self {
        Self { source, options }
    }

    pub fn source(&self) -> &dyn PokemonSource {
        self.source.as_ref()
    }

    pub fn options(&self) -> &DexOptions {
        &self.options
    }

    /// List fetch: one index request, then a bounded fan-out of per-item
    /// fetches. API order is preserved; entries that fail or fall outside
    /// the national range are dropped.
    #[tracing::instrument(skip(self), fields(limit = self.options.list_limit))]
    pub async fn fetch_summaries(&self) -> DexResult<Vec<PokemonSummary>> {
        let index = self.source.list_pokemon(self.options.list_limit).await?;
        let requested = index.results.len();

        let summaries: Vec<Option<PokemonSummary>> = stream::iter(index.results)
            .map(|entry| {
                let source = Arc::clone(&self.source);
                async move {
                    let key = resource_key(&entry.url)
                        .unwrap_or(entry.name.as_str())
                        .to_string();
                    match source.pokemon(&key).await {
                        Ok(pokemon) if is_national_id(pokemon.id) => {
                            Some(PokemonSummary::from_resource(&pokemon))
                        }
                        Ok(_) => None,
                        Err(e) => {
                            tracing::warn!(pokemon = %key, error = %e, "Skipping list entry");
                            None
                        }
                    }
                }
            })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let summaries: Vec<PokemonSummary> = summaries.into_iter().flatten().collect();
        tracing::info!(requested, loaded = summaries.len(), "Pokédex list loaded");
        Ok(summaries)
    }

    /// Detail composition: pokemon -> species -> (evolution chain, varieties).
    ///
    /// Only the pokemon fetch is fatal. A failed species fetch leaves the
    /// description, chain and forms at their empty defaults.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_detail(&self, key: &str) -> DexResult<PokemonDetail> {
        let pokemon = self.source.pokemon(key).await?;
        let mut detail = PokemonDetail::from_resource(&pokemon);

        let species_key = pokemon
            .species
            .as_ref()
            .and_then(|s| resource_key(&s.url).map(str::to_string))
            .unwrap_or_else(|| pokemon.id.to_string());

        let species = match self.source.species(&species_key).await {
            Ok(species) => species,
            Err(e) => {
                tracing::warn!(pokemon = %pokemon.name, error = %e, "Species fetch failed");
                return Ok(detail);
            }
        };

        detail.species_id = species.id;
        detail.description = select_description(&species.flavor_text_entries, &self.options.language);

        let source = self.source.as_ref();
        let (chain, varieties) = futures::join!(
            load_evolution_chain(source, &species),
            resolve_varieties(source, &species, pokemon.id)
        );
        detail.evolution_chain = chain;
        detail.varieties = varieties;

        tracing::debug!(
            id = detail.id,
            evolutions = detail.evolution_chain.len(),
            varieties = detail.varieties.len(),
            "Detail resolved"
        );
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{link, FakeSource};
    use crate::api::resources::{
        ApiUrl, EvolutionChainResource, FlavorText, NamedResource, SpeciesResource,
        SpeciesVariety,
    };

    fn pokedex(source: FakeSource) -> Pokedex {
        Pokedex::new(Arc::new(source), DexOptions::default())
    }

    fn pikachu_world() -> FakeSource {
        FakeSource::new()
            .with_pokemon(172, "pichu", &["electric"])
            .with_pokemon(25, "pikachu", &["electric"])
            .with_pokemon(26, "raichu", &["electric"])
            .with_pokemon(10100, "raichu-alola", &["electric", "psychic"])
            .with_species(SpeciesResource {
                id: 25,
                name: "pikachu".to_string(),
                flavor_text_entries: vec![FlavorText {
                    flavor_text: "Cuando se enfada,\u{c}descarga electricidad.".to_string(),
                    language: NamedResource {
                        name: "es".to_string(),
                        url: String::new(),
                    },
                }],
                evolution_chain: Some(ApiUrl {
                    url: "https://pokeapi.co/api/v2/evolution-chain/10/".to_string(),
                }),
                varieties: vec![SpeciesVariety {
                    is_default: true,
                    pokemon: NamedResource {
                        name: "pikachu".to_string(),
                        url: "https://pokeapi.co/api/v2/pokemon/25/".to_string(),
                    },
                }],
            })
            .with_chain(EvolutionChainResource {
                id: 10,
                chain: link(
                    "pichu",
                    None,
                    vec![link(
                        "pikachu",
                        Some("level-up"),
                        vec![link("raichu", Some("use-item"), vec![])],
                    )],
                ),
            })
    }

    #[tokio::test]
    async fn test_fetch_detail_composes_everything() {
        let dex = pokedex(pikachu_world());
        let detail = dex.fetch_detail("25").await.unwrap();

        assert_eq!(detail.name, "pikachu");
        assert_eq!(detail.species_id, 25);
        assert_eq!(detail.description, "Cuando se enfada, descarga electricidad.");
        let chain: Vec<_> = detail.evolution_chain.iter().map(|e| e.id).collect();
        assert_eq!(chain, vec![172, 25, 26]);
        assert!(detail.varieties.is_empty());
        assert!(detail.has_evolutions());
    }

    #[tokio::test]
    async fn test_missing_species_keeps_partial_detail() {
        let dex = pokedex(FakeSource::new().with_pokemon(26, "raichu", &["electric"]));
        let detail = dex.fetch_detail("raichu").await.unwrap();
        assert_eq!(detail.id, 26);
        assert_eq!(detail.description, crate::dex::pokemon::NO_DESCRIPTION);
        assert!(detail.evolution_chain.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_pokemon_is_an_error() {
        let dex = pokedex(FakeSource::new());
        let err = dex.fetch_detail("missingno").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_summaries_keeps_order_and_drops_forms() {
        let dex = pokedex(pikachu_world().failing("26"));
        let summaries = dex.fetch_summaries().await.unwrap();
        let ids: Vec<_> = summaries.iter().map(|s| s.id).collect();
        // 26 fails, 10100 is a form
        assert_eq!(ids, vec![25, 172]);
        assert!(summaries.iter().all(|s| s.generation >= 1));
    }
}
