//! # PokeAPI
//!
//! Wire types and the HTTP client behind the [`PokemonSource`] seam.

pub mod client;
pub mod resources;

#[cfg(any(test, feature = "test-util"))]
pub mod fake;

pub use client::{resource_key, PokeApiClient, PokemonSource, DEFAULT_BASE_URL};
pub use resources::{
    ChainLink, EvolutionChainResource, NamedResource, PokemonResource, ResourceList,
    SpeciesResource,
};
