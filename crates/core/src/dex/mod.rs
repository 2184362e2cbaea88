//! # Dex
//!
//! Shared Pokédex utilities: view models, the type table, generation
//! buckets, image fallback, list filters, and the evolution/variety
//! resolvers behind the [`Pokedex`] service.

pub mod evolution;
pub mod filter;
pub mod generation;
pub mod pokemon;
pub mod service;
pub mod sprites;
pub mod stats;
pub mod types;
pub mod varieties;

pub use filter::ListFilter;
pub use generation::{generation_for, GenerationOption, GENERATION_SPAN, MAX_NATIONAL_ID};
pub use pokemon::{EvolutionEntry, PokemonDetail, PokemonSummary, Stat, Variety};
pub use service::{DexOptions, Pokedex};
pub use sprites::SpriteStyle;
pub use types::PokemonType;
