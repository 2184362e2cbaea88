//! # Pokedex Core
//!
//! Data layer for the Pokédex app: the PokeAPI client, list and detail
//! composition, evolution and alternate-form resolution, persisted
//! collections, and the chat assistant that knows which Pokémon is on
//! screen.
//!
//! ## Architecture
//!
//! - `api/` - PokeAPI wire types and the [`api::PokemonSource`] seam
//! - `dex/` - View models, lookup tables and the [`dex::Pokedex`] service
//! - `chat/` - Current-Pokémon context, prompt composition, Gemini client
//! - `state/` - SQLite key-value store and the favorites/captured sets
//! - `config` - Effective configuration from file and environment
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pokedex_core::config::DexConfig;
//! use pokedex_core::dex::Pokedex;
//! use std::sync::Arc;
//!
//! let config = DexConfig::load().await;
//! let dex = Pokedex::new(Arc::new(config.create_source()?), config.dex_options());
//! let pikachu = dex.fetch_detail("25").await?;
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod dex;
pub mod error;
pub mod models;
pub mod state;

pub use error::{DexError, DexResult};
