//! # View Models
//!
//! Transient, API-shaped records built per fetch. Nothing here is cached or
//! persisted.

use super::generation::generation_for;
use super::sprites::{primary_image, select_cry, shiny_image};
use crate::api::resources::{FlavorText, PokemonResource};
use serde::{Deserialize, Serialize};

pub const NO_DESCRIPTION: &str = "Sin descripción disponible";

/// Row of the list screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PokemonSummary {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub generation: u8,
}

impl PokemonSummary {
    pub fn from_resource(resource: &PokemonResource) -> Self {
        Self {
            id: resource.id,
            name: resource.name.clone(),
            types: resource.type_names(),
            sprite: primary_image(&resource.sprites),
            generation: generation_for(resource.id).unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stat {
    pub name: String,
    pub base_stat: u32,
}

/// Flattened evolution-chain node
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvolutionEntry {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    /// Trigger name, e.g. `level-up`, `use-item`, `trade`
    pub method: String,
}

/// Alternate form of the displayed species
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variety {
    /// The form's own pokemon id, used for navigation
    pub id: u32,
    /// Base species id, used for the `#NNN` label
    pub species_id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
}

impl Variety {
    pub fn label(&self) -> String {
        form_label(&self.name)
    }
}

/// Everything the detail screen shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PokemonDetail {
    pub id: u32,
    pub species_id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub shiny_sprite: Option<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub description: String,
    pub stats: Vec<Stat>,
    pub cry: Option<String>,
    pub evolution_chain: Vec<EvolutionEntry>,
    pub varieties: Vec<Variety>,
}

impl PokemonDetail {
    /// Fields that come straight off the pokemon resource. Species-derived
    /// parts start empty and are filled in by the detail loader.
    pub fn from_resource(resource: &PokemonResource) -> Self {
        Self {
            id: resource.id,
            species_id: resource.id,
            name: resource.name.clone(),
            types: resource.type_names(),
            sprite: primary_image(&resource.sprites),
            shiny_sprite: shiny_image(&resource.sprites),
            height_m: decimeters_to_meters(resource.height),
            weight_kg: hectograms_to_kilograms(resource.weight),
            description: NO_DESCRIPTION.to_string(),
            stats: resource
                .stats
                .iter()
                .map(|s| Stat {
                    name: s.stat.name.clone(),
                    base_stat: s.base_stat,
                })
                .collect(),
            cry: select_cry(resource.cries.as_ref()),
            evolution_chain: Vec::new(),
            varieties: Vec::new(),
        }
    }

    /// Chain is only worth showing when there is more than one stage
    pub fn has_evolutions(&self) -> bool {
        self.evolution_chain.len() > 1
    }
}

pub fn decimeters_to_meters(dm: u32) -> f64 {
    dm as f64 / 10.0
}

pub fn hectograms_to_kilograms(hg: u32) -> f64 {
    hg as f64 / 10.0
}

/// `#001`-style label
pub fn dex_number(id: u32) -> String {
    format!("#{:03}", id)
}

/// Short label for a variety: `charizard-mega-x` -> `x`, `pikachu` -> `pikachu`
pub fn form_label(name: &str) -> String {
    let spaced = name.replace('-', " ");
    match spaced.rfind(char::is_whitespace) {
        Some(i) => spaced[i + 1..].to_string(),
        None => spaced,
    }
}

/// First flavor text in `language`, else the first entry at all, else a
/// fixed placeholder. Control whitespace (`\f`, `\n`) collapses to spaces.
pub fn select_description(entries: &[FlavorText], language: &str) -> String {
    entries
        .iter()
        .find(|e| e.language.name == language && !e.flavor_text.trim().is_empty())
        .or_else(|| entries.first())
        .map(|e| clean_flavor_text(&e.flavor_text))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string())
}

fn clean_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
