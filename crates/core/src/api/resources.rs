//! # PokeAPI Resources
//!
//! Wire shapes for the handful of PokeAPI v2 resources we read. Every field
//! is optional or defaulted: upstream data is treated as opaque JSON and a
//! missing field must never fail the whole decode.

use serde::{Deserialize, Serialize};

/// `{ "name": ..., "url": ... }` reference used all over PokeAPI
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Paged list returned by `/pokemon?limit=N`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PokemonResource {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    /// Decimeters
    #[serde(default)]
    pub height: u32,
    /// Hectograms
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub stats: Vec<StatSlot>,
    #[serde(default)]
    pub cries: Option<Cries>,
    #[serde(default)]
    pub species: Option<NamedResource>,
}

impl PokemonResource {
    /// Lowercase type names in slot order
    pub fn type_names(&self) -> Vec<String> {
        self.types.iter().map(|t| t.kind.name.clone()).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSlot {
    #[serde(default)]
    pub slot: u8,
    #[serde(rename = "type", default)]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatSlot {
    #[serde(default)]
    pub base_stat: u32,
    #[serde(default)]
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cries {
    #[serde(default)]
    pub latest: Option<String>,
    #[serde(default)]
    pub legacy: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<SpritePair>,
    #[serde(default)]
    pub home: Option<SpritePair>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpritePair {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesResource {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    #[serde(default)]
    pub evolution_chain: Option<ApiUrl>,
    #[serde(default)]
    pub varieties: Vec<SpeciesVariety>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlavorText {
    #[serde(default)]
    pub flavor_text: String,
    #[serde(default)]
    pub language: NamedResource,
}

/// Bare `{ "url": ... }` pointer (the species' evolution chain)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiUrl {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeciesVariety {
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub pokemon: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionChainResource {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub chain: ChainLink,
}

/// One node of the evolution tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainLink {
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

impl ChainLink {
    /// Name of the first trigger, `level-up` when the API gives none
    pub fn trigger_name(&self) -> String {
        self.evolution_details
            .first()
            .and_then(|d| d.trigger.as_ref())
            .map(|t| t.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "level-up".to_string())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub trigger: Option<NamedResource>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pokemon_decodes_with_missing_fields() {
        let value = json!({ "id": 25, "name": "pikachu" });
        let pokemon: PokemonResource = serde_json::from_value(value).unwrap();
        assert_eq!(pokemon.id, 25);
        assert!(pokemon.types.is_empty());
        assert!(pokemon.sprites.other.is_none());
        assert!(pokemon.cries.is_none());
    }

    #[test]
    fn test_pokemon_decodes_artwork_and_types() {
        let value = json!({
            "id": 1,
            "name": "bulbasaur",
            "height": 7,
            "weight": 69,
            "types": [
                { "slot": 1, "type": { "name": "grass", "url": "" } },
                { "slot": 2, "type": { "name": "poison", "url": "" } }
            ],
            "sprites": {
                "front_default": "front.png",
                "other": {
                    "official-artwork": { "front_default": "art.png", "front_shiny": null }
                }
            }
        });
        let pokemon: PokemonResource = serde_json::from_value(value).unwrap();
        assert_eq!(pokemon.type_names(), vec!["grass", "poison"]);
        let art = pokemon.sprites.other.unwrap().official_artwork.unwrap();
        assert_eq!(art.front_default.as_deref(), Some("art.png"));
        assert!(art.front_shiny.is_none());
    }

    #[test]
    fn test_chain_trigger_defaults_to_level_up() {
        let root: ChainLink = serde_json::from_value(json!({
            "species": { "name": "eevee", "url": "" },
            "evolution_details": [],
            "evolves_to": [{
                "species": { "name": "vaporeon", "url": "" },
                "evolution_details": [{ "trigger": { "name": "use-item", "url": "" } }],
                "evolves_to": []
            }]
        }))
        .unwrap();
        assert_eq!(root.trigger_name(), "level-up");
        assert_eq!(root.evolves_to[0].trigger_name(), "use-item");
    }
}
