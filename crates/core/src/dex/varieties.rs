//! # Alternate Forms
//!
//! Resolves a species' varieties (megas, regional forms, gigantamax, ...)
//! other than the one currently displayed. Order follows the API; a failed
//! variety is logged and skipped.

use super::pokemon::Variety;
use super::sprites::primary_image;
use crate::api::client::{resource_key, PokemonSource};
use crate::api::resources::SpeciesResource;

pub async fn resolve_varieties(
    source: &dyn PokemonSource,
    species: &SpeciesResource,
    current_id: u32,
) -> Vec<Variety> {
    let mut varieties = Vec::new();

    for variety in &species.varieties {
        let key = resource_key(&variety.pokemon.url).unwrap_or(variety.pokemon.name.as_str());
        if key.is_empty() {
            continue;
        }

        match source.pokemon(key).await {
            Ok(pokemon) if pokemon.id == current_id => {}
            Ok(pokemon) => varieties.push(Variety {
                id: pokemon.id,
                species_id: species.id,
                name: variety.pokemon.name.clone(),
                sprite: primary_image(&pokemon.sprites),
                types: pokemon.type_names(),
            }),
            Err(e) => {
                tracing::warn!(variety = %variety.pokemon.name, error = %e, "Failed to fetch variety");
            }
        }
    }

    varieties
}
