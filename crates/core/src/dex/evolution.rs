//! # Evolution Chain Resolution
//!
//! Walks the evolution tree depth-first, pre-order, fetching each node's
//! pokemon resource and emitting a flat list. Branches (Eevee, Tyrogue, ...)
//! are linearized child by child with no markers.
//!
//! A node whose fetch fails is logged and dropped together with everything
//! below it. Nodes that resolve to a form id above the national range are
//! skipped but their children are still visited.

use super::generation::is_national_id;
use super::pokemon::EvolutionEntry;
use super::sprites::primary_image;
use crate::api::client::{resource_key, PokemonSource};
use crate::api::resources::{ChainLink, SpeciesResource};

/// Resolve a chain tree into its flat, ordered entries
pub async fn resolve_evolution_chain(
    source: &dyn PokemonSource,
    root: &ChainLink,
) -> Vec<EvolutionEntry> {
    let mut entries = Vec::new();
    // Explicit stack instead of async recursion; children are pushed in
    // reverse so they pop in API order.
    let mut stack: Vec<&ChainLink> = vec![root];

    while let Some(node) = stack.pop() {
        let species_name = node.species.name.as_str();
        let pokemon = match source.pokemon(species_name).await {
            Ok(pokemon) => pokemon,
            Err(e) => {
                tracing::warn!(species = %species_name, error = %e, "Dropping evolution branch");
                continue;
            }
        };

        if is_national_id(pokemon.id) {
            entries.push(EvolutionEntry {
                id: pokemon.id,
                name: species_name.to_string(),
                sprite: primary_image(&pokemon.sprites),
                types: pokemon.type_names(),
                method: node.trigger_name(),
            });
        }

        stack.extend(node.evolves_to.iter().rev());
    }

    entries
}

/// Fetch the species' chain resource and resolve it. Any failure yields an
/// empty chain.
pub async fn load_evolution_chain(
    source: &dyn PokemonSource,
    species: &SpeciesResource,
) -> Vec<EvolutionEntry> {
    let Some(key) = species
        .evolution_chain
        .as_ref()
        .and_then(|c| resource_key(&c.url))
    else {
        tracing::debug!(species = %species.name, "Species has no evolution chain");
        return Vec::new();
    };

    match source.evolution_chain(key).await {
        Ok(chain) => resolve_evolution_chain(source, &chain.chain).await,
        Err(e) => {
            tracing::warn!(species = %species.name, error = %e, "Failed to load evolution chain");
            Vec::new()
        }
    }
}
