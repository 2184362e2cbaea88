//! # List Filters
//!
//! Search box, generation picker and type picker, applied in that order.
//! All three compose; an unset filter matches everything.

use super::pokemon::PokemonSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListFilter {
    /// Matches a substring of the name (case-insensitive) or of the id
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub generation: Option<u8>,
    /// Lowercase API type name
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
}

impl ListFilter {
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().map_or(true, str::is_empty)
            && self.generation.is_none()
            && self.type_name.is_none()
    }

    pub fn matches(&self, pokemon: &PokemonSummary) -> bool {
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            let needle = query.to_lowercase();
            let by_name = pokemon.name.to_lowercase().contains(&needle);
            let by_id = pokemon.id.to_string().contains(query);
            if !by_name && !by_id {
                return false;
            }
        }

        if let Some(generation) = self.generation {
            if pokemon.generation != generation {
                return false;
            }
        }

        if let Some(type_name) = &self.type_name {
            if !pokemon.types.iter().any(|t| t == type_name) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, pokemon: &'a [PokemonSummary]) -> Vec<&'a PokemonSummary> {
        pokemon.iter().filter(|p| self.matches(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: u32, name: &str, types: &[&str], generation: u8) -> PokemonSummary {
        PokemonSummary {
            id,
            name: name.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            sprite: None,
            generation,
        }
    }

    fn dex() -> Vec<PokemonSummary> {
        vec![
            summary(1, "bulbasaur", &["grass", "poison"], 1),
            summary(4, "charmander", &["fire"], 1),
            summary(25, "pikachu", &["electric"], 1),
            summary(152, "chikorita", &["grass"], 2),
            summary(251, "celebi", &["psychic", "grass"], 2),
        ]
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filter = ListFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&dex()).len(), 5);
    }

    #[test]
    fn test_query_matches_name_case_insensitive() {
        let filter = ListFilter {
            query: Some("CH".to_string()),
            ..Default::default()
        };
        let names: Vec<_> = filter.apply(&dex()).iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["charmander", "pikachu", "chikorita"]);
    }

    #[test]
    fn test_query_matches_id_substring() {
        let filter = ListFilter {
            query: Some("25".to_string()),
            ..Default::default()
        };
        let ids: Vec<_> = filter.apply(&dex()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![25, 251]);
    }

    #[test]
    fn test_filters_compose() {
        let filter = ListFilter {
            query: None,
            generation: Some(2),
            type_name: Some("grass".to_string()),
        };
        let ids: Vec<_> = filter.apply(&dex()).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![152, 251]);

        let filter = ListFilter {
            query: Some("bulba".to_string()),
            generation: Some(2),
            type_name: None,
        };
        assert!(filter.apply(&dex()).is_empty());
    }
}
