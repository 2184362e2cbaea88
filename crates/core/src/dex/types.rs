//! # Types & Colors
//!
//! The single type table: badge color, card background and the localized
//! name shown in the type picker. Colors are hex strings from the Tailwind
//! palette the app was styled with.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Badge color for an unrecognized type
pub const FALLBACK_BADGE_COLOR: &str = "#9ca3af";
/// Card background when the primary type is unknown or missing
pub const FALLBACK_CARD_COLOR: &str = "#e7e5e4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    /// All types in picker order
    pub fn all() -> [PokemonType; 18] {
        use PokemonType::*;
        [
            Normal, Fire, Water, Grass, Electric, Ice, Fighting, Poison, Ground, Flying, Psychic,
            Bug, Rock, Ghost, Dragon, Dark, Steel, Fairy,
        ]
    }

    /// API name (lowercase, as PokeAPI spells it)
    pub fn as_str(&self) -> &'static str {
        use PokemonType::*;
        match self {
            Normal => "normal",
            Fire => "fire",
            Water => "water",
            Grass => "grass",
            Electric => "electric",
            Ice => "ice",
            Fighting => "fighting",
            Poison => "poison",
            Ground => "ground",
            Flying => "flying",
            Psychic => "psychic",
            Bug => "bug",
            Rock => "rock",
            Ghost => "ghost",
            Dragon => "dragon",
            Dark => "dark",
            Steel => "steel",
            Fairy => "fairy",
        }
    }

    /// Spanish display name
    pub fn display_name(&self) -> &'static str {
        use PokemonType::*;
        match self {
            Normal => "Normal",
            Fire => "Fuego",
            Water => "Agua",
            Grass => "Planta",
            Electric => "Eléctrico",
            Ice => "Hielo",
            Fighting => "Lucha",
            Poison => "Veneno",
            Ground => "Tierra",
            Flying => "Volador",
            Psychic => "Psíquico",
            Bug => "Bicho",
            Rock => "Roca",
            Ghost => "Fantasma",
            Dragon => "Dragón",
            Dark => "Siniestro",
            Steel => "Acero",
            Fairy => "Hada",
        }
    }

    pub fn badge_color(&self) -> &'static str {
        use PokemonType::*;
        match self {
            Grass => "#22c55e",
            Poison => "#a855f7",
            Fire => "#f97316",
            Water => "#3b82f6",
            Normal => "#9ca3af",
            Flying => "#818cf8",
            Bug => "#84cc16",
            Electric => "#facc15",
            Ground => "#d97706",
            Rock => "#78716c",
            Ice => "#22d3ee",
            Fighting => "#dc2626",
            Psychic => "#ec4899",
            Ghost => "#7e22ce",
            Dragon => "#4f46e5",
            Dark => "#374151",
            Steel => "#94a3b8",
            Fairy => "#f472b6",
        }
    }

    pub fn card_color(&self) -> &'static str {
        use PokemonType::*;
        match self {
            Grass | Poison => "#5eead4",
            Fire => "#fed7aa",
            Water => "#a5f3fc",
            Normal => "#e7e5e4",
            Flying => "#bae6fd",
            Bug => "#d9f99d",
            Electric => "#fef08a",
            Ground => "#fcd34d",
            Rock => "#d6d3d1",
            Ice => "#cffafe",
            Fighting => "#fca5a5",
            Psychic => "#fbcfe8",
            Ghost => "#d8b4fe",
            Dragon => "#a5b4fc",
            Dark => "#6b7280",
            Steel => "#e2e8f0",
            Fairy => "#fce7f3",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PokemonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        PokemonType::all()
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| format!("unknown type: {}", s))
    }
}

/// Badge color for a raw API type name
pub fn type_color(type_name: &str) -> &'static str {
    type_name
        .parse::<PokemonType>()
        .map(|t| t.badge_color())
        .unwrap_or(FALLBACK_BADGE_COLOR)
}

/// Card background, keyed on the first (primary) type
pub fn card_color<S: AsRef<str>>(types: &[S]) -> &'static str {
    types
        .first()
        .and_then(|t| t.as_ref().parse::<PokemonType>().ok())
        .map(|t| t.card_color())
        .unwrap_or(FALLBACK_CARD_COLOR)
}

/// Split `#rrggbb` into components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_api_names() {
        for t in PokemonType::all() {
            assert_eq!(t.as_str().parse::<PokemonType>().unwrap(), t);
        }
        assert_eq!("FIRE".parse::<PokemonType>().unwrap(), PokemonType::Fire);
        assert!("stellar".parse::<PokemonType>().is_err());
    }

    #[test]
    fn test_color_fallbacks() {
        assert_eq!(type_color("grass"), "#22c55e");
        assert_eq!(type_color("stellar"), FALLBACK_BADGE_COLOR);
        assert_eq!(card_color(&["fire", "flying"]), "#fed7aa");
        assert_eq!(card_color::<&str>(&[]), FALLBACK_CARD_COLOR);
        assert_eq!(card_color(&["grass"]), card_color(&["poison"]));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PokemonType::Psychic).unwrap();
        assert_eq!(json, "\"psychic\"");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#22c55e"), Some((0x22, 0xc5, 0x5e)));
        assert_eq!(hex_to_rgb("22c55e"), None);
        assert_eq!(hex_to_rgb("#fff"), None);
    }
}
