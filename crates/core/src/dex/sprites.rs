//! # Image & Cry Selection
//!
//! Upstream sprite fields are frequently null, so every image goes through a
//! fallback chain: the preferred style first, then the remaining styles in
//! cycle order. The first non-empty URL wins.

use crate::api::resources::{Cries, SpritePair, Sprites};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpriteStyle {
    /// Official artwork
    #[default]
    Artwork,
    /// Pokémon HOME render
    Home,
    /// Classic in-game front sprite
    Pixel,
}

impl SpriteStyle {
    const CYCLE: [SpriteStyle; 3] = [SpriteStyle::Artwork, SpriteStyle::Home, SpriteStyle::Pixel];

    /// Next style when the user taps the style toggle
    pub fn next(self) -> Self {
        let i = Self::CYCLE.iter().position(|s| *s == self).unwrap_or(0);
        Self::CYCLE[(i + 1) % Self::CYCLE.len()]
    }

    /// This style followed by the others in cycle order
    pub fn fallback_order(self) -> [SpriteStyle; 3] {
        let start = Self::CYCLE.iter().position(|s| *s == self).unwrap_or(0);
        [
            Self::CYCLE[start],
            Self::CYCLE[(start + 1) % 3],
            Self::CYCLE[(start + 2) % 3],
        ]
    }
}

fn non_empty(url: Option<&String>) -> Option<&str> {
    url.map(String::as_str).filter(|u| !u.trim().is_empty())
}

fn pair_url(pair: Option<&SpritePair>, shiny: bool) -> Option<&str> {
    let pair = pair?;
    if shiny {
        non_empty(pair.front_shiny.as_ref())
    } else {
        non_empty(pair.front_default.as_ref())
    }
}

fn style_url(sprites: &Sprites, style: SpriteStyle, shiny: bool) -> Option<&str> {
    let other = sprites.other.as_ref();
    match style {
        SpriteStyle::Artwork => pair_url(other.and_then(|o| o.official_artwork.as_ref()), shiny),
        SpriteStyle::Home => pair_url(other.and_then(|o| o.home.as_ref()), shiny),
        SpriteStyle::Pixel => {
            if shiny {
                non_empty(sprites.front_shiny.as_ref())
            } else {
                non_empty(sprites.front_default.as_ref())
            }
        }
    }
}

/// First available image for `style`, falling back through the other styles
pub fn select_image(sprites: &Sprites, style: SpriteStyle, shiny: bool) -> Option<String> {
    style
        .fallback_order()
        .into_iter()
        .find_map(|s| style_url(sprites, s, shiny))
        .map(str::to_string)
}

/// Default image: official artwork, then HOME, then the pixel sprite
pub fn primary_image(sprites: &Sprites) -> Option<String> {
    select_image(sprites, SpriteStyle::Artwork, false)
}

pub fn shiny_image(sprites: &Sprites) -> Option<String> {
    select_image(sprites, SpriteStyle::Artwork, true)
}

/// Cry URL: latest recording, then the legacy one
pub fn select_cry(cries: Option<&Cries>) -> Option<String> {
    let cries = cries?;
    non_empty(cries.latest.as_ref())
        .or_else(|| non_empty(cries.legacy.as_ref()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::OtherSprites;

    fn pair(default: Option<&str>, shiny: Option<&str>) -> Option<SpritePair> {
        Some(SpritePair {
            front_default: default.map(str::to_string),
            front_shiny: shiny.map(str::to_string),
        })
    }

    fn sprites(artwork: Option<SpritePair>, home: Option<SpritePair>, pixel: Option<&str>) -> Sprites {
        Sprites {
            front_default: pixel.map(str::to_string),
            front_shiny: None,
            other: Some(OtherSprites {
                official_artwork: artwork,
                home,
            }),
        }
    }

    #[test]
    fn test_artwork_wins_when_present() {
        let s = sprites(pair(Some("art"), None), pair(Some("home"), None), Some("pixel"));
        assert_eq!(primary_image(&s).as_deref(), Some("art"));
    }

    #[test]
    fn test_falls_back_in_priority_order() {
        let s = sprites(pair(None, None), pair(Some("home"), None), Some("pixel"));
        assert_eq!(primary_image(&s).as_deref(), Some("home"));

        let s = sprites(None, pair(Some(""), None), Some("pixel"));
        assert_eq!(primary_image(&s).as_deref(), Some("pixel"));

        let s = Sprites::default();
        assert_eq!(primary_image(&s), None);
    }

    #[test]
    fn test_style_selection_wraps_around() {
        let s = sprites(pair(Some("art"), None), None, None);
        assert_eq!(
            select_image(&s, SpriteStyle::Pixel, false).as_deref(),
            Some("art")
        );
        let s = sprites(pair(Some("art"), None), pair(Some("home"), None), None);
        assert_eq!(
            select_image(&s, SpriteStyle::Pixel, false).as_deref(),
            Some("art")
        );
        assert_eq!(
            select_image(&s, SpriteStyle::Home, false).as_deref(),
            Some("home")
        );
    }

    #[test]
    fn test_shiny_chain_uses_shiny_fields() {
        let s = sprites(pair(Some("art"), None), pair(Some("home"), Some("home-shiny")), None);
        assert_eq!(shiny_image(&s).as_deref(), Some("home-shiny"));
    }

    #[test]
    fn test_style_cycle() {
        assert_eq!(SpriteStyle::Artwork.next(), SpriteStyle::Home);
        assert_eq!(SpriteStyle::Home.next(), SpriteStyle::Pixel);
        assert_eq!(SpriteStyle::Pixel.next(), SpriteStyle::Artwork);
    }

    #[test]
    fn test_cry_prefers_latest() {
        let cries = Cries {
            latest: None,
            legacy: Some("legacy.ogg".to_string()),
        };
        assert_eq!(select_cry(Some(&cries)).as_deref(), Some("legacy.ogg"));
        assert_eq!(select_cry(None), None);
    }
}
