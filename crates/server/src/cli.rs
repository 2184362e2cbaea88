//! Terminal output for the CLI subcommands. Type badges and card headers use
//! 24-bit ANSI colors from the type table.

use pokedex_core::dex::pokemon::{dex_number, PokemonDetail};
use pokedex_core::dex::stats::{stat_bar_percent, stat_label, stat_total};
use pokedex_core::dex::types::{card_color, hex_to_rgb, type_color, PokemonType};
use pokedex_core::dex::PokemonSummary;

const BAR_WIDTH: usize = 20;
const RESET: &str = "\x1b[0m";

fn background(hex: &str) -> String {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => format!("\x1b[48;2;{};{};{}m\x1b[30m", r, g, b),
        None => String::new(),
    }
}

fn paint(hex: &str, text: &str) -> String {
    format!("{}{}{}", background(hex), text, RESET)
}

/// `pikachu` -> `Pikachu`, `mr-mime` -> `Mr Mime`
pub fn title_case(name: &str) -> String {
    name.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn type_badge(type_name: &str) -> String {
    let label = type_name
        .parse::<PokemonType>()
        .map(|t| t.display_name().to_string())
        .unwrap_or_else(|_| title_case(type_name));
    paint(type_color(type_name), &format!(" {} ", label))
}

fn badges(types: &[String]) -> String {
    types
        .iter()
        .map(|t| type_badge(t))
        .collect::<Vec<_>>()
        .join(" ")
}

fn marks(favorite: bool, captured: bool) -> String {
    let mut out = String::new();
    if favorite {
        out.push_str(" ★");
    }
    if captured {
        out.push_str(" ◓");
    }
    out
}

pub fn summary_line(summary: &PokemonSummary, favorite: bool, captured: bool) -> String {
    format!(
        "{} {:<14} {}{}",
        dex_number(summary.id),
        title_case(&summary.name),
        badges(&summary.types),
        marks(favorite, captured)
    )
}

pub fn stat_bar(base_stat: u32) -> String {
    let filled = ((stat_bar_percent(base_stat) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn detail_block(detail: &PokemonDetail, favorite: bool, captured: bool) -> String {
    let mut out = Vec::new();
    let header = format!(
        " {} {} ",
        dex_number(detail.id),
        title_case(&detail.name)
    );
    out.push(format!(
        "{}{}",
        paint(card_color(&detail.types), &header),
        marks(favorite, captured)
    ));
    out.push(badges(&detail.types));
    out.push(format!(
        "Altura: {:.1} m   Peso: {:.1} kg",
        detail.height_m, detail.weight_kg
    ));
    out.push(String::new());
    out.push(detail.description.clone());
    out.push(String::new());

    for stat in &detail.stats {
        out.push(format!(
            "{:<12} {:>3} {}",
            stat_label(&stat.name),
            stat.base_stat,
            stat_bar(stat.base_stat)
        ));
    }
    out.push(format!("{:<12} {:>3}", "Total", stat_total(&detail.stats)));

    if detail.has_evolutions() {
        out.push(String::new());
        let chain = detail
            .evolution_chain
            .iter()
            .map(|e| format!("{} ({})", title_case(&e.name), e.method))
            .collect::<Vec<_>>()
            .join(" → ");
        out.push(format!("Evoluciones: {}", chain));
    }

    if !detail.varieties.is_empty() {
        let forms = detail
            .varieties
            .iter()
            .map(|v| format!("{} #{}", v.label(), v.id))
            .collect::<Vec<_>>()
            .join(", ");
        out.push(format!("Formas: {}", forms));
    }

    if let Some(sprite) = &detail.sprite {
        out.push(format!("Imagen: {}", sprite));
    }
    if let Some(cry) = &detail.cry {
        out.push(format!("Grito: {}", cry));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("pikachu"), "Pikachu");
        assert_eq!(title_case("mr-mime"), "Mr Mime");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_stat_bar_is_capped() {
        assert_eq!(stat_bar(0), "░".repeat(BAR_WIDTH));
        assert_eq!(stat_bar(255), "█".repeat(BAR_WIDTH));
        assert_eq!(stat_bar(75).chars().filter(|c| *c == '█').count(), 10);
    }

    #[test]
    fn test_summary_line_marks() {
        let summary = PokemonSummary {
            id: 25,
            name: "pikachu".to_string(),
            types: vec!["electric".to_string()],
            sprite: None,
            generation: 1,
        };
        let line = summary_line(&summary, true, false);
        assert!(line.starts_with("#025 Pikachu"));
        assert!(line.contains("Eléctrico"));
        assert!(line.ends_with(" ★"));
    }
}
