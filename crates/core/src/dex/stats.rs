//! Base-stat presentation helpers.

use super::pokemon::Stat;

/// Value that fills a stat bar completely
pub const STAT_BAR_MAX: u32 = 150;

/// Spanish label for an API stat name; unknown names pass through
pub fn stat_label(name: &str) -> &str {
    match name {
        "hp" => "PS",
        "attack" => "Ataque",
        "defense" => "Defensa",
        "special-attack" => "Ataque Esp.",
        "special-defense" => "Defensa Esp.",
        "speed" => "Velocidad",
        other => other,
    }
}

pub fn stat_total(stats: &[Stat]) -> u32 {
    stats.iter().map(|s| s.base_stat).sum()
}

/// Bar fill in percent, capped at 100
pub fn stat_bar_percent(base_stat: u32) -> f64 {
    (base_stat as f64 / STAT_BAR_MAX as f64 * 100.0).min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(stat_label("hp"), "PS");
        assert_eq!(stat_label("special-defense"), "Defensa Esp.");
        assert_eq!(stat_label("accuracy"), "accuracy");
    }

    #[test]
    fn test_total_and_bar() {
        let stats = vec![
            Stat {
                name: "hp".to_string(),
                base_stat: 45,
            },
            Stat {
                name: "attack".to_string(),
                base_stat: 255,
            },
        ];
        assert_eq!(stat_total(&stats), 300);
        assert!((stat_bar_percent(75) - 50.0).abs() < 1e-9);
        assert_eq!(stat_bar_percent(255), 100.0);
    }
}
