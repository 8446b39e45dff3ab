//! Built-in themes and the loader

mod cabin;
mod dracula;
mod nord;

use ratatui::style::Color;
use tracing::warn;
use vhalor_core::config::{ThemeColorOverrides, ThemeConfig};

use crate::theme::Theme;


/// Parse "#RRGGBB", "RRGGBB", "#RGB" or "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');

    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// The theme used when none is configured
pub fn default_theme() -> Theme {
    cabin::default()
}

/// Load a theme by name, then apply color overrides
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let base = match config.name.to_lowercase().as_str() {
        "cabin" => cabin::default(),
        "nord" => nord::default(),
        "dracula" => dracula::default(),
        other => {
            warn!("Unknown theme '{}', using cabin", other);
            cabin::default()
        }
    };

    apply_overrides(base, &config.colors)
}

fn apply_overrides(mut theme: Theme, overrides: &ThemeColorOverrides) -> Theme {
    let slots: [(&Option<String>, &mut Color); 6] = [
        (&overrides.surface, &mut theme.surface),
        (&overrides.fg, &mut theme.fg),
        (&overrides.fg_dim, &mut theme.fg_dim),
        (&overrides.accent, &mut theme.accent),
        (&overrides.highlight, &mut theme.highlight),
        (&overrides.warning, &mut theme.warning),
    ];
    for (hex, slot) in slots {
        if let Some(hex) = hex {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => warn!("Ignoring invalid color override '{}'", hex),
            }
        }
    }
    theme
}

pub fn available_themes() -> Vec<&'static str> {
    vec!["cabin", "nord", "dracula"]
}
