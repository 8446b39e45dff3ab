//! Nord
//! https://www.nordtheme.com/

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        surface: Color::Rgb(0x2e, 0x34, 0x40),     // nord0
        surface_alt: Color::Rgb(0x3b, 0x42, 0x52), // nord1
        fg: Color::Rgb(0xec, 0xef, 0xf4),          // nord6
        fg_dim: Color::Rgb(0xd8, 0xde, 0xe9),      // nord4
        on_dark: Color::Rgb(0xec, 0xef, 0xf4),
        on_light: Color::Rgb(0x2e, 0x34, 0x40),
        accent: Color::Rgb(0x88, 0xc0, 0xd0),      // nord8
        highlight: Color::Rgb(0xeb, 0xcb, 0x8b),   // nord13
        warning: Color::Rgb(0xbf, 0x61, 0x6a),     // nord11
    }
}
