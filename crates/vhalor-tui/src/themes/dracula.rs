//! Dracula
//! https://draculatheme.com/

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        surface: Color::Rgb(0x28, 0x2a, 0x36),
        surface_alt: Color::Rgb(0x44, 0x47, 0x5a),
        fg: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg_dim: Color::Rgb(0x62, 0x72, 0xa4),
        on_dark: Color::Rgb(0xf8, 0xf8, 0xf2),
        on_light: Color::Rgb(0x28, 0x2a, 0x36),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
        warning: Color::Rgb(0xff, 0x55, 0x55),
    }
}
