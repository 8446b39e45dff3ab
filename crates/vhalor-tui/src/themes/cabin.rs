//! Cabin: night-flight purples, the default

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        surface: Color::Rgb(0x1e, 0x1b, 0x4b),     // indigo-950
        surface_alt: Color::Rgb(0x31, 0x2e, 0x81), // indigo-900
        fg: Color::Rgb(0xf5, 0xf3, 0xff),
        fg_dim: Color::Rgb(0xc4, 0xb5, 0xfd),      // purple-300
        on_dark: Color::Rgb(0xff, 0xff, 0xff),
        on_light: Color::Rgb(0x1f, 0x29, 0x37),    // gray-800
        accent: Color::Rgb(0xa7, 0x8b, 0xfa),      // violet-400
        highlight: Color::Rgb(0xfb, 0xbf, 0x24),   // amber-400
        warning: Color::Rgb(0xf8, 0x71, 0x71),
    }
}
