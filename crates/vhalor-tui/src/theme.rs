use ratatui::style::Color;
use vhalor_core::background::Rgb;

/// Colors for the chrome around the page. The page itself is painted with the sky.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Navbar, status bar and popups
    pub surface: Color,
    pub surface_alt: Color,
    pub fg: Color,
    pub fg_dim: Color,

    /// Text drawn over a dark sky
    pub on_dark: Color,
    /// Text drawn over a light sky
    pub on_light: Color,

    pub accent: Color,
    /// Active navbar link and carousel dot
    pub highlight: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::default_theme()
    }
}

impl Theme {
    /// Foreground that reads well over the sky at this progress
    pub fn text_over_sky(&self, progress: f64) -> Color {
        if vhalor_core::background::is_dark(progress) {
            self.on_dark
        } else {
            self.on_light
        }
    }
}

pub fn sky_to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}
