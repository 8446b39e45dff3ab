use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Page-level section navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Window after a wheel/touch transition during which further wheel/touch input is ignored
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    /// Minimum vertical travel, in logical pixels, for a touch to count as a swipe
    #[serde(default = "default_min_swipe_distance")]
    pub min_swipe_distance: f64,
    /// Fraction of a section that must be visible before it becomes current (0.0-1.0)
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            min_swipe_distance: default_min_swipe_distance(),
            visibility_threshold: default_visibility_threshold(),
        }
    }
}

/// Feature carousel inside the product section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_cooldown_ms")]
    pub cooldown_ms: u64,
    #[serde(default = "default_min_swipe_distance")]
    pub min_swipe_distance: f64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: default_cooldown_ms(),
            min_swipe_distance: default_min_swipe_distance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Delay between the host reporting "loaded" and the gate accepting it
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Give up on the product model after this long and continue degraded
    #[serde(default = "default_asset_timeout")]
    pub asset_timeout_secs: u64,
    /// HTTP request timeout for remote model sources
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Product model source: http(s) URL or file path. Built-in model when unset.
    #[serde(default)]
    pub model_source: Option<String>,
    /// Rotation interval for the loading screen facts
    #[serde(default = "default_fact_interval")]
    pub fact_interval_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            asset_timeout_secs: default_asset_timeout(),
            request_timeout_secs: default_request_timeout(),
            model_source: None,
            fact_interval_ms: default_fact_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Logical pixels per terminal row, used to scale wheel and drag gestures
    #[serde(default = "default_row_height")]
    pub row_height_px: f64,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
    /// Smooth scroll-into-view
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            row_height_px: default_row_height(),
            theme: ThemeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve for smooth scrolling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    Cubic,
    /// Slow start and finish, like a browser's smooth scroll
    #[default]
    EaseInOut,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll-into-view; when false the page jumps
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name (e.g., "cabin", "nord")
    pub name: String,
    /// Optional color overrides for semantic colors
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

// Accept either `theme = "nord"` or `[ui.theme]` with name and colors
impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct ThemeConfigVisitor;

        impl<'de> Visitor<'de> for ThemeConfigVisitor {
            type Value = ThemeConfig;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a theme name or a table with 'name' and optional 'colors'")
            }

            fn visit_str<E>(self, value: &str) -> Result<ThemeConfig, E>
            where
                E: de::Error,
            {
                Ok(ThemeConfig {
                    name: value.to_string(),
                    colors: ThemeColorOverrides::default(),
                })
            }

            fn visit_map<M>(self, mut map: M) -> Result<ThemeConfig, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut name: Option<String> = None;
                let mut colors: Option<ThemeColorOverrides> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "name" => name = Some(map.next_value()?),
                        "colors" => colors = Some(map.next_value()?),
                        _ => {
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(ThemeConfig {
                    name: name.unwrap_or_else(default_theme_name),
                    colors: colors.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(ThemeConfigVisitor)
    }
}

/// Hex overrides ("#rrggbb" or "rgb") for theme colors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    pub surface: Option<String>,
    pub fg: Option<String>,
    pub fg_dim: Option<String>,
    pub accent: Option<String>,
    pub highlight: Option<String>,
    pub warning: Option<String>,
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "<C-c>", "<S-g>", "<CR>", "<Esc>", "<Space>"
///
/// Arrow keys always navigate and cannot be rebound.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Alias for ArrowDown
    #[serde(default = "default_key_next_section")]
    pub next_section: String,
    /// Alias for ArrowUp
    #[serde(default = "default_key_prev_section")]
    pub prev_section: String,
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Navbar shortcuts
    #[serde(default = "default_key_goto_home")]
    pub goto_home: String,
    #[serde(default = "default_key_goto_features")]
    pub goto_features: String,
    #[serde(default = "default_key_goto_about")]
    pub goto_about: String,
    #[serde(default = "default_key_goto_contact")]
    pub goto_contact: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next_section: default_key_next_section(),
            prev_section: default_key_prev_section(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            goto_home: default_key_goto_home(),
            goto_features: default_key_goto_features(),
            goto_about: default_key_goto_about(),
            goto_contact: default_key_goto_contact(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_next_section() -> String { "j".to_string() }
fn default_key_prev_section() -> String { "k".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_goto_home() -> String { "h".to_string() }
fn default_key_goto_features() -> String { "f".to_string() }
fn default_key_goto_about() -> String { "a".to_string() }
fn default_key_goto_contact() -> String { "c".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vhalor")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cooldown_ms() -> u64 {
    1000
}

fn default_min_swipe_distance() -> f64 {
    50.0
}

fn default_visibility_threshold() -> f64 {
    0.6
}

fn default_settle_delay() -> u64 {
    2500
}

fn default_asset_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    30
}

fn default_fact_interval() -> u64 {
    3500
}

fn default_tick_rate() -> u64 {
    100
}

fn default_row_height() -> f64 {
    16.0
}

fn default_animation_duration() -> u64 {
    600
}

fn default_animation_fps() -> u32 {
    60
}

fn default_theme_name() -> String {
    "cabin".to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults if it is missing
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Reject values the navigation rules cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let threshold = self.navigation.visibility_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(crate::Error::Config(format!(
                "navigation.visibility_threshold must be in (0, 1], got {}",
                threshold
            )));
        }
        for (key, distance) in [
            ("navigation.min_swipe_distance", self.navigation.min_swipe_distance),
            ("carousel.min_swipe_distance", self.carousel.min_swipe_distance),
        ] {
            // NaN compares false both ways, so test for the accepted range
            if !(distance.is_finite() && distance >= 0.0) {
                return Err(crate::Error::Config(format!(
                    "{} must be a finite, non-negative number, got {}",
                    key, distance
                )));
            }
        }
        let row_height = self.ui.row_height_px;
        if !(row_height.is_finite() && row_height > 0.0) {
            return Err(crate::Error::Config(format!(
                "ui.row_height_px must be a finite, positive number, got {}",
                row_height
            )));
        }
        if self.ui.scroll.animation_fps > 1000 {
            return Err(crate::Error::Config(format!(
                "ui.scroll.animation_fps must be at most 1000, got {}",
                self.ui.scroll.animation_fps
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vhalor/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vhalor")
            .join("config.toml")
    }

    /// Get the log file path used by the interactive UI
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("vhalor.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
