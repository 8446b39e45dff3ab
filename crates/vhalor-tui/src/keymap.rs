use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::warn;
use vhalor_core::config::KeymapConfig;
use vhalor_core::gesture::NavKey;
use vhalor_core::SectionId;

use crate::input::Action;

/// Key code plus modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// Runtime key-to-action lookup built from `[keymap]`
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
    /// Action for the "gg" sequence, if configured
    pending_g_action: Option<Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();
        let mut pending_g_action = None;

        let mut add_binding = |key_str: &str, action: Action| {
            if key_str == "gg" {
                pending_g_action = Some(action);
                return;
            }

            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', ignoring", key_str);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.next_section, Action::Arrow(NavKey::ArrowDown));
        add_binding(&config.prev_section, Action::Arrow(NavKey::ArrowUp));
        add_binding(&config.jump_to_top, Action::JumpToTop);
        add_binding(&config.jump_to_bottom, Action::JumpToBottom);
        add_binding(&config.goto_home, Action::GoTo(SectionId::Hero));
        add_binding(&config.goto_features, Action::GoTo(SectionId::Product));
        add_binding(&config.goto_about, Action::GoTo(SectionId::About));
        add_binding(&config.goto_contact, Action::GoTo(SectionId::Contact));
        add_binding(&config.help, Action::ToggleHelp);

        // Not configurable
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        bindings.insert(KeyBinding::simple(KeyCode::Up), Action::Arrow(NavKey::ArrowUp));
        bindings.insert(KeyBinding::simple(KeyCode::Down), Action::Arrow(NavKey::ArrowDown));
        bindings.insert(KeyBinding::simple(KeyCode::Left), Action::Arrow(NavKey::ArrowLeft));
        bindings.insert(KeyBinding::simple(KeyCode::Right), Action::Arrow(NavKey::ArrowRight));
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::ExitMode);

        Self {
            bindings,
            pending_g_action,
        }
    }

    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }

    pub fn get_pending_g_action(&self) -> Option<&Action> {
        self.pending_g_action.as_ref()
    }

    /// Whether a plain 'g' starts the "gg" sequence
    pub fn is_g_prefix(&self, binding: &KeyBinding) -> bool {
        self.pending_g_action.is_some()
            && binding.code == KeyCode::Char('g')
            && binding.modifiers == KeyModifiers::NONE
    }
}

/// Parse Vim-style key notation
///
/// - Single char: "j", "?", "G" (uppercase means Shift)
/// - Ctrl / Shift: "<C-c>", "<S-Tab>"
/// - Named keys: "<CR>", "<Esc>", "<Space>", "<Tab>", "<Up>", "<PageDown>", "<F1>"...
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        return parse_special_key(&s[1..s.len() - 1]);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_uppercase() {
        assert_eq!(
            parse_key_binding("j"),
            Some(KeyBinding::simple(KeyCode::Char('j')))
        );
        assert_eq!(
            parse_key_binding("?"),
            Some(KeyBinding::simple(KeyCode::Char('?')))
        );
        assert_eq!(
            parse_key_binding("G"),
            Some(KeyBinding::shift(KeyCode::Char('G')))
        );
        assert_eq!(parse_key_binding("jk"), None);
    }

    #[test]
    fn test_parse_special() {
        assert_eq!(
            parse_key_binding("<C-c>"),
            Some(KeyBinding::ctrl(KeyCode::Char('c')))
        );
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<PageDown>"),
            Some(KeyBinding::simple(KeyCode::PageDown))
        );
        assert_eq!(parse_key_binding("<F5>"), Some(KeyBinding::simple(KeyCode::F(5))));
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<Bogus>"), None);
    }

    #[test]
    fn test_default_keymap() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('j'))),
            Some(&Action::Arrow(NavKey::ArrowDown))
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('f'))),
            Some(&Action::GoTo(SectionId::Product))
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Right)),
            Some(&Action::Arrow(NavKey::ArrowRight))
        );
        assert_eq!(keymap.get_pending_g_action(), Some(&Action::JumpToTop));
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            help: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }
}
