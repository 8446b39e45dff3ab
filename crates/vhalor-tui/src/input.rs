use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use vhalor_core::gesture::{EventTarget, NavKey, Signal};
use vhalor_core::SectionId;

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};
use crate::widgets::{dot_at, link_at};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Arrow key, or one of its configured aliases
    Arrow(NavKey),
    JumpToTop,
    JumpToBottom,
    /// First 'g' of "gg"
    PendingG,
    /// Navbar link
    GoTo(SectionId),
    /// Carousel dot
    SelectFeature(usize),
    ToggleHelp,
    ExitMode,
    /// Wheel gesture, already converted to logical pixels
    Gesture(Signal),
    /// Mouse press, standing in for touch start
    TouchStart { y: f64, target: EventTarget },
    TouchEnd { y: f64 },
    None,
}

/// Map a key press to an action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    if app.mode == Mode::Help {
        // Any key closes help
        return Action::ExitMode;
    }

    let binding = normalize(key);

    if keymap.is_g_prefix(&binding) {
        if app.pending_key == Some('g') {
            return keymap
                .get_pending_g_action()
                .cloned()
                .unwrap_or(Action::None);
        }
        return Action::PendingG;
    }

    keymap.get(&binding).cloned().unwrap_or(Action::None)
}

// Terminals disagree on whether punctuation and capitals carry SHIFT
fn normalize(key: KeyEvent) -> KeyBinding {
    let mut modifiers = key.modifiers;
    if let KeyCode::Char(c) = key.code {
        if c.is_ascii_uppercase() {
            modifiers.insert(KeyModifiers::SHIFT);
        } else if !c.is_ascii_alphabetic() {
            modifiers.remove(KeyModifiers::SHIFT);
        }
    }
    KeyBinding::new(key.code, modifiers)
}

/// Map a mouse event to an action
///
/// The wheel reports one step per notch; each step counts as one row of
/// logical pixels. Presses and releases of the left button stand in for touch.
pub fn handle_mouse_event(mouse: MouseEvent, app: &App) -> Action {
    if app.mode == Mode::Help {
        return match mouse.kind {
            MouseEventKind::Down(_) => Action::ExitMode,
            _ => Action::None,
        };
    }

    let row_px = app.config.ui.row_height_px;
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollDown => Action::Gesture(Signal::Wheel {
            dy: row_px,
            target: app.pointer_target(row),
        }),
        MouseEventKind::ScrollUp => Action::Gesture(Signal::Wheel {
            dy: -row_px,
            target: app.pointer_target(row),
        }),
        MouseEventKind::Down(MouseButton::Left) => {
            if !app.is_loading() && app.navbar_area.height > 0 && row == app.navbar_area.y {
                if let Some(section) = link_at(app.navbar_area, column) {
                    return Action::GoTo(section);
                }
            }
            if let Some(frame) = app.section_frame(SectionId::Product) {
                if let Some(index) = dot_at(&frame, app.page.carousel.len(), column, row) {
                    return Action::SelectFeature(index);
                }
            }
            Action::TouchStart {
                y: row as f64 * row_px,
                target: app.pointer_target(row),
            }
        }
        MouseEventKind::Up(MouseButton::Left) => Action::TouchEnd {
            y: row as f64 * row_px,
        },
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;
    use vhalor_core::asset::{AssetOutcome, ProductModel};
    use vhalor_core::gate::LoadingGate;
    use vhalor_core::AppConfig;

    use crate::theme::Theme;

    fn app_with_gate(gate: &LoadingGate, now: Instant) -> App {
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            gate.subscribe(),
            now,
        )
        .unwrap();
        app.navbar_area = Rect::new(0, 0, 80, 1);
        app.set_page_area(Rect::new(0, 1, 80, 20));
        app.on_frame(now);
        app
    }

    fn ready_app() -> (App, LoadingGate, Instant) {
        let gate = LoadingGate::new();
        let now = Instant::now();
        gate.page_loaded();
        gate.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        let app = app_with_gate(&gate, now);
        (app, gate, now)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_shift_normalization() {
        let question = normalize(press(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert_eq!(question, KeyBinding::simple(KeyCode::Char('?')));

        let capital = normalize(press(KeyCode::Char('G'), KeyModifiers::NONE));
        assert_eq!(capital, KeyBinding::shift(KeyCode::Char('G')));

        let ctrl = normalize(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(ctrl, KeyBinding::ctrl(KeyCode::Char('c')));
    }

    #[test]
    fn test_wheel_steps_one_row() {
        let (app, _gate, _now) = ready_app();
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 5), &app),
            Action::Gesture(Signal::Wheel {
                dy: 16.0,
                target: EventTarget::Page,
            })
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollUp, 10, 5), &app),
            Action::Gesture(Signal::Wheel {
                dy: -16.0,
                target: EventTarget::Page,
            })
        );
    }

    #[test]
    fn test_wheel_over_product_targets_carousel() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::GoTo(SectionId::Product), now);
        app.on_frame(now + Duration::from_secs(2));

        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 5), &app),
            Action::Gesture(Signal::Wheel {
                dy: 16.0,
                target: EventTarget::Carousel,
            })
        );
        // The navbar row is outside the page
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 0), &app),
            Action::Gesture(Signal::Wheel {
                dy: 16.0,
                target: EventTarget::Page,
            })
        );
    }

    #[test]
    fn test_left_button_stands_in_for_touch() {
        let (app, _gate, _now) = ready_app();
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5), &app),
            Action::TouchStart {
                y: 80.0,
                target: EventTarget::Page,
            }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 2), &app),
            Action::TouchEnd { y: 32.0 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 5), &app),
            Action::None
        );
    }

    #[test]
    fn test_navbar_click_goes_to_section() {
        let (app, _gate, _now) = ready_app();
        // Links are right-aligned: Home 48..52, Features 70..78
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 70, 0), &app),
            Action::GoTo(SectionId::Product)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 49, 0), &app),
            Action::GoTo(SectionId::Hero)
        );
    }

    #[test]
    fn test_navbar_ignored_while_loading() {
        let gate = LoadingGate::new();
        let app = app_with_gate(&gate, Instant::now());
        assert!(app.is_loading());

        let action =
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 70, 0), &app);
        assert!(matches!(action, Action::TouchStart { .. }));
    }

    #[test]
    fn test_dot_click_selects_feature() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::GoTo(SectionId::Product), now);
        app.on_frame(now + Duration::from_secs(2));

        // Dots sit two rows above the bottom of the product section
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 38, 19), &app),
            Action::SelectFeature(1)
        );
        assert!(matches!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 37, 19), &app),
            Action::TouchStart { .. }
        ));
    }

    #[test]
    fn test_click_closes_help() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::ToggleHelp, now);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), 70, 0), &app),
            Action::ExitMode
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown, 10, 5), &app),
            Action::None
        );
    }
}
