use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use vhalor_core::config::UiConfig;

use crate::scroll::ScrollConfigExt;

/// Polls the terminal for input
pub struct EventHandler {
    tick_rate: Duration,
    animation_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, animation_rate: Duration) -> Self {
        Self {
            tick_rate,
            animation_rate,
        }
    }

    /// Idle rate from `[ui]`, faster frame rate from `[ui.scroll]`
    pub fn from_config(ui: &UiConfig) -> Self {
        Self::new(
            Duration::from_millis(ui.tick_rate_ms),
            ui.scroll.animation_tick_duration(),
        )
    }

    /// Poll for the next event at the idle tick rate
    pub fn next(&self) -> Result<Option<AppEvent>> {
        self.poll(self.tick_rate)
    }

    /// Poll for the next event at the animation frame rate
    pub fn next_animation(&self) -> Result<Option<AppEvent>> {
        self.poll(self.animation_rate)
    }

    fn poll(&self, timeout: Duration) -> Result<Option<AppEvent>> {
        if !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick));
        }
        match event::read()? {
            // Some terminals also report releases; only presses count
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(AppEvent::Key(key))),
            Event::Mouse(mouse) if !matches!(mouse.kind, MouseEventKind::Moved) => {
                Ok(Some(AppEvent::Mouse(mouse)))
            }
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            _ => Ok(None),
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Wheel, press, drag and release
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}
