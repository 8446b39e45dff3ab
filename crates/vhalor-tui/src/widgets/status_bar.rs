use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg).bg(theme.surface_alt);
        let snapshot = *app.snapshot.borrow();

        let mut status_text = format!(
            " {} {}/{} | {:>3.0}% | {}",
            snapshot.current_section.label(),
            snapshot.current_index + 1,
            app.page.navigation.sections().len(),
            snapshot.scroll_progress * 100.0,
            app.sky_phase().label(),
        );
        if app.models_failed() {
            status_text.push_str(" | preview");
        }

        let message = app
            .status_message
            .as_deref()
            .map(|msg| format!(" | {}", msg))
            .unwrap_or_default();

        let help_hint = " q:quit j/k:section ←/→:feature ?:help ";
        let padding_len = area
            .width
            .saturating_sub((status_text.width() + message.width() + help_hint.width()) as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, base),
            Span::styled(message, base.fg(theme.warning)),
            Span::styled(" ".repeat(padding_len), base),
            Span::styled(help_hint, base.fg(theme.fg_dim)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
