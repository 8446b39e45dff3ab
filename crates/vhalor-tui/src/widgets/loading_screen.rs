use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};
use vhalor_core::content::LOADING_TITLE;

use crate::app::App;

const SPINNER: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// Full-screen overlay shown until the page and the model are ready
pub struct LoadingScreenWidget;

impl LoadingScreenWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg).bg(theme.surface);
        frame.render_widget(Block::default().style(base), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(1), // Spinner
                Constraint::Length(1),
                Constraint::Length(1), // Title
                Constraint::Length(1),
                Constraint::Length(4), // Fact
                Constraint::Fill(1),
            ])
            .split(area);

        let spinner = SPINNER[app.spinner_frame % SPINNER.len()];
        frame.render_widget(
            Paragraph::new(Span::styled(spinner, base.fg(theme.accent))).alignment(Alignment::Center),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(LOADING_TITLE, base.add_modifier(Modifier::BOLD)))
                .alignment(Alignment::Center),
            chunks[3],
        );

        let fact = Line::from(vec![
            Span::styled("Did you know? ", base.fg(theme.highlight).add_modifier(Modifier::BOLD)),
            Span::styled(app.current_fact(), base.fg(theme.fg_dim)),
        ]);
        let margin = area.width / 6;
        let fact_area = Rect {
            x: chunks[5].x + margin,
            width: chunks[5].width.saturating_sub(2 * margin),
            ..chunks[5]
        };
        frame.render_widget(
            Paragraph::new(fact)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            fact_area,
        );
    }
}
