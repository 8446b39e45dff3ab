use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HelpWidget;

impl HelpWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let base = Style::default().fg(theme.fg).bg(theme.surface);
        let key_style = base.fg(theme.accent).add_modifier(Modifier::BOLD);

        let rows: [(String, &str); 10] = [
            (format!("{} / ↓", keys.next_section), "next section"),
            (format!("{} / ↑", keys.prev_section), "previous section"),
            ("← / →".to_string(), "previous / next feature"),
            (format!("{} / {}", keys.jump_to_top, keys.jump_to_bottom), "first / last section"),
            (keys.goto_home.clone(), "home"),
            (keys.goto_features.clone(), "features"),
            (keys.goto_about.clone(), "about"),
            (keys.goto_contact.clone(), "contact"),
            ("wheel / drag".to_string(), "scroll or swipe"),
            (format!("{} / <C-c>", keys.quit), "quit"),
        ];

        let mut lines: Vec<Line> = rows
            .into_iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(format!("{:>14}  ", key), key_style),
                    Span::styled(what, base),
                ])
            })
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "press any key to close",
            base.fg(theme.fg_dim),
        ));

        let area = frame.area();
        let width = 48u16.min(area.width.saturating_sub(4));
        let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.highlight))
            .style(base);
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
