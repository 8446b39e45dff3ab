use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;
use vhalor_core::content::BRAND;
use vhalor_core::SectionId;

use crate::app::App;

/// Navbar links, left to right
pub const NAV_LINKS: [SectionId; 4] = [
    SectionId::Hero,
    SectionId::About,
    SectionId::Contact,
    SectionId::Product,
];

const LINK_GAP: u16 = 2;

/// Column span `[start, end)` of each link, right-aligned in `area`
fn link_columns(area: Rect) -> Vec<(SectionId, u16, u16)> {
    let total: u16 = NAV_LINKS
        .iter()
        .map(|id| id.label().width() as u16 + LINK_GAP)
        .sum();

    let mut x = area.x + area.width.saturating_sub(total);
    NAV_LINKS
        .iter()
        .map(|&id| {
            let start = x;
            let end = start + id.label().width() as u16;
            x = end + LINK_GAP;
            (id, start, end)
        })
        .collect()
}

/// Link under a column of the navbar row
pub fn link_at(area: Rect, column: u16) -> Option<SectionId> {
    link_columns(area)
        .into_iter()
        .find(|&(_, start, end)| column >= start && column < end)
        .map(|(id, _, _)| id)
}

pub struct NavbarWidget;

impl NavbarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let base = Style::default().fg(theme.fg).bg(theme.surface);
        let current = app.current_section();

        let brand = format!(" {}", BRAND);
        let links = link_columns(area);
        let links_start = links.first().map(|&(_, start, _)| start).unwrap_or(area.x);
        let padding = links_start
            .saturating_sub(area.x)
            .saturating_sub(brand.width() as u16) as usize;

        let mut spans = vec![
            Span::styled(brand, base.fg(theme.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" ".repeat(padding), base),
        ];
        for (id, _, _) in links {
            let style = if id == current {
                base.fg(theme.highlight).add_modifier(Modifier::UNDERLINED)
            } else {
                base
            };
            spans.push(Span::styled(id.label(), style));
            spans.push(Span::styled(" ".repeat(LINK_GAP as usize), base));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(base), area);
    }
}
