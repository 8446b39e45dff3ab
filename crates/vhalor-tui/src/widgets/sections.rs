use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
    Frame,
};
use vhalor_core::background::sky_color;
use vhalor_core::content::{section_copy, BRAND, SOCIAL_LINKS};
use vhalor_core::SectionId;

use super::carousel::CarouselWidget;
use crate::app::App;
use crate::theme::sky_to_color;

/// The scrolling page. Each section is drawn off-screen at full size, then the
/// rows inside the viewport are copied into the frame.
pub struct SectionsWidget;

impl SectionsWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let progress = app.sky.value();
        let background = sky_to_color(sky_color(progress));
        let text = Style::default()
            .fg(app.theme.text_over_sky(progress))
            .bg(background);

        frame.buffer_mut().set_style(area, text);

        for id in app.layout.sections() {
            let Some(section) = app.section_frame(id) else {
                continue;
            };
            let top = section.top;
            let bottom = top + section.height as i32;
            if bottom <= area.y as i32 || top >= area.bottom() as i32 {
                continue;
            }

            let local = Rect::new(0, 0, area.width, section.height);
            let mut buf = Buffer::empty(local);
            buf.set_style(local, text);
            render_section(&mut buf, local, id, app, text);

            let target = frame.buffer_mut();
            for row in 0..section.height {
                let y = top + row as i32;
                if y < area.y as i32 || y >= area.bottom() as i32 {
                    continue;
                }
                for col in 0..area.width {
                    if let (Some(src), Some(dst)) =
                        (buf.cell((col, row)), target.cell_mut((area.x + col, y as u16)))
                    {
                        *dst = src.clone();
                    }
                }
            }
        }
    }
}

fn render_section(buf: &mut Buffer, area: Rect, id: SectionId, app: &App, text: Style) {
    match id {
        SectionId::Hero => render_hero(buf, area, text),
        SectionId::Product => CarouselWidget::render(buf, area, app, text),
        SectionId::Contact => render_contact(buf, area, text),
        SectionId::Video | SectionId::About => render_story(buf, area, id, text),
    }
}

/// Centered block of lines, vertically centered in `area`
fn render_centered(buf: &mut Buffer, area: Rect, lines: Vec<Line<'_>>) {
    let height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height - height) / 2;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(Rect::new(area.x, y, area.width, height), buf);
}

fn render_hero(buf: &mut Buffer, area: Rect, text: Style) {
    let copy = section_copy(SectionId::Hero);
    let mut lines = vec![
        Line::styled(BRAND, text.add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::styled(copy.heading, text.add_modifier(Modifier::BOLD)),
    ];
    lines.extend(copy.body.iter().map(|p| Line::styled(*p, text)));
    lines.push(Line::raw(""));
    lines.push(Line::styled("scroll ↓", text.add_modifier(Modifier::DIM)));
    render_centered(buf, area, lines);
}

fn render_story(buf: &mut Buffer, area: Rect, id: SectionId, text: Style) {
    let copy = section_copy(id);
    let mut lines = vec![
        Line::styled(copy.heading, text.add_modifier(Modifier::BOLD)),
        Line::raw(""),
    ];
    for paragraph in copy.body {
        lines.push(Line::styled(*paragraph, text));
        lines.push(Line::raw(""));
    }

    let margin = area.width / 8;
    let inner = Rect::new(
        area.x + margin,
        area.y + 1,
        area.width - 2 * margin,
        area.height.saturating_sub(2),
    );
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

fn render_contact(buf: &mut Buffer, area: Rect, text: Style) {
    let copy = section_copy(SectionId::Contact);
    let dim = text.add_modifier(Modifier::DIM);

    let mut lines = vec![Line::styled(copy.heading, text.add_modifier(Modifier::BOLD))];
    lines.extend(copy.body.iter().map(|p| Line::styled(*p, text)));
    lines.push(Line::raw(""));
    for (name, url) in SOCIAL_LINKS {
        lines.push(Line::styled(format!("{}  {}", name, url), text));
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        format!("© {} All rights reserved.", BRAND),
        dim,
    ));
    render_centered(buf, area, lines);
}
