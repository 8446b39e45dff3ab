use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, SectionFrame};

const DOT_SPACING: u16 = 2;

/// Rows from the bottom of the section
const INDICATOR_FROM_BOTTOM: u16 = 3;
const DOTS_FROM_BOTTOM: u16 = 2;

fn dots_start(x: u16, width: u16, count: usize) -> u16 {
    let span = (count as u16).saturating_mul(DOT_SPACING).saturating_sub(1);
    x + width.saturating_sub(span) / 2
}

/// Carousel dot under a screen position, given where the product section sits
pub fn dot_at(frame: &SectionFrame, count: usize, column: u16, row: u16) -> Option<usize> {
    if count == 0 || frame.height < DOTS_FROM_BOTTOM {
        return None;
    }
    let dots_row = frame.top + (frame.height - DOTS_FROM_BOTTOM) as i32;
    if row as i32 != dots_row {
        return None;
    }
    let start = dots_start(frame.x, frame.width, count);
    let offset = column.checked_sub(start)?;
    if offset % DOT_SPACING != 0 {
        return None;
    }
    let index = (offset / DOT_SPACING) as usize;
    (index < count).then_some(index)
}

/// The product section: turntable model, active feature and navigation dots
pub struct CarouselWidget;

impl CarouselWidget {
    pub fn render(buf: &mut Buffer, area: Rect, app: &App, text: Style) {
        let carousel = &app.page.carousel;
        let feature = carousel.current();
        let dim = text.add_modifier(Modifier::DIM);

        let heading = Paragraph::new(Line::styled(
            "Features",
            text.add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center);
        heading.render(Rect { height: 1, ..area }.intersection(area), buf);

        // Pan the model opposite to the camera so side framings look off-center
        let camera = app.camera.position();
        let pan = ((app.camera.look_at().x - camera.x) * 2.0).round() as i32;
        let frame_lines = app.model.frame(app.turntable_step());
        let model_width = frame_lines.iter().map(|l| l.width()).max().unwrap_or(0) as i32;
        let model_x = area.x as i32 + (area.width as i32 - model_width) / 2 + pan;
        let model_top = area.y + 2;
        for (i, line) in frame_lines.iter().enumerate() {
            let y = model_top + i as u16;
            if y >= area.bottom().saturating_sub(INDICATOR_FROM_BOTTOM + 4) {
                break;
            }
            let x = model_x.clamp(area.x as i32, area.right() as i32) as u16;
            buf.set_stringn(x, y, line, area.right().saturating_sub(x) as usize, text);
        }

        let copy_top = model_top + frame_lines.len() as u16 + 1;
        let copy_bottom = area.bottom().saturating_sub(INDICATOR_FROM_BOTTOM);
        if copy_top < copy_bottom {
            let copy = Paragraph::new(vec![
                Line::styled(
                    feature.title.as_str(),
                    text.fg(app.theme.accent).add_modifier(Modifier::BOLD),
                ),
                Line::raw(""),
                Line::styled(feature.description.as_str(), text),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            let copy_area = Rect::new(
                area.x + area.width / 8,
                copy_top,
                area.width - area.width / 4,
                copy_bottom - copy_top,
            );
            copy.render(copy_area, buf);
        }

        if area.height > INDICATOR_FROM_BOTTOM {
            let indicator = Paragraph::new(Line::styled(carousel.indicator(), dim))
                .alignment(Alignment::Center);
            let y = area.bottom() - INDICATOR_FROM_BOTTOM;
            indicator.render(Rect::new(area.x, y, area.width, 1), buf);
        }

        if area.height > DOTS_FROM_BOTTOM {
            let y = area.bottom() - DOTS_FROM_BOTTOM;
            let start = dots_start(area.x, area.width, carousel.len());
            for i in 0..carousel.len() {
                let (symbol, style) = if i == carousel.index() {
                    ("●", text.fg(app.theme.highlight))
                } else {
                    ("○", dim)
                };
                let x = start + i as u16 * DOT_SPACING;
                if x < area.right() {
                    buf.set_span(x, y, &Span::styled(symbol, style), 1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> SectionFrame {
        SectionFrame {
            top: 1,
            height: 20,
            x: 0,
            width: 80,
        }
    }

    #[test]
    fn test_dot_hit_testing() {
        // Four dots span 7 columns, centered in 80: columns 36, 38, 40, 42 on row 19
        assert_eq!(dot_at(&frame(), 4, 36, 19), Some(0));
        assert_eq!(dot_at(&frame(), 4, 42, 19), Some(3));
        assert_eq!(dot_at(&frame(), 4, 37, 19), None);
        assert_eq!(dot_at(&frame(), 4, 44, 19), None);
        assert_eq!(dot_at(&frame(), 4, 36, 18), None);
    }

    #[test]
    fn test_dots_follow_scrolled_section() {
        let above = SectionFrame { top: -5, ..frame() };
        assert_eq!(dot_at(&above, 4, 38, 13), Some(1));
        assert_eq!(dot_at(&frame(), 0, 36, 19), None);
    }
}
