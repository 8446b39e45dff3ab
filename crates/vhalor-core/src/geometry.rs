//! Scroll container geometry and section visibility

use std::collections::HashSet;

use crate::gesture::Signal;
use crate::section::{SectionId, Sections};

/// Scroll container measurements, in any consistent unit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollGeometry {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollGeometry {
    /// How far through the page the user has scrolled, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / scrollable).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    id: SectionId,
    top: f64,
    height: f64,
}

/// Vertical placement of every section on the page
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    spans: Vec<Span>,
}

impl SectionLayout {
    /// Every section exactly `height` tall, stacked in order
    pub fn uniform(sections: &Sections, height: f64) -> Self {
        let spans = sections
            .iter()
            .enumerate()
            .map(|(i, id)| Span {
                id,
                top: i as f64 * height,
                height,
            })
            .collect();
        Self { spans }
    }

    pub fn offset_of(&self, id: SectionId) -> Option<f64> {
        self.spans.iter().find(|s| s.id == id).map(|s| s.top)
    }

    pub fn height_of(&self, id: SectionId) -> Option<f64> {
        self.spans.iter().find(|s| s.id == id).map(|s| s.height)
    }

    pub fn total_height(&self) -> f64 {
        self.spans.last().map(|s| s.top + s.height).unwrap_or(0.0)
    }

    /// Largest valid scroll offset for a viewport of `viewport_height`
    pub fn max_scroll(&self, viewport_height: f64) -> f64 {
        (self.total_height() - viewport_height).max(0.0)
    }

    /// Fraction of the section inside `[top, top + viewport_height)`
    pub fn visible_ratio(&self, id: SectionId, top: f64, viewport_height: f64) -> f64 {
        let Some(span) = self.spans.iter().find(|s| s.id == id) else {
            return 0.0;
        };
        if span.height <= 0.0 {
            return 0.0;
        }
        let start = span.top.max(top);
        let end = (span.top + span.height).min(top + viewport_height);
        ((end - start).max(0.0) / span.height).min(1.0)
    }

    pub fn geometry(&self, top: f64, viewport_height: f64) -> ScrollGeometry {
        ScrollGeometry {
            scroll_top: top,
            scroll_height: self.total_height(),
            client_height: viewport_height,
        }
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.spans.iter().map(|s| s.id)
    }
}

/// Reports sections as they cross the visibility threshold
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    threshold: f64,
    intersecting: HashSet<SectionId>,
}

impl IntersectionObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            intersecting: HashSet::new(),
        }
    }

    /// Compare the viewport against the previous observation.
    /// Emits one signal per section that newly reached the threshold.
    pub fn observe(&mut self, layout: &SectionLayout, top: f64, viewport_height: f64) -> Vec<Signal> {
        let mut signals = Vec::new();
        for id in layout.sections() {
            let ratio = layout.visible_ratio(id, top, viewport_height);
            if ratio >= self.threshold {
                if self.intersecting.insert(id) {
                    signals.push(Signal::Intersection {
                        section: id,
                        visible_ratio: ratio,
                    });
                }
            } else {
                self.intersecting.remove(&id);
            }
        }
        signals
    }

    /// Forget previous observations, e.g. after a resize
    pub fn reset(&mut self) {
        self.intersecting.clear();
    }
}
