//! Section navigation controller
//!
//! Turns wheel, swipe, key and intersection signals into at most one section
//! transition per gesture. Readiness and the carousel's boundary state are
//! read through watch receivers; current section and scroll progress are
//! published the same way for the navbar and background.

use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::debug;

use crate::carousel::BoundaryState;
use crate::config::NavigationConfig;
use crate::gate::Readiness;
use crate::geometry::ScrollGeometry;
use crate::gesture::{swipe_direction, Cooldown, Direction, EventTarget, Signal};
use crate::section::{SectionId, Sections};

#[derive(Debug, Clone)]
pub struct NavigationSettings {
    /// Shared by wheel and swipe
    pub cooldown: Duration,
    pub min_swipe_distance: f64,
    pub visibility_threshold: f64,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self::from(&NavigationConfig::default())
    }
}

impl From<&NavigationConfig> for NavigationSettings {
    fn from(config: &NavigationConfig) -> Self {
        Self {
            cooldown: Duration::from_millis(config.cooldown_ms),
            min_swipe_distance: config.min_swipe_distance,
            visibility_threshold: config.visibility_threshold,
        }
    }
}

/// Performs scroll-into-view for the host
pub trait Viewport {
    /// Start a smooth scroll to the section. Returns `false` if it is not mounted.
    fn scroll_into_view(&mut self, section: SectionId) -> bool;
}

/// What the navbar and background see
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSnapshot {
    pub current_section: SectionId,
    pub current_index: usize,
    pub is_loading: bool,
    pub scroll_progress: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Loading,
    Cooldown,
    HeldByCarousel,
    ShortSwipe,
    NoDelta,
    BelowThreshold,
    UnknownSection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Moved {
        from: SectionId,
        to: SectionId,
        /// `false` when the target section was not mounted
        scrolled: bool,
    },
    /// Recognized, but already at that end
    Unchanged,
    Ignored(IgnoreReason),
}

pub struct NavigationController {
    sections: Sections,
    settings: NavigationSettings,
    index: usize,
    scroll_progress: f64,
    cooldown: Cooldown,
    readiness: watch::Receiver<Readiness>,
    boundary: watch::Receiver<BoundaryState>,
    snapshot_tx: watch::Sender<NavigationSnapshot>,
}

impl NavigationController {
    pub fn new(
        sections: Sections,
        settings: NavigationSettings,
        readiness: watch::Receiver<Readiness>,
        boundary: watch::Receiver<BoundaryState>,
    ) -> Self {
        let is_loading = readiness.borrow().is_loading();
        let first = sections.get(0).unwrap_or(SectionId::Hero);
        let (snapshot_tx, _) = watch::channel(NavigationSnapshot {
            current_section: first,
            current_index: 0,
            is_loading,
            scroll_progress: 0.0,
        });
        let cooldown = Cooldown::new(settings.cooldown);

        Self {
            sections,
            settings,
            index: 0,
            scroll_progress: 0.0,
            cooldown,
            readiness,
            boundary,
            snapshot_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<NavigationSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> NavigationSnapshot {
        *self.snapshot_tx.borrow()
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_section(&self) -> SectionId {
        self.sections.get(self.index).unwrap_or(SectionId::Hero)
    }

    pub fn scroll_progress(&self) -> f64 {
        self.scroll_progress
    }

    pub fn is_loading(&self) -> bool {
        self.readiness.borrow().is_loading()
    }

    /// Apply one input signal
    pub fn handle(&mut self, signal: &Signal, now: Instant, viewport: &mut dyn Viewport) -> Outcome {
        if self.is_loading() {
            return self.ignore(signal, IgnoreReason::Loading);
        }

        let direction = match *signal {
            Signal::Intersection {
                section,
                visible_ratio,
            } => return self.observe(section, visible_ratio),
            Signal::Wheel { dy, .. } => match Direction::from_delta(dy) {
                Some(direction) => direction,
                None => return self.ignore(signal, IgnoreReason::NoDelta),
            },
            Signal::Swipe { start_y, end_y, .. } => {
                match swipe_direction(start_y, end_y, self.settings.min_swipe_distance) {
                    Some(direction) => direction,
                    None => return self.ignore(signal, IgnoreReason::ShortSwipe),
                }
            }
            Signal::Key { key, .. } => key.direction(),
        };

        if signal.target() == Some(EventTarget::Carousel)
            && !self.boundary.borrow().releases(direction)
        {
            return self.ignore(signal, IgnoreReason::HeldByCarousel);
        }

        if signal.is_cooldown_limited() && !self.cooldown.try_acquire(now) {
            return self.ignore(signal, IgnoreReason::Cooldown);
        }

        let next = direction.step(self.index, self.sections.len());
        self.transition(next, viewport)
    }

    /// Navbar anchor navigation
    pub fn jump_to(&mut self, section: SectionId, viewport: &mut dyn Viewport) -> Outcome {
        if self.is_loading() {
            debug!("Ignoring jump to {} while loading", section);
            return Outcome::Ignored(IgnoreReason::Loading);
        }
        match self.sections.position(section) {
            Some(index) => self.transition(index, viewport),
            None => {
                debug!("Ignoring jump to unknown section {}", section);
                Outcome::Ignored(IgnoreReason::UnknownSection)
            }
        }
    }

    /// Recompute scroll progress from the container. Never affects the index.
    pub fn update_scroll_progress(&mut self, geometry: ScrollGeometry) -> f64 {
        self.scroll_progress = geometry.progress();
        self.publish();
        self.scroll_progress
    }

    /// Republish the snapshot after the loading gate changed
    pub fn sync_readiness(&mut self) {
        self.publish();
    }

    // Intersection observations are authoritative and bypass the cooldown
    fn observe(&mut self, section: SectionId, visible_ratio: f64) -> Outcome {
        if visible_ratio < self.settings.visibility_threshold {
            return Outcome::Ignored(IgnoreReason::BelowThreshold);
        }
        let Some(index) = self.sections.position(section) else {
            debug!("Intersection for unknown section {}", section);
            return Outcome::Ignored(IgnoreReason::UnknownSection);
        };
        if index == self.index {
            return Outcome::Unchanged;
        }
        let from = self.current_section();
        self.index = index;
        self.publish();
        debug!("Intersection moved section {} -> {}", from, section);
        Outcome::Moved {
            from,
            to: section,
            scrolled: false,
        }
    }

    fn transition(&mut self, next: usize, viewport: &mut dyn Viewport) -> Outcome {
        if next == self.index {
            return Outcome::Unchanged;
        }
        let from = self.current_section();
        self.index = next;
        let to = self.current_section();

        let scrolled = viewport.scroll_into_view(to);
        if !scrolled {
            debug!("Section {} not mounted, index updated without scrolling", to);
        }
        self.publish();
        debug!("Section {} -> {}", from, to);
        Outcome::Moved { from, to, scrolled }
    }

    fn ignore(&self, signal: &Signal, reason: IgnoreReason) -> Outcome {
        debug!("Ignored {:?}: {:?}", signal, reason);
        Outcome::Ignored(reason)
    }

    fn publish(&self) {
        let snapshot = NavigationSnapshot {
            current_section: self.current_section(),
            current_index: self.index,
            is_loading: self.is_loading(),
            scroll_progress: self.scroll_progress,
        };
        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                return false;
            }
            *current = snapshot;
            true
        });
    }
}
