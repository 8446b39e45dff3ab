//! Input signals shared by the navigation controller and the feature carousel
//!
//! Wheel, swipe and key events are reduced to a [`Direction`]; intersection
//! observations carry a section and its visible ratio.

use std::time::{Duration, Instant};

use crate::section::SectionId;

/// Direction of a navigation gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Advance,
    Retreat,
}

impl Direction {
    /// Positive deltas advance, negative deltas retreat, zero is no gesture
    pub fn from_delta(dy: f64) -> Option<Direction> {
        if dy > 0.0 {
            Some(Direction::Advance)
        } else if dy < 0.0 {
            Some(Direction::Retreat)
        } else {
            None
        }
    }

    /// Step `index` one position in this direction, clamped to `[0, len - 1]`
    pub fn step(self, index: usize, len: usize) -> usize {
        let last = len.saturating_sub(1);
        match self {
            Direction::Advance => (index + 1).min(last),
            Direction::Retreat => index.saturating_sub(1).min(last),
        }
    }
}

/// Where a gesture originated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTarget {
    Page,
    Carousel,
}

/// Navigation keys recognized by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

impl NavKey {
    pub fn direction(self) -> Direction {
        match self {
            NavKey::ArrowDown | NavKey::ArrowRight => Direction::Advance,
            NavKey::ArrowUp | NavKey::ArrowLeft => Direction::Retreat,
        }
    }
}

/// A navigation input, independent of where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Mouse wheel with signed vertical delta
    Wheel { dy: f64, target: EventTarget },
    /// Completed touch-start / touch-end pair, in logical pixels
    Swipe {
        start_y: f64,
        end_y: f64,
        target: EventTarget,
    },
    /// Key press
    Key { key: NavKey, target: EventTarget },
    /// A section crossed the visibility threshold
    Intersection {
        section: SectionId,
        visible_ratio: f64,
    },
}

impl Signal {
    /// Origin of the gesture; intersection observations have none
    pub fn target(&self) -> Option<EventTarget> {
        match self {
            Signal::Wheel { target, .. }
            | Signal::Swipe { target, .. }
            | Signal::Key { target, .. } => Some(*target),
            Signal::Intersection { .. } => None,
        }
    }

    /// Wheel and touch gestures are rate limited; keys and observations are not
    pub fn is_cooldown_limited(&self) -> bool {
        matches!(self, Signal::Wheel { .. } | Signal::Swipe { .. })
    }
}

/// Direction of a swipe, if it travelled further than `min_distance`
///
/// A finger moving up the screen (start below end) advances.
pub fn swipe_direction(start_y: f64, end_y: f64, min_distance: f64) -> Option<Direction> {
    let distance = start_y - end_y;
    if distance.abs() > min_distance {
        Direction::from_delta(distance)
    } else {
        None
    }
}

/// Pairs touch-start and touch-end positions into a [`Signal::Swipe`]
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f64, EventTarget)>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a touch start. The target is fixed at start, like a DOM touch.
    pub fn begin(&mut self, y: f64, target: EventTarget) {
        self.start = Some((y, target));
    }

    /// Finish the touch. Returns `None` if no touch was in progress.
    pub fn finish(&mut self, end_y: f64) -> Option<Signal> {
        self.start.take().map(|(start_y, target)| Signal::Swipe {
            start_y,
            end_y,
            target,
        })
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

/// Fixed window that suppresses repeated gestures
#[derive(Debug, Clone)]
pub struct Cooldown {
    window: Duration,
    until: Option<Instant>,
}

impl Cooldown {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            until: None,
        }
    }

    #[inline]
    pub fn is_active(&self, now: Instant) -> bool {
        self.until.is_some_and(|until| now < until)
    }

    /// Arm the window if it is not active. Returns whether the caller may proceed.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        if self.is_active(now) {
            return false;
        }
        self.until = Some(now + self.window);
        true
    }
}
