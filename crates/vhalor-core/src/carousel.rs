//! Feature carousel nested inside the product section
//!
//! The carousel owns its active feature index. The only thing it shares with
//! the page-level controller is a [`BoundaryState`] published on a watch
//! channel, plus one-shot [`BoundaryEvent`]s when a gesture pushes past either
//! end.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::config::CarouselConfig;
use crate::gesture::{swipe_direction, Cooldown, Direction, Signal};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, target: Vec3, t: f64) -> Vec3 {
        Vec3 {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            z: self.z + (target.z - self.z) * t,
        }
    }

    pub fn distance(self, other: Vec3) -> f64 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Point the product camera looks at for every feature
pub const LOOK_AT: Vec3 = Vec3::new(0.0, 1.05, 0.0);

/// Camera placement for one feature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub position: Vec3,
}

impl CameraFraming {
    pub const fn at(position: Vec3) -> Self {
        Self { position }
    }
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub title: String,
    pub description: String,
    pub camera: CameraFraming,
}

impl Feature {
    pub fn new(title: impl Into<String>, description: impl Into<String>, camera: CameraFraming) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            camera,
        }
    }
}

/// Which ends of the carousel the active feature sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryState {
    pub at_first: bool,
    pub at_last: bool,
}

impl Default for BoundaryState {
    /// With no carousel mounted every gesture belongs to the page
    fn default() -> Self {
        Self {
            at_first: true,
            at_last: true,
        }
    }
}

impl BoundaryState {
    pub fn for_index(index: usize, len: usize) -> Self {
        Self {
            at_first: index == 0,
            at_last: index + 1 >= len,
        }
    }

    /// Whether a gesture in `direction` should be handed to the outer controller
    pub fn releases(&self, direction: Direction) -> bool {
        match direction {
            Direction::Advance => self.at_last,
            Direction::Retreat => self.at_first,
        }
    }
}

/// Raised when a gesture pushes past either end of the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryEvent {
    /// Retreat requested while on the first feature
    AtFirstReached,
    /// Advance requested while on the last feature
    TourCompleted,
}

/// Result of offering a signal to the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselResponse {
    /// Active feature changed; the gesture stops here
    Moved { from: usize, to: usize },
    /// Consumed without moving (cooldown, short swipe, zero delta)
    Held,
    /// At the boundary for this direction; the gesture belongs to the page
    Released(Option<BoundaryEvent>),
}

impl CarouselResponse {
    pub fn propagates(&self) -> bool {
        matches!(self, CarouselResponse::Released(_))
    }
}

#[derive(Debug, Clone)]
pub struct CarouselSettings {
    pub cooldown: Duration,
    pub min_swipe_distance: f64,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self::from(&CarouselConfig::default())
    }
}

impl From<&CarouselConfig> for CarouselSettings {
    fn from(config: &CarouselConfig) -> Self {
        Self {
            cooldown: Duration::from_millis(config.cooldown_ms),
            min_swipe_distance: config.min_swipe_distance,
        }
    }
}

pub struct FeatureCarousel {
    features: Vec<Feature>,
    index: usize,
    settings: CarouselSettings,
    cooldown: Cooldown,
    // Set once the boundary event for that end has been raised, cleared on leaving it
    notified_first: bool,
    notified_last: bool,
    boundary_tx: watch::Sender<BoundaryState>,
    notifier: Option<mpsc::UnboundedSender<BoundaryEvent>>,
}

impl FeatureCarousel {
    pub fn new(features: Vec<Feature>, settings: CarouselSettings) -> Result<Self> {
        if features.is_empty() {
            return Err(Error::Config("carousel needs at least one feature".to_string()));
        }
        let (boundary_tx, _) = watch::channel(BoundaryState::for_index(0, features.len()));
        let cooldown = Cooldown::new(settings.cooldown);
        Ok(Self {
            features,
            index: 0,
            settings,
            cooldown,
            notified_first: false,
            notified_last: false,
            boundary_tx,
            notifier: None,
        })
    }

    /// Also deliver boundary events on a channel
    pub fn with_notifier(mut self, tx: mpsc::UnboundedSender<BoundaryEvent>) -> Self {
        self.notifier = Some(tx);
        self
    }

    pub fn subscribe_boundary(&self) -> watch::Receiver<BoundaryState> {
        self.boundary_tx.subscribe()
    }

    pub fn boundary(&self) -> BoundaryState {
        BoundaryState::for_index(self.index, self.features.len())
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn current(&self) -> &Feature {
        &self.features[self.index]
    }

    /// "01 / 04" style position indicator
    pub fn indicator(&self) -> String {
        format!("{:02} / {:02}", self.index + 1, self.features.len())
    }

    /// Offer a signal from inside the carousel region
    pub fn handle(&mut self, signal: &Signal, now: Instant) -> CarouselResponse {
        let direction = match *signal {
            Signal::Wheel { dy, .. } => Direction::from_delta(dy),
            Signal::Swipe { start_y, end_y, .. } => {
                swipe_direction(start_y, end_y, self.settings.min_swipe_distance)
            }
            Signal::Key { key, .. } => {
                return self.step(key.direction());
            }
            Signal::Intersection { .. } => return CarouselResponse::Released(None),
        };

        let Some(direction) = direction else {
            return CarouselResponse::Held;
        };

        // One gesture may not both move the carousel and leave it
        if self.cooldown.is_active(now) {
            debug!("Carousel gesture held by cooldown");
            return CarouselResponse::Held;
        }

        if self.boundary().releases(direction) {
            return CarouselResponse::Released(self.raise(direction));
        }

        self.cooldown.try_acquire(now);
        self.move_by(direction)
    }

    pub fn advance(&mut self) -> CarouselResponse {
        self.step(Direction::Advance)
    }

    pub fn retreat(&mut self) -> CarouselResponse {
        self.step(Direction::Retreat)
    }

    /// Jump straight to a feature, e.g. from a dot indicator.
    /// Returns `false` if `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.features.len() {
            return false;
        }
        self.set_index(index);
        true
    }

    /// Allow boundary events to fire again, e.g. after the page left the product section
    pub fn reset_notifications(&mut self) {
        self.notified_first = false;
        self.notified_last = false;
    }

    fn step(&mut self, direction: Direction) -> CarouselResponse {
        if self.boundary().releases(direction) {
            CarouselResponse::Released(self.raise(direction))
        } else {
            self.move_by(direction)
        }
    }

    fn move_by(&mut self, direction: Direction) -> CarouselResponse {
        let from = self.index;
        let to = direction.step(from, self.features.len());
        self.set_index(to);
        debug!("Carousel moved {} -> {}", from, to);
        CarouselResponse::Moved { from, to }
    }

    fn set_index(&mut self, index: usize) {
        if index == self.index {
            return;
        }
        self.index = index;
        let state = self.boundary();
        if !state.at_first {
            self.notified_first = false;
        }
        if !state.at_last {
            self.notified_last = false;
        }
        self.boundary_tx.send_replace(state);
    }

    fn raise(&mut self, direction: Direction) -> Option<BoundaryEvent> {
        let (event, notified) = match direction {
            Direction::Retreat => (BoundaryEvent::AtFirstReached, &mut self.notified_first),
            Direction::Advance => (BoundaryEvent::TourCompleted, &mut self.notified_last),
        };
        if *notified {
            return None;
        }
        *notified = true;

        debug!("Carousel boundary event {:?}", event);
        if let Some(tx) = &self.notifier {
            if tx.send(event).is_err() {
                debug!("Boundary event receiver dropped");
            }
        }
        Some(event)
    }
}

/// Moves the product camera toward the active feature's framing
#[derive(Debug, Clone)]
pub struct CameraRig {
    position: Vec3,
    target: Vec3,
}

impl CameraRig {
    /// Fraction of the remaining distance covered per frame
    pub const LERP_FACTOR: f64 = 0.1;

    pub fn new(framing: CameraFraming) -> Self {
        Self {
            position: framing.position,
            target: framing.position,
        }
    }

    pub fn retarget(&mut self, framing: CameraFraming) {
        self.target = framing.position;
    }

    /// Advance one frame
    pub fn tick(&mut self) -> Vec3 {
        self.position = self.position.lerp(self.target, Self::LERP_FACTOR);
        self.position
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_at(&self) -> Vec3 {
        LOOK_AT
    }

    pub fn is_settled(&self) -> bool {
        self.position.distance(self.target) < 0.01
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::default_features;
    use crate::gesture::{EventTarget, NavKey};

    fn carousel() -> FeatureCarousel {
        FeatureCarousel::new(default_features(), CarouselSettings::default()).unwrap()
    }

    fn wheel(dy: f64) -> Signal {
        Signal::Wheel {
            dy,
            target: EventTarget::Carousel,
        }
    }

    fn key(key: NavKey) -> Signal {
        Signal::Key {
            key,
            target: EventTarget::Carousel,
        }
    }

    #[test]
    fn test_empty_feature_list_rejected() {
        assert!(matches!(
            FeatureCarousel::new(vec![], CarouselSettings::default()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_retreat_at_first_raises_and_keeps_index() {
        let mut c = carousel();
        let response = c.handle(&wheel(-100.0), Instant::now());
        assert_eq!(
            response,
            CarouselResponse::Released(Some(BoundaryEvent::AtFirstReached))
        );
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_boundary_event_once_per_arrival() {
        let mut c = carousel();
        assert_eq!(
            c.retreat(),
            CarouselResponse::Released(Some(BoundaryEvent::AtFirstReached))
        );
        // Idle at the boundary: still releases, but no second event
        assert_eq!(c.retreat(), CarouselResponse::Released(None));

        // Leave and come back re-arms it
        assert_eq!(c.advance(), CarouselResponse::Moved { from: 0, to: 1 });
        assert_eq!(c.retreat(), CarouselResponse::Moved { from: 1, to: 0 });
        assert_eq!(
            c.retreat(),
            CarouselResponse::Released(Some(BoundaryEvent::AtFirstReached))
        );
    }

    #[test]
    fn test_tour_completed_at_last() {
        let mut c = carousel();
        for _ in 0..3 {
            assert!(matches!(c.handle(&key(NavKey::ArrowDown), Instant::now()), CarouselResponse::Moved { .. }));
        }
        assert_eq!(c.index(), 3);
        assert_eq!(c.indicator(), "04 / 04");
        assert_eq!(
            c.handle(&key(NavKey::ArrowRight), Instant::now()),
            CarouselResponse::Released(Some(BoundaryEvent::TourCompleted))
        );
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn test_cooldown_checked_before_boundary() {
        let start = Instant::now();
        let mut c = carousel();
        assert_eq!(c.handle(&wheel(80.0), start), CarouselResponse::Moved { from: 0, to: 1 });
        // Same gesture continuing: held, not moved and not released
        assert_eq!(
            c.handle(&wheel(80.0), start + Duration::from_millis(300)),
            CarouselResponse::Held
        );
        c.select(3);
        assert_eq!(
            c.handle(&wheel(80.0), start + Duration::from_millis(500)),
            CarouselResponse::Held
        );
        assert!(c
            .handle(&wheel(80.0), start + Duration::from_millis(1000))
            .propagates());
    }

    #[test]
    fn test_short_swipe_is_held() {
        let mut c = carousel();
        let short = Signal::Swipe {
            start_y: 300.0,
            end_y: 280.0,
            target: EventTarget::Carousel,
        };
        assert_eq!(c.handle(&short, Instant::now()), CarouselResponse::Held);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_boundary_state_published() {
        let mut c = carousel();
        let rx = c.subscribe_boundary();
        assert_eq!(
            *rx.borrow(),
            BoundaryState {
                at_first: true,
                at_last: false
            }
        );
        assert!(c.select(3));
        assert!(rx.borrow().at_last);
        assert!(!rx.borrow().at_first);
        assert!(!c.select(4));
    }

    #[test]
    fn test_notifier_receives_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = carousel().with_notifier(tx);
        c.retreat();
        assert_eq!(rx.try_recv().unwrap(), BoundaryEvent::AtFirstReached);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_single_feature_releases_both_ways() {
        let features = default_features().into_iter().take(1).collect();
        let mut c = FeatureCarousel::new(features, CarouselSettings::default()).unwrap();
        assert!(c.boundary().releases(Direction::Advance));
        assert!(c.boundary().releases(Direction::Retreat));
        assert_eq!(
            c.advance(),
            CarouselResponse::Released(Some(BoundaryEvent::TourCompleted))
        );
    }

    #[test]
    fn test_camera_rig_converges() {
        let features = default_features();
        let mut rig = CameraRig::new(features[0].camera);
        rig.retarget(features[1].camera);
        let first = rig.tick();
        assert!((first.x - -0.5).abs() < 1e-9);
        for _ in 0..200 {
            rig.tick();
        }
        assert!(rig.is_settled());
        assert_eq!(rig.look_at(), LOOK_AT);
    }
}
