//! Page composition: the section controller with the nested feature carousel
//!
//! Carousel-targeted gestures are offered to the carousel first and only
//! reach the section controller when the carousel releases them.

use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::carousel::{BoundaryEvent, CarouselResponse, CarouselSettings, Feature, FeatureCarousel};
use crate::config::AppConfig;
use crate::content::default_features;
use crate::gate::Readiness;
use crate::gesture::{EventTarget, Signal};
use crate::navigation::{NavigationController, NavigationSettings, Outcome, Viewport};
use crate::section::{SectionId, Sections};
use crate::Result;

/// What happened to one signal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// `None` when the carousel kept the signal
    pub navigation: Option<Outcome>,
    /// `None` when the signal never went to the carousel
    pub carousel: Option<CarouselResponse>,
    pub boundary_event: Option<BoundaryEvent>,
}

pub struct Page {
    pub navigation: NavigationController,
    pub carousel: FeatureCarousel,
}

impl Page {
    /// Standard sections and the built-in features
    pub fn new(config: &AppConfig, readiness: watch::Receiver<Readiness>) -> Result<Self> {
        Self::with_parts(Sections::standard(), default_features(), config, readiness)
    }

    pub fn with_parts(
        sections: Sections,
        features: Vec<Feature>,
        config: &AppConfig,
        readiness: watch::Receiver<Readiness>,
    ) -> Result<Self> {
        let carousel = FeatureCarousel::new(features, CarouselSettings::from(&config.carousel))?;
        let navigation = NavigationController::new(
            sections,
            NavigationSettings::from(&config.navigation),
            readiness,
            carousel.subscribe_boundary(),
        );
        Ok(Self {
            navigation,
            carousel,
        })
    }

    /// Forward boundary events to a channel as well
    pub fn with_boundary_notifier(mut self, tx: mpsc::UnboundedSender<BoundaryEvent>) -> Self {
        self.carousel = self.carousel.with_notifier(tx);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.navigation.is_loading()
    }

    pub fn dispatch(&mut self, signal: &Signal, now: Instant, viewport: &mut dyn Viewport) -> Dispatch {
        let mut dispatch = Dispatch::default();

        if self.is_loading() {
            dispatch.navigation = Some(self.navigation.handle(signal, now, viewport));
            return dispatch;
        }

        if signal.target() == Some(EventTarget::Carousel) {
            let response = self.carousel.handle(signal, now);
            dispatch.carousel = Some(response);
            match response {
                CarouselResponse::Released(event) => dispatch.boundary_event = event,
                CarouselResponse::Moved { .. } | CarouselResponse::Held => return dispatch,
            }
        }

        let outcome = self.navigation.handle(signal, now, viewport);
        self.after_navigation(outcome);
        dispatch.navigation = Some(outcome);
        dispatch
    }

    /// Navbar link
    pub fn jump_to(&mut self, section: SectionId, viewport: &mut dyn Viewport) -> Outcome {
        let outcome = self.navigation.jump_to(section, viewport);
        self.after_navigation(outcome);
        outcome
    }

    fn after_navigation(&mut self, outcome: Outcome) {
        if let Outcome::Moved { from, to, .. } = outcome {
            if from == SectionId::Product && to != SectionId::Product {
                debug!("Left product section, re-arming carousel notifications");
                self.carousel.reset_notifications();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::asset::{AssetOutcome, ProductModel};
    use crate::gate::LoadingGate;
    use crate::gesture::NavKey;
    use crate::navigation::IgnoreReason;

    struct NullViewport;

    impl Viewport for NullViewport {
        fn scroll_into_view(&mut self, _section: SectionId) -> bool {
            true
        }
    }

    fn ready_page() -> (Page, LoadingGate) {
        let gate = LoadingGate::new();
        let page = Page::new(&AppConfig::default(), gate.subscribe()).unwrap();
        gate.page_loaded();
        gate.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        (page, gate)
    }

    fn carousel_wheel(dy: f64) -> Signal {
        Signal::Wheel {
            dy,
            target: EventTarget::Carousel,
        }
    }

    #[test]
    fn test_inert_while_loading() {
        let gate = LoadingGate::new();
        let mut page = Page::new(&AppConfig::default(), gate.subscribe()).unwrap();
        let dispatch = page.dispatch(&carousel_wheel(100.0), Instant::now(), &mut NullViewport);
        assert_eq!(dispatch.carousel, None);
        assert_eq!(
            dispatch.navigation,
            Some(Outcome::Ignored(IgnoreReason::Loading))
        );
        assert_eq!(page.carousel.index(), 0);
    }

    #[test]
    fn test_carousel_consumes_until_last_feature() {
        let (mut page, _gate) = ready_page();
        let mut viewport = NullViewport;
        let start = Instant::now();
        page.jump_to(SectionId::Product, &mut viewport);

        let mut at = start;
        for expected in 1..=3 {
            let d = page.dispatch(&carousel_wheel(100.0), at, &mut viewport);
            assert_eq!(d.navigation, None);
            assert_eq!(page.carousel.index(), expected);
            at += Duration::from_millis(1100);
        }
        assert_eq!(page.navigation.current_section(), SectionId::Product);

        // Past the last feature the page takes over
        let d = page.dispatch(&carousel_wheel(100.0), at, &mut viewport);
        assert_eq!(d.boundary_event, Some(BoundaryEvent::TourCompleted));
        assert!(matches!(
            d.navigation,
            Some(Outcome::Moved {
                to: SectionId::About,
                ..
            })
        ));
    }

    #[test]
    fn test_retreat_from_first_feature_hands_off() {
        let (mut page, _gate) = ready_page();
        let mut viewport = NullViewport;
        page.jump_to(SectionId::Product, &mut viewport);

        let d = page.dispatch(&carousel_wheel(-100.0), Instant::now(), &mut viewport);
        assert_eq!(d.boundary_event, Some(BoundaryEvent::AtFirstReached));
        assert_eq!(page.carousel.index(), 0);
        assert!(matches!(
            d.navigation,
            Some(Outcome::Moved {
                to: SectionId::Video,
                ..
            })
        ));
    }

    #[test]
    fn test_leaving_product_rearms_notifications() {
        let (mut page, _gate) = ready_page();
        let mut viewport = NullViewport;
        let key = |key| Signal::Key {
            key,
            target: EventTarget::Carousel,
        };
        page.jump_to(SectionId::Product, &mut viewport);

        let first = page.dispatch(&key(NavKey::ArrowUp), Instant::now(), &mut viewport);
        assert_eq!(first.boundary_event, Some(BoundaryEvent::AtFirstReached));

        page.jump_to(SectionId::Product, &mut viewport);
        let again = page.dispatch(&key(NavKey::ArrowUp), Instant::now(), &mut viewport);
        assert_eq!(again.boundary_event, Some(BoundaryEvent::AtFirstReached));
    }

    #[test]
    fn test_carousel_cooldown_does_not_leak_to_page() {
        let (mut page, _gate) = ready_page();
        let mut viewport = NullViewport;
        let start = Instant::now();
        page.jump_to(SectionId::Product, &mut viewport);

        page.carousel.select(3);
        page.dispatch(&carousel_wheel(-100.0), start, &mut viewport);
        assert_eq!(page.carousel.index(), 2);

        let page_wheel = Signal::Wheel {
            dy: 100.0,
            target: EventTarget::Page,
        };
        let d = page.dispatch(&page_wheel, start + Duration::from_millis(10), &mut viewport);
        assert!(matches!(d.navigation, Some(Outcome::Moved { .. })));
    }

    #[test]
    fn test_boundary_events_reach_notifier() {
        let (page, _gate) = ready_page();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = page.with_boundary_notifier(tx);
        let mut viewport = NullViewport;
        page.jump_to(SectionId::Product, &mut viewport);

        page.carousel.select(3);
        let d = page.dispatch(&carousel_wheel(100.0), Instant::now(), &mut viewport);
        assert_eq!(d.boundary_event, Some(BoundaryEvent::TourCompleted));
        assert_eq!(rx.try_recv().ok(), Some(BoundaryEvent::TourCompleted));
    }
}
