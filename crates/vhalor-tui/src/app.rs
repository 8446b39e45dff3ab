use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::layout::Rect;
use tokio::sync::{mpsc, watch};
use tracing::debug;
use vhalor_core::asset::{AssetOutcome, ProductModel};
use vhalor_core::background::{SkyPhase, SpringProgress};
use vhalor_core::carousel::{BoundaryEvent, CameraRig};
use vhalor_core::content::AIRLINE_FACTS;
use vhalor_core::gate::Readiness;
use vhalor_core::geometry::{IntersectionObserver, SectionLayout};
use vhalor_core::gesture::{EventTarget, Signal, SwipeTracker};
use vhalor_core::{AppConfig, Dispatch, NavigationSnapshot, Page, SectionId, Viewport};

use crate::input::Action;
use crate::scroll::ScrollAnimator;
use crate::theme::Theme;

/// Frames of the turntable advance once every this many ticks
const TURNTABLE_TICKS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Where a section currently sits on screen. `top` may be above the page area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFrame {
    pub top: i32,
    pub height: u16,
    pub x: u16,
    pub width: u16,
}

impl SectionFrame {
    pub fn contains_row(&self, row: u16) -> bool {
        let row = row as i32;
        row >= self.top && row < self.top + self.height as i32
    }
}

/// Scrolls the page viewport on behalf of the navigation controller
struct PageViewport<'a> {
    layout: &'a SectionLayout,
    scroller: &'a mut ScrollAnimator,
    max_scroll: u16,
    now: Instant,
}

impl Viewport for PageViewport<'_> {
    fn scroll_into_view(&mut self, section: SectionId) -> bool {
        match self.layout.offset_of(section) {
            Some(top) => {
                self.scroller
                    .scroll_to(top.round() as u16, self.max_scroll, self.now);
                true
            }
            None => false,
        }
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub page: Page,
    pub readiness: watch::Receiver<Readiness>,
    pub snapshot: watch::Receiver<NavigationSnapshot>,
    pub scroller: ScrollAnimator,
    /// Section spans in rows; every section is one page area tall
    pub layout: SectionLayout,
    pub observer: IntersectionObserver,
    pub swipe: SwipeTracker,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for "gg"
    pub pending_key: Option<char>,
    pub page_area: Rect,
    pub navbar_area: Rect,
    pub model: ProductModel,
    pub camera: CameraRig,
    pub sky: SpringProgress,
    pub fact_index: usize,
    pub spinner_frame: usize,
    tick_count: usize,
    last_fact_change: Instant,
    last_frame: Instant,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        theme: Theme,
        readiness: watch::Receiver<Readiness>,
        now: Instant,
    ) -> Result<Self> {
        let page = Page::new(&config, readiness.clone())?;
        let snapshot = page.navigation.subscribe();
        let layout = SectionLayout::uniform(page.navigation.sections(), 0.0);
        let camera = CameraRig::new(page.carousel.current().camera);

        Ok(Self {
            scroller: ScrollAnimator::new(config.ui.scroll.clone()),
            observer: IntersectionObserver::new(config.navigation.visibility_threshold),
            theme,
            page,
            readiness,
            snapshot,
            layout,
            swipe: SwipeTracker::new(),
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            page_area: Rect::default(),
            navbar_area: Rect::default(),
            model: ProductModel::fallback(),
            camera,
            sky: SpringProgress::default(),
            fact_index: 0,
            spinner_frame: 0,
            tick_count: 0,
            last_fact_change: now,
            last_frame: now,
            config,
        })
    }

    /// Also forward carousel boundary events to a channel
    pub fn with_boundary_notifier(mut self, tx: mpsc::UnboundedSender<BoundaryEvent>) -> Self {
        self.page = self.page.with_boundary_notifier(tx);
        self
    }

    pub fn is_loading(&self) -> bool {
        self.readiness.borrow().is_loading()
    }

    pub fn models_failed(&self) -> bool {
        self.readiness.borrow().models_failed()
    }

    pub fn current_section(&self) -> SectionId {
        self.snapshot.borrow().current_section
    }

    pub fn scroll_progress(&self) -> f64 {
        self.snapshot.borrow().scroll_progress
    }

    pub fn sky_phase(&self) -> SkyPhase {
        SkyPhase::from_progress(self.scroll_progress())
    }

    pub fn current_fact(&self) -> &'static str {
        AIRLINE_FACTS[self.fact_index % AIRLINE_FACTS.len()]
    }

    pub fn turntable_step(&self) -> usize {
        self.tick_count / TURNTABLE_TICKS
    }

    /// Rows in one section
    pub fn section_rows(&self) -> u16 {
        self.page_area.height
    }

    pub fn max_scroll(&self) -> u16 {
        self.layout.max_scroll(self.section_rows() as f64).round() as u16
    }

    /// The model preload settled
    pub fn set_model(&mut self, outcome: AssetOutcome) {
        self.model = outcome.into_model();
    }

    /// Called from draw with the area the page occupies
    pub fn set_page_area(&mut self, area: Rect) {
        if area == self.page_area {
            return;
        }
        let section = self.current_section();
        self.page_area = area;
        self.layout = SectionLayout::uniform(self.page.navigation.sections(), area.height as f64);
        let top = self.layout.offset_of(section).unwrap_or(0.0).round() as u16;
        self.scroller.set_scroll(top.min(self.max_scroll()));
        self.observer.reset();
        debug!("Page area {}x{}, {} at row {}", area.width, area.height, section, top);
    }

    pub fn section_frame(&self, id: SectionId) -> Option<SectionFrame> {
        let top = self.layout.offset_of(id)?.round() as i32;
        let height = self.layout.height_of(id)?.round() as u16;
        Some(SectionFrame {
            top: self.page_area.y as i32 + top - self.scroller.current_scroll() as i32,
            height,
            x: self.page_area.x,
            width: self.page_area.width,
        })
    }

    /// Gestures on the product section belong to the carousel
    pub fn pointer_target(&self, row: u16) -> EventTarget {
        match self.section_frame(SectionId::Product) {
            Some(frame) if frame.contains_row(row) && self.in_page(row) => EventTarget::Carousel,
            _ => EventTarget::Page,
        }
    }

    /// Arrow keys drive the carousel while the product section is current
    pub fn key_target(&self) -> EventTarget {
        if self.current_section() == SectionId::Product {
            EventTarget::Carousel
        } else {
            EventTarget::Page
        }
    }

    fn in_page(&self, row: u16) -> bool {
        row >= self.page_area.y && row < self.page_area.y + self.page_area.height
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }

    pub fn apply(&mut self, action: Action, now: Instant) {
        if action != Action::PendingG {
            self.clear_pending_key();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Arrow(key) => {
                let target = self.key_target();
                self.dispatch(Signal::Key { key, target }, now);
            }
            Action::JumpToTop => {
                if let Some(first) = self.page.navigation.sections().get(0) {
                    self.jump_to(first, now);
                }
            }
            Action::JumpToBottom => {
                let sections = self.page.navigation.sections();
                if let Some(last) = sections.get(sections.last_index()) {
                    self.jump_to(last, now);
                }
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::GoTo(section) => self.jump_to(section, now),
            Action::SelectFeature(index) => {
                if !self.is_loading() && self.page.carousel.select(index) {
                    debug!("Selected feature {}", index);
                }
            }
            Action::ToggleHelp => {
                self.mode = match self.mode {
                    Mode::Normal => Mode::Help,
                    Mode::Help => Mode::Normal,
                };
            }
            Action::ExitMode => {
                self.swipe.cancel();
                self.mode = Mode::Normal;
                self.status_message = None;
            }
            Action::Gesture(signal) => {
                self.dispatch(signal, now);
            }
            Action::TouchStart { y, target } => self.swipe.begin(y, target),
            Action::TouchEnd { y } => {
                if let Some(signal) = self.swipe.finish(y) {
                    self.dispatch(signal, now);
                }
            }
            Action::None => {}
        }
    }

    /// Route a signal through the page and the viewport
    pub fn dispatch(&mut self, signal: Signal, now: Instant) -> Dispatch {
        let max_scroll = self.max_scroll();
        let mut viewport = PageViewport {
            layout: &self.layout,
            scroller: &mut self.scroller,
            max_scroll,
            now,
        };
        let dispatch = self.page.dispatch(&signal, now, &mut viewport);

        if let Some(event) = dispatch.boundary_event {
            self.status_message = Some(
                match event {
                    BoundaryEvent::AtFirstReached => "Start of the feature tour",
                    BoundaryEvent::TourCompleted => "Feature tour complete",
                }
                .to_string(),
            );
        }
        dispatch
    }

    fn jump_to(&mut self, section: SectionId, now: Instant) {
        let max_scroll = self.max_scroll();
        let mut viewport = PageViewport {
            layout: &self.layout,
            scroller: &mut self.scroller,
            max_scroll,
            now,
        };
        self.page.jump_to(section, &mut viewport);
    }

    /// Per-frame update: scroll animation, scroll progress, intersections,
    /// sky spring and camera
    pub fn on_frame(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        if self.readiness.has_changed().unwrap_or(false) {
            self.readiness.borrow_and_update();
            self.page.navigation.sync_readiness();
        }

        if self.page_area.height > 0 {
            let rows = self.section_rows() as f64;
            let offset = self.scroller.update(self.max_scroll(), now) as f64;
            let geometry = self.layout.geometry(offset, rows);
            self.page.navigation.update_scroll_progress(geometry);

            for signal in self.observer.observe(&self.layout, offset, rows) {
                self.dispatch(signal, now);
            }
        }

        self.sky.set_target(self.scroll_progress());
        self.sky.tick(elapsed);

        self.camera.retarget(self.page.carousel.current().camera);
        self.camera.tick();
    }

    /// Idle tick: spinner, turntable and loading facts
    pub fn tick(&mut self, now: Instant) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        self.tick_count = self.tick_count.wrapping_add(1);

        let interval = Duration::from_millis(self.config.loading.fact_interval_ms);
        if self.is_loading() && now.saturating_duration_since(self.last_fact_change) >= interval {
            self.fact_index = (self.fact_index + 1) % AIRLINE_FACTS.len();
            self.last_fact_change = now;
        }
    }

    /// Animations in flight want the faster frame rate
    pub fn needs_fast_update(&self) -> bool {
        self.scroller.is_animating() || !self.camera.is_settled() || !self.sky.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vhalor_core::gate::LoadingGate;
    use vhalor_core::gesture::NavKey;

    fn ready_app() -> (App, LoadingGate, Instant) {
        let gate = LoadingGate::new();
        let now = Instant::now();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            gate.subscribe(),
            now,
        )
        .unwrap();
        gate.page_loaded();
        gate.assets_settled(&AssetOutcome::Loaded(ProductModel::fallback()));
        app.set_page_area(Rect::new(0, 1, 80, 20));
        app.on_frame(now);
        (app, gate, now)
    }

    #[test]
    fn test_loading_blocks_input() {
        let gate = LoadingGate::new();
        let now = Instant::now();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            gate.subscribe(),
            now,
        )
        .unwrap();
        app.set_page_area(Rect::new(0, 1, 80, 20));
        app.apply(Action::Arrow(NavKey::ArrowDown), now);
        app.on_frame(now + Duration::from_secs(1));
        assert_eq!(app.current_section(), SectionId::Hero);
        assert!(app.is_loading());
    }

    #[test]
    fn test_arrow_scrolls_to_next_section() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::Arrow(NavKey::ArrowDown), now);
        assert_eq!(app.current_section(), SectionId::Video);
        assert_eq!(app.scroller.target_scroll(), 20);

        app.on_frame(now + Duration::from_secs(2));
        assert_eq!(app.scroller.current_scroll(), 20);
        assert!((app.scroll_progress() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_product_section_routes_keys_to_carousel() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::GoTo(SectionId::Product), now);
        app.on_frame(now + Duration::from_secs(2));
        assert_eq!(app.key_target(), EventTarget::Carousel);

        app.apply(Action::Arrow(NavKey::ArrowRight), now);
        assert_eq!(app.page.carousel.index(), 1);
        assert_eq!(app.current_section(), SectionId::Product);

        // Product fills the page area, so the pointer is over the carousel
        assert_eq!(app.pointer_target(5), EventTarget::Carousel);
        assert_eq!(app.pointer_target(0), EventTarget::Page);
    }

    #[test]
    fn test_drag_becomes_swipe() {
        let (mut app, _gate, now) = ready_app();
        app.apply(
            Action::TouchStart {
                y: 300.0,
                target: EventTarget::Page,
            },
            now,
        );
        app.apply(Action::TouchEnd { y: 100.0 }, now);
        assert_eq!(app.current_section(), SectionId::Video);
    }

    #[test]
    fn test_resize_keeps_current_section() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::GoTo(SectionId::About), now);
        app.on_frame(now + Duration::from_secs(2));
        app.set_page_area(Rect::new(0, 1, 100, 30));
        assert_eq!(app.scroller.current_scroll(), 90);
        assert_eq!(app.current_section(), SectionId::About);
    }

    #[test]
    fn test_gg_sequence() {
        let (mut app, _gate, now) = ready_app();
        app.apply(Action::JumpToBottom, now);
        assert_eq!(app.current_section(), SectionId::Contact);
        app.apply(Action::PendingG, now);
        assert_eq!(app.pending_key, Some('g'));
        app.apply(Action::JumpToTop, now);
        assert_eq!(app.pending_key, None);
        assert_eq!(app.current_section(), SectionId::Hero);
    }

    #[test]
    fn test_facts_rotate_while_loading() {
        let gate = LoadingGate::new();
        let now = Instant::now();
        let mut app = App::new(
            Arc::new(AppConfig::default()),
            Theme::default(),
            gate.subscribe(),
            now,
        )
        .unwrap();
        app.tick(now + Duration::from_millis(1000));
        assert_eq!(app.fact_index, 0);
        app.tick(now + Duration::from_millis(3500));
        assert_eq!(app.fact_index, 1);
    }
}
