//! Scroll animation controller for the page viewport

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp_u16, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
    easing: EasingType,
}

/// Animates the page offset (in rows) toward a section.
///
/// Call `scroll_to()` to start, then `update()` every frame.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    current_scroll: u16,
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current_scroll: 0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final position once the animation in flight completes
    pub fn target_scroll(&self) -> u16 {
        self.animation
            .as_ref()
            .map(|a| a.to)
            .unwrap_or(self.current_scroll)
    }

    #[inline]
    pub fn current_scroll(&self) -> u16 {
        self.current_scroll
    }

    /// Jump without animating
    pub fn set_scroll(&mut self, scroll: u16) {
        self.animation = None;
        self.current_scroll = scroll;
    }

    /// Animate toward `target`, replacing any animation in flight.
    /// The new animation starts from wherever the old one had got to.
    pub fn scroll_to(&mut self, target: u16, max_scroll: u16, now: Instant) {
        let target = target.min(max_scroll);

        if !self.config.is_smooth() {
            self.set_scroll(target);
            return;
        }

        if self.current_scroll == target {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current_scroll,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, max_scroll: u16, now: Instant) -> u16 {
        if let Some(anim) = &self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current_scroll = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current_scroll = lerp_u16(anim.from, anim.to, t).min(max_scroll);
            }
        } else {
            self.current_scroll = self.current_scroll.min(max_scroll);
        }
        self.current_scroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smooth(duration_ms: u64, easing: EasingType) -> ScrollAnimator {
        ScrollAnimator::new(ScrollConfig {
            smooth_enabled: true,
            animation_duration_ms: duration_ms,
            easing,
            ..Default::default()
        })
    }

    #[test]
    fn test_jumps_when_disabled() {
        let mut animator = ScrollAnimator::new(ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        });
        animator.scroll_to(100, 200, Instant::now());
        assert_eq!(animator.current_scroll(), 100);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_animates_to_target() {
        let start = Instant::now();
        let mut animator = smooth(100, EasingType::Linear);
        animator.scroll_to(40, 200, start);
        assert!(animator.is_animating());
        assert_eq!(animator.update(200, start + Duration::from_millis(50)), 20);
        assert_eq!(animator.update(200, start + Duration::from_millis(100)), 40);
        assert!(!animator.is_animating());
    }

    #[test]
    fn test_new_target_supersedes() {
        let start = Instant::now();
        let mut animator = smooth(100, EasingType::Linear);
        animator.scroll_to(40, 200, start);
        animator.update(200, start + Duration::from_millis(50));

        let later = start + Duration::from_millis(50);
        animator.scroll_to(0, 200, later);
        assert_eq!(animator.target_scroll(), 0);
        // Retargets from the mid-flight position
        assert_eq!(animator.update(200, later + Duration::from_millis(50)), 10);
        assert_eq!(animator.update(200, later + Duration::from_millis(100)), 0);
    }

    #[test]
    fn test_target_clamped() {
        let mut animator = smooth(100, EasingType::Cubic);
        animator.scroll_to(300, 100, Instant::now());
        assert_eq!(animator.target_scroll(), 100);
    }
}
