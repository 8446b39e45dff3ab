use std::time::Duration;

pub use vhalor_core::{EasingType, ScrollConfig};

/// Duration helpers for ScrollConfig
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Frame interval while animating
    fn animation_tick_duration(&self) -> Duration;

    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16)
        } else {
            // Never poll with a zero timeout
            Duration::from_millis((1000 / self.animation_fps as u64).max(1))
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
