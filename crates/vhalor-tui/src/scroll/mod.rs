//! Smooth scroll-into-view for the page viewport
//!
//! - `easing` - easing curves mapping [0, 1] to [0, 1]
//! - `timing` - progress and interpolation helpers
//! - `config` - configuration (re-exported from vhalor-core)
//! - `animation` - the animator combining them
//!
//! A new target always supersedes an animation in flight.

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
