pub mod asset;
pub mod background;
pub mod carousel;
pub mod config;
pub mod content;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod gesture;
pub mod navigation;
pub mod page;
pub mod section;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use error::{Error, Result};
pub use navigation::{NavigationController, NavigationSnapshot, Outcome, Viewport};
pub use page::{Dispatch, Page};
pub use section::{SectionId, Sections};
