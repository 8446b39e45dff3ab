mod carousel;
mod help;
mod loading_screen;
mod navbar;
mod sections;
mod status_bar;

pub use carousel::{dot_at, CarouselWidget};
pub use help::HelpWidget;
pub use loading_screen::LoadingScreenWidget;
pub use navbar::{link_at, NavbarWidget, NAV_LINKS};
pub use sections::SectionsWidget;
pub use status_bar::StatusBarWidget;
