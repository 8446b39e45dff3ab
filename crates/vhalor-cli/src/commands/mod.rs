pub mod config;
pub mod preload;
pub mod run;
pub mod sections;
