use anyhow::{bail, Result};

use vhalor_core::AppConfig;
use vhalor_tui::themes::available_themes;

pub fn show(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("# {}", path.display());
    } else {
        println!("# {} (not found, showing defaults)", path.display());
    }
    println!("# built-in themes: {}", available_themes().join(", "));
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(force: bool) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}
