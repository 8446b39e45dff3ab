use anyhow::Result;

use vhalor_core::content::section_copy;
use vhalor_core::{AppConfig, Sections};

pub fn run(config: &AppConfig) -> Result<()> {
    let sections = Sections::standard();

    println!("Sections ({}):\n", sections.len());
    for (index, id) in sections.iter().enumerate() {
        println!(
            "  {}. #{:<8} {:<9} {}",
            index + 1,
            id.anchor(),
            id.label(),
            section_copy(id).heading
        );
    }

    let nav = &config.navigation;
    println!();
    println!(
        "Gesture cooldown {} ms, swipe threshold {} px, visibility threshold {}",
        nav.cooldown_ms, nav.min_swipe_distance, nav.visibility_threshold
    );

    Ok(())
}
