use std::time::{Duration, Instant};

use anyhow::Result;

use vhalor_core::asset::{fetcher_for, preload_model, AssetOutcome};
use vhalor_core::AppConfig;

pub async fn run(config: &AppConfig, source: Option<&str>) -> Result<()> {
    let loading = &config.loading;
    let source = source.or(loading.model_source.as_deref());
    let fetcher = fetcher_for(source, Duration::from_secs(loading.request_timeout_secs))?;

    println!("Preloading product model from {}...", fetcher.describe());

    let started = Instant::now();
    let outcome =
        preload_model(fetcher.as_ref(), Duration::from_secs(loading.asset_timeout_secs)).await;
    let elapsed = started.elapsed();

    match outcome {
        AssetOutcome::Loaded(model) => {
            println!(
                "Loaded '{}' ({} frames) in {} ms",
                model.name,
                model.frames.len(),
                elapsed.as_millis()
            );
        }
        AssetOutcome::Failed { reason } => {
            // Not fatal: the page would continue with the fallback outline
            println!("Preload failed after {} ms: {}", elapsed.as_millis(), reason);
            println!("The page would show the fallback model.");
        }
    }

    Ok(())
}
