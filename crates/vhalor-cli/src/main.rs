use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vhalor_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "vhalor")]
#[command(author, version, about = "A scroll-driven terminal showcase for the Vhalor travel hoodie")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// List the page sections in order
    Sections,
    /// Fetch the product model once and report how the preload settled
    Preload {
        /// http(s) URL or file path; defaults to the configured source
        #[arg(short = 's', long)]
        source: Option<String>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn env_filter(config: &AppConfig) -> EnvFilter {
    EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()))
}

/// The TUI owns the terminal, so it logs to a file instead of stderr
fn init_file_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("opening {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging(config: &AppConfig) {
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let config = Arc::new(AppConfig::load()?);
            init_file_logging(&config)?;
            commands::run::run(config).await
        }
        Commands::Sections => {
            let config = AppConfig::load()?;
            init_stderr_logging(&config);
            commands::sections::run(&config)
        }
        Commands::Preload { source } => {
            let config = AppConfig::load()?;
            init_stderr_logging(&config);
            commands::preload::run(&config, source.as_deref()).await
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = AppConfig::load()?;
                init_stderr_logging(&config);
                commands::config::show(&config)
            }
            // Works even when the existing file no longer parses
            ConfigAction::Init { force } => commands::config::init(force),
        },
    }
}
