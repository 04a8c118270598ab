//! # Stockmark Configuration Validator
//!
//! Command-line tool for validating Stockmark configuration across environments before
//! wiring an engine to a live catalog service.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use stockmark_core::config::ConfigManager;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stockmark-config-validator")]
#[command(about = "Validate Stockmark configuration files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Environment to validate (development, test, production, ...)
    #[arg(short, long, env = "STOCKMARK_ENV", default_value = "development")]
    environment: String,

    /// Configuration directory path (default: ./config)
    #[arg(short, long, env = "STOCKMARK_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the effective configuration as JSON
    #[arg(long)]
    show: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(err) = validate(&cli) {
        error!("{err:#}");
        eprintln!("❌ Configuration invalid for '{}': {err:#}", cli.environment);
        process::exit(1);
    }
}

fn validate(cli: &Cli) -> anyhow::Result<()> {
    let manager =
        ConfigManager::load_from_directory_with_env(cli.config_dir.clone(), &cli.environment)
            .with_context(|| format!("loading environment '{}'", cli.environment))?;

    println!(
        "✅ Configuration valid for '{}' ({})",
        manager.environment(),
        manager.config_directory().display()
    );

    if cli.show {
        let rendered = serde_json::to_string_pretty(&manager.debug_config())
            .context("rendering configuration")?;
        println!("{rendered}");
    }

    Ok(())
}
