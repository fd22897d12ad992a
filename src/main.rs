use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

mod cli;

use cli::{cmd_devices, cmd_plan, init_logging, PlanArgs};
use wd_actions::config::load_config;

/// wd-actions - compose tick-synchronized WebDriver action sequences
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a gesture script and print the payloads it produces
    Plan(PlanArgs),

    /// Show the default device set
    Devices,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = load_config(cli.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| loaded.config.log_level.clone());
    init_logging(&level, cli.debug)?;

    info!("Starting wd-actions v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &loaded.path {
        info!(path = %path.display(), "configuration source");
    }

    let result = match cli.command {
        Commands::Plan(args) => cmd_plan(args, &loaded.config).await,
        Commands::Devices => cmd_devices(&loaded.config).await,
    };

    if let Err(err) = &result {
        error!("Command failed: {:#}", err);
    }
    result
}
