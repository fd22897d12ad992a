use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tokio::fs;
use tracing::info;

use wd_actions::config::ActionsConfig;
use wd_actions::script::{parse_script, run_script};
use wd_actions::{ActionSequenceBuilder, RecordingTransport};

#[derive(Args, Clone, Debug)]
pub struct PlanArgs {
    /// Gesture script (YAML list of steps)
    #[arg(short, long, value_name = "FILE")]
    pub script: PathBuf,

    /// Disable tick padding between devices
    #[arg(long = "async")]
    pub async_mode: bool,

    /// Pretty-print the payloads
    #[arg(long)]
    pub pretty: bool,
}

/// Replay a script and print every payload it would submit.
pub async fn cmd_plan(args: PlanArgs, config: &ActionsConfig) -> Result<()> {
    let content = fs::read_to_string(&args.script)
        .await
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let steps = parse_script(&content).context("Failed to parse script")?;

    let mut options = config.builder_options();
    options.async_mode |= args.async_mode;

    let transport = Arc::new(RecordingTransport::new());
    let mut builder = ActionSequenceBuilder::with_options(transport.clone(), &options);
    run_script(&mut builder, &steps)
        .await
        .context("Script failed")?;
    if builder.tick_count() > 0 {
        builder.perform().await.context("Final perform failed")?;
    }

    let payloads: Vec<Value> = transport
        .payloads()
        .iter()
        .map(|payload| payload.to_json())
        .collect();
    info!(
        steps = steps.len(),
        payloads = payloads.len(),
        "Planned action sequence"
    );

    let output = if args.pretty {
        serde_json::to_string_pretty(&payloads)?
    } else {
        serde_json::to_string(&payloads)?
    };
    println!("{}", output);
    Ok(())
}
