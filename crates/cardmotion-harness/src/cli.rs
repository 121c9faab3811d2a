use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use cardmotion_runtime::CardConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::error::{HarnessError, Result};
use crate::replay::{ReplayOptions, replay};
use crate::trace::parse_script;

#[derive(Debug, Parser)]
#[command(
    name = "cardmotion-harness",
    about = "Replay input scripts through a cardmotion card and check configurations",
    version
)]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a JSONL input script and print one JSONL record per frame.
    Replay(ReplayArgs),

    /// Load and validate a TOML or JSON card configuration.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    /// Input script (JSONL).
    pub trace: PathBuf,

    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    pub fps: u32,

    /// Card configuration (TOML, or JSON by extension). Defaults apply when
    /// omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long = "settle-frames", default_value_t = 600)]
    pub settle_frames: u32,

    /// Write records here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckConfigArgs {
    pub path: PathBuf,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Replay(args) => run_replay(&args),
        Commands::CheckConfig(args) => run_check_config(&args),
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn run_replay(args: &ReplayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => CardConfig::load(path)?,
        None => CardConfig::default(),
    };
    let script = parse_script(BufReader::new(File::open(&args.trace)?))?;
    let options = ReplayOptions {
        fps: args.fps,
        settle_frames: args.settle_frames,
    };

    let summary = match &args.output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            replay(&script, config, options, &mut out)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut out = BufWriter::new(stdout.lock());
            replay(&script, config, options, &mut out)?
        }
    };

    if !summary.settled {
        return Err(HarnessError::invalid_trace(format!(
            "card did not settle within {} frames after the last input",
            args.settle_frames
        )));
    }
    Ok(())
}

fn run_check_config(args: &CheckConfigArgs) -> Result<()> {
    let config = CardConfig::load(&args.path)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer(
        &mut out,
        &serde_json::json!({
            "status": "ok",
            "path": args.path.display().to_string(),
            "config": config,
        }),
    )?;
    writeln!(out)?;
    Ok(())
}
