use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use trtl_replay::{load_config, replay};

/// Replay a recorded GPS/compass log and report drift and rotation per tick
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Recorded sensor log (JSON lines)
    recording: PathBuf,

    /// Tracker configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drift threshold in degrees, overrides the config file
    #[arg(long)]
    drift_threshold: Option<f64>,

    /// Rotation threshold in degrees, overrides the config file
    #[arg(long)]
    rotation_threshold: Option<f64>,

    /// Write tick reports to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(threshold) = cli.drift_threshold {
        config.drift_threshold = threshold;
    }
    if let Some(threshold) = cli.rotation_threshold {
        config.rotation_threshold = threshold;
    }
    log::info!(
        "Drift threshold {:.1}, rotation threshold {:.1}",
        config.drift_threshold,
        config.rotation_threshold
    );

    let input = File::open(&cli.recording)
        .with_context(|| format!("Cannot open recording {}", cli.recording.display()))?;

    let output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };

    let summary = replay(BufReader::new(input), BufWriter::new(output), config)?;

    log::info!(
        "{} ticks ({} skipped), {} drifting, {} rotating",
        summary.ticks,
        summary.skipped,
        summary.drifting,
        summary.rotating
    );
    Ok(())
}
