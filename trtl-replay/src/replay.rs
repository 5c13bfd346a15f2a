//! Replay loop
//!
//! Hosts the tracker the way a live control loop would: samples are pushed
//! as they appear, each `tick` record evaluates the tracker, and a tick that
//! fails is logged and skipped.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context};
use trtl_core::{Coordinate, Tracker, TrackerConfig};

use crate::recording::{parse_line, Record};

/// Totals over one replay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Ticks evaluated and reported
    pub ticks: u64,
    /// Ticks that failed and were skipped
    pub skipped: u64,
    pub drifting: u64,
    pub rotating: u64,
    /// Number of seed records (tracker restarts + 1)
    pub seeds: u64,
}

/// Load a tracker configuration file, or the defaults when `path` is `None`.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };
    let json = fs::read_to_string(path).with_context(|| format!("Cannot read config {}", path.display()))?;
    let config = TrackerConfig::from_json(&json).with_context(|| format!("Cannot load config {}", path.display()))?;
    log::debug!("Loaded {:?} from {}", config, path.display());
    Ok(config)
}

/// Replay `input` and write one JSON report per tick to `output`.
pub fn replay<R: BufRead, W: Write>(input: R, mut output: W, config: TrackerConfig) -> anyhow::Result<ReplaySummary> {
    config.validate()?;

    let mut tracker: Option<Tracker> = None;
    let mut summary = ReplaySummary::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("line {}: read failed", line_no))?;
        let Some(record) = parse_line(line_no, &line)? else {
            continue;
        };

        if let Record::Seed { lat, lon, heading } = record {
            if tracker.is_some() {
                log::info!("line {}: new seed, restarting tracker", line_no);
            }
            tracker = Some(Tracker::new(config, Coordinate::new(lat, lon), heading));
            summary.seeds += 1;
            continue;
        }

        let Some(tracker) = tracker.as_mut() else {
            bail!("line {}: {:?} record before seed", line_no, record);
        };

        match record {
            Record::Fix { lat, lon } => tracker.push_fix(Coordinate::new(lat, lon)),
            Record::Heading { heading } => tracker.push_heading(heading),
            Record::Compass(reading) => tracker.push_compass(reading),
            Record::Tick => match tracker.tick() {
                Ok(report) => {
                    summary.ticks += 1;
                    summary.drifting += report.drifting as u64;
                    summary.rotating += report.rotating as u64;
                    serde_json::to_writer(&mut output, &report)?;
                    output.write_all(b"\n")?;
                }
                Err(e) => {
                    log::warn!("line {}: tick skipped: {}", line_no, e);
                    summary.skipped += 1;
                }
            },
            // handled before the tracker lookup
            Record::Seed { .. } => {}
        }
    }

    output.flush()?;
    Ok(summary)
}
