//! Recording format
//!
//! One JSON object per line, tagged by `type`:
//!
//! ```text
//! # comments and blank lines are ignored
//! {"type":"seed","lat":41.355,"lon":-88.787,"heading":180.0}
//! {"type":"fix","lat":41.3551,"lon":-88.7869}
//! {"type":"heading","heading":182.5}
//! {"type":"compass","magneticHeading":178.0,"variation":-3.5}
//! {"type":"tick"}
//! ```
//!
//! The seed record must come first.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use trtl_core::{CompassReading, Coordinate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// Starts a tracker at this position and true heading
    Seed {
        lat: f64,
        lon: f64,
        #[serde(default)]
        heading: f64,
    },
    Fix {
        lat: f64,
        lon: f64,
    },
    /// True heading, degrees East of North
    Heading {
        heading: f64,
    },
    /// Magnetic compass reading
    Compass(CompassReading),
    Tick,
}

impl Record {
    pub fn fix(&self) -> Option<Coordinate> {
        match self {
            Record::Seed { lat, lon, .. } | Record::Fix { lat, lon } => Some(Coordinate::new(*lat, *lon)),
            _ => None,
        }
    }
}

/// Parse one recording line. Returns `None` for blank and comment lines.
pub fn parse_line(line_no: usize, line: &str) -> anyhow::Result<Option<Record>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let record = serde_json::from_str(line).with_context(|| format!("line {}: invalid record", line_no))?;
    Ok(Some(record))
}
