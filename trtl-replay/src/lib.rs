//! Replay recorded GPS/compass logs through the TRTL tracker.
//!
//! A recording is a JSON-lines file of sensor records (see [`recording`]).
//! [`replay`] feeds the records into one [`trtl_core::Tracker`] and writes a
//! [`trtl_core::TickReport`] per tick as one JSON line.

pub mod recording;
pub mod replay;

pub use recording::{parse_line, Record};
pub use replay::{load_config, replay, ReplaySummary};
