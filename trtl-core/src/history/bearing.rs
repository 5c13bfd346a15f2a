//! Compass bearing history

use serde::{Deserialize, Serialize};

use super::{BoundedHistory, HISTORY_CAPACITY};
use crate::angle::normalize_degrees;
use crate::error::NavError;

/// Most-recent-first history of bearings, degrees East of North.
///
/// Holds at most [`HISTORY_CAPACITY`] entries. Plain [`append`](Self::append)
/// stores the value as given; only [`adjust`](Self::adjust) normalizes.
#[derive(Debug, Clone, PartialEq)]
pub struct BearingHistory {
    bearings: BoundedHistory<f64>,
}

impl BearingHistory {
    /// Create a history seeded with `bearing`.
    ///
    /// The seed is stored twice, so `delta()` is 0.0 straight away.
    pub fn new(bearing: f64) -> Self {
        BearingHistory {
            bearings: BoundedHistory::seeded(bearing, HISTORY_CAPACITY),
        }
    }

    /// Build from bearings ordered newest first. May be shorter than two.
    pub fn from_samples<I: IntoIterator<Item = f64>>(bearings: I) -> Self {
        BearingHistory {
            bearings: BoundedHistory::from_newest_first(bearings, HISTORY_CAPACITY),
        }
    }

    pub fn append(&mut self, bearing: f64) {
        self.bearings.push(bearing);
    }

    pub fn latest(&self) -> Result<f64, NavError> {
        self.bearings.latest()
    }

    /// Signed change between the two most recent bearings.
    ///
    /// Not wrapped: a turn from 350 to 10 reads as -340.
    pub fn delta(&self) -> Result<f64, NavError> {
        let (latest, previous) = self.bearings.pair()?;
        Ok(latest - previous)
    }

    /// Repeat the latest bearing when no new sample arrived this tick.
    pub fn lock(&mut self) -> Result<(), NavError> {
        self.bearings.repeat_latest()
    }

    /// Append `(latest + delta) mod 360`.
    pub fn adjust(&mut self, delta: f64) -> Result<(), NavError> {
        let latest = self.latest()?;
        self.append(normalize_degrees(latest + delta));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bearings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bearings.is_empty()
    }

    /// Bearings newest first
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.bearings.iter().copied()
    }

    pub fn snapshot(&self) -> BearingSnapshot {
        BearingSnapshot {
            bearings: self.iter().collect(),
        }
    }
}

/// Serializable copy of a bearing history, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BearingSnapshot {
    pub bearings: Vec<f64>,
}

impl From<BearingSnapshot> for BearingHistory {
    fn from(snapshot: BearingSnapshot) -> Self {
        BearingHistory::from_samples(snapshot.bearings)
    }
}
