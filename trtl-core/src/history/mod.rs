//! Bounded Sample Histories
//!
//! Fixed-capacity, newest-first histories used by the differential
//! estimator.
//!
//! # Features
//!
//! - O(1) push-front with eviction of the oldest sample
//! - Seeded constructors that duplicate the first sample, so two-sample
//!   deltas are defined immediately after construction
//! - "Lock" operation that repeats the latest sample when no new one arrived
//!
//! # Retention
//!
//! Both histories share [`HISTORY_CAPACITY`], but they trim differently:
//!
//! | History | Trim trigger | Max length |
//! |---------|--------------|------------|
//! | [`BearingHistory`] | length > 10 | 10 |
//! | [`CoordinateHistory`] | length >= 10 | 9 |
//!
//! Downstream thresholds were tuned against this behaviour, so it is kept.

use std::collections::VecDeque;

use crate::error::NavError;

mod bearing;
mod coords;

pub use bearing::{BearingHistory, BearingSnapshot};
pub use coords::{CoordinateHistory, CoordinateSnapshot};

/// Nominal capacity of both histories
pub const HISTORY_CAPACITY: usize = 10;

/// Newest-first ring of samples holding at most `retain` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    samples: VecDeque<T>,
    retain: usize,
}

impl<T: Copy> BoundedHistory<T> {
    /// Create an empty history keeping at most `retain` samples.
    pub fn new(retain: usize) -> Self {
        BoundedHistory {
            samples: VecDeque::with_capacity(retain + 1),
            retain,
        }
    }

    /// Create a history holding `seed` twice.
    ///
    /// Postcondition: `len() == 2` (if `retain >= 2`) and both entries are
    /// identical, so [`Self::pair`] succeeds right away.
    pub fn seeded(seed: T, retain: usize) -> Self {
        let mut history = Self::new(retain);
        history.push(seed);
        history.push(seed);
        history
    }

    /// Build a history from samples ordered newest first.
    ///
    /// Samples beyond `retain` are dropped from the old end.
    pub fn from_newest_first<I: IntoIterator<Item = T>>(samples: I, retain: usize) -> Self {
        let mut history = Self::new(retain);
        history.samples.extend(samples.into_iter().take(retain));
        history
    }

    /// Insert a sample at the front, evicting the oldest past `retain`.
    pub fn push(&mut self, sample: T) {
        self.samples.push_front(sample);
        while self.samples.len() > self.retain {
            self.samples.pop_back();
        }
    }

    /// Push the latest sample again.
    pub fn repeat_latest(&mut self) -> Result<(), NavError> {
        let latest = self.latest()?;
        self.push(latest);
        Ok(())
    }

    pub fn latest(&self) -> Result<T, NavError> {
        self.samples.front().copied().ok_or(NavError::EmptyHistory)
    }

    /// The two most recent samples as `(latest, previous)`.
    pub fn pair(&self) -> Result<(T, T), NavError> {
        match (self.samples.front(), self.samples.get(1)) {
            (Some(&latest), Some(&previous)) => Ok((latest, previous)),
            _ => Err(NavError::InsufficientHistory {
                needed: 2,
                available: self.samples.len(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn retain_limit(&self) -> usize {
        self.retain
    }

    /// Iterate newest first
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.samples.iter()
    }
}
