//! Error taxonomy of the navigation core.
//!
//! Errors are returned to the immediate caller. The core never logs them,
//! never retries and never substitutes defaults; that policy belongs to the
//! control loop (see [`crate::tracker`]).

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavError {
    /// The two most recent GPS fixes share a latitude or a longitude, so no
    /// bearing is derived from them.
    #[error("There is not enough difference between points")]
    UnchangedPoint,

    /// A delta or bearing was requested from a history holding too few entries.
    #[error("History holds {available} entries, {needed} needed")]
    InsufficientHistory { needed: usize, available: usize },

    /// The history holds no entries at all.
    #[error("History is empty")]
    EmptyHistory,
}
