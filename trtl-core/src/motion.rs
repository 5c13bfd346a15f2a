//! Drift and Rotation Classification
//!
//! Stateless checks evaluated once per tick against the bearing and
//! coordinate histories. Drift and rotation are evaluated independently and
//! may both hold at once; [`MotionFlags`] keeps both, [`MotionState`] is the
//! single state a control loop acts on.
//!
//! Both checks propagate history errors unchanged. Seed the histories with at
//! least two distinct fixes before the first drift evaluation.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::history::{BearingHistory, CoordinateHistory};

bitflags! {
    /// Anomalies detected in one tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MotionFlags: u8 {
        /// GPS-implied and compass-implied heading changes disagree
        const DRIFTING = 0b0000_0001;
        /// Compass heading changed by more than the noise threshold
        const ROTATING = 0b0000_0010;
    }
}

/// Motion state of the platform for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionState {
    /// No usable GPS displacement this tick
    #[default]
    Stationary,
    /// Moving consistently with the compass heading
    Tracking,
    /// Displaced sideways relative to the indicated heading
    Drifting,
    /// Heading is changing
    Rotating,
}

impl MotionState {
    /// Collapse the flags of a tick into one state.
    ///
    /// Rotation wins over drift; without either flag the state depends on
    /// whether a GPS bearing was available.
    pub fn compose(flags: MotionFlags, has_gps_bearing: bool) -> Self {
        if flags.contains(MotionFlags::ROTATING) {
            MotionState::Rotating
        } else if flags.contains(MotionFlags::DRIFTING) {
            MotionState::Drifting
        } else if has_gps_bearing {
            MotionState::Tracking
        } else {
            MotionState::Stationary
        }
    }
}

/// Check if the vessel is drifting.
///
/// `gps_reference` is the previously derived GPS bearing, so
/// `current_bearing - gps_reference` is the GPS-implied heading change. It is
/// compared with the compass-implied change, `compass.delta()`:
///
/// ```text
/// |(coords.current_bearing() - gps_reference) - compass.delta()| > threshold
/// ```
///
/// Neither difference is wrapped to [-180, 180].
pub fn is_drifting(
    coords: &CoordinateHistory,
    gps_reference: f64,
    compass: &BearingHistory,
    threshold: f64,
) -> Result<bool, NavError> {
    let gps_change = coords.current_bearing()? - gps_reference;
    let diff = (gps_change - compass.delta()?).abs();
    Ok(diff > threshold)
}

/// Check if the vessel is rotating: `|compass.delta()| > threshold`.
pub fn is_rotating(compass: &BearingHistory, threshold: f64) -> Result<bool, NavError> {
    Ok(compass.delta()?.abs() > threshold)
}
