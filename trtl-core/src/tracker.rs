//! Tracking Control Loop Context
//!
//! [`Tracker`] owns everything one tracking loop needs: the compass bearing
//! history, the GPS coordinate history, the history of GPS-derived bearings
//! and the thresholds. The host creates one per loop invocation and drops it
//! when the loop ends; there is no global state.
//!
//! # Tick policy
//!
//! Sensor samples are pushed whenever they arrive. On each [`Tracker::tick`]:
//!
//! 1. A history that received nothing since the previous tick is locked, so
//!    its delta reads zero instead of stale.
//! 2. The GPS bearing is derived from the last two fixes. An unchanged fix
//!    is not an error here: the tick is reported with no GPS bearing and
//!    drift is not evaluated.
//! 3. Rotation and drift are checked.
//!
//! The drift reference is the GPS bearing derived on the last tick that had
//! one, which makes `current_bearing - reference` the GPS-implied heading
//! change. It is compared with the compass change since that same tick, not
//! just the last compass delta, so a turn made while no fix arrived is not
//! mistaken for drift. The first GPS bearing only primes the reference.
//!
//! # Threading
//!
//! `Tracker` is `Send` but not internally synchronized. Hosts that sample and
//! evaluate on different threads wrap it in a single `Mutex`.
//!
//! # Example
//!
//! ```rust
//! use trtl_core::{Coordinate, MotionState, Tracker, TrackerConfig};
//!
//! let mut tracker = Tracker::new(TrackerConfig::default(), Coordinate::new(0.0, 0.0), 45.0);
//! tracker.push_fix(Coordinate::new(0.001, 0.001));
//! let report = tracker.tick().unwrap();
//! assert_eq!(report.state, MotionState::Tracking);
//! ```

use serde::Serialize;

use crate::compass::CompassReading;
use crate::config::TrackerConfig;
use crate::error::NavError;
use crate::geodesy::{Coordinate, GeodesicDistance, Haversine};
use crate::history::{BearingHistory, CoordinateHistory};
use crate::motion::{is_drifting, is_rotating, MotionFlags, MotionState};

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    pub state: MotionState,
    pub flags: MotionFlags,
    pub drifting: bool,
    pub rotating: bool,
    /// Bearing of travel from GPS, absent when the fix did not change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_bearing: Option<f64>,
    /// Latest compass bearing
    pub compass_bearing: f64,
    /// Compass change since the previous sample
    pub compass_delta: f64,
    /// Distance between the last two fixes, in the distance function's unit
    pub distance: f64,
}

pub struct Tracker<D = Haversine> {
    config: TrackerConfig,
    compass: BearingHistory,
    coords: CoordinateHistory,
    /// GPS-derived bearings, created with the first defined bearing
    gps_bearings: Option<BearingHistory>,
    /// Compass bearing when the latest GPS bearing was derived
    compass_at_gps: f64,
    distance: D,
    fix_pending: bool,
    heading_pending: bool,
    ticks: u64,
    state: MotionState,
}

impl Tracker<Haversine> {
    /// Create a tracker using a haversine distance with the configured radius.
    pub fn new(config: TrackerConfig, seed: Coordinate, heading: f64) -> Self {
        let distance = Haversine::with_radius(config.earth_radius);
        Tracker::with_distance(config, seed, heading, distance)
    }
}

impl<D: GeodesicDistance> Tracker<D> {
    pub fn with_distance(config: TrackerConfig, seed: Coordinate, heading: f64, distance: D) -> Self {
        log::debug!(
            "Tracker seeded at {:.6},{:.6} heading {:.1}",
            seed.lat,
            seed.lon,
            heading
        );
        Tracker {
            config,
            compass: BearingHistory::new(heading),
            coords: CoordinateHistory::new(seed),
            gps_bearings: None,
            compass_at_gps: heading,
            distance,
            fix_pending: false,
            heading_pending: false,
            ticks: 0,
            state: MotionState::Stationary,
        }
    }

    pub fn push_fix(&mut self, coord: Coordinate) {
        log::trace!("fix {:.6},{:.6}", coord.lat, coord.lon);
        self.coords.append(coord);
        self.fix_pending = true;
    }

    /// Push a true heading, degrees East of North
    pub fn push_heading(&mut self, heading: f64) {
        log::trace!("heading {:.1}", heading);
        self.compass.append(heading);
        self.heading_pending = true;
    }

    pub fn push_compass(&mut self, reading: CompassReading) {
        self.push_heading(reading.true_heading());
    }

    /// Evaluate one tick.
    ///
    /// Only history errors other than an unchanged GPS fix are returned. A
    /// failed tick keeps its tick number and pending samples for the next
    /// call; a history it already locked stays locked.
    pub fn tick(&mut self) -> Result<TickReport, NavError> {
        let tick = self.ticks + 1;

        if !self.fix_pending {
            log::trace!("tick {}: no new fix, locking coordinates", tick);
            self.coords.lock()?;
        }
        if !self.heading_pending {
            log::trace!("tick {}: no new heading, locking compass", tick);
            self.compass.lock()?;
        }

        let mut flags = MotionFlags::empty();

        if is_rotating(&self.compass, self.config.rotation_threshold)? {
            flags |= MotionFlags::ROTATING;
        }

        let gps_bearing = match self.coords.current_bearing() {
            Ok(bearing) => Some(bearing),
            Err(NavError::UnchangedPoint) => {
                log::debug!("tick {}: GPS fix unchanged, no bearing", tick);
                None
            }
            Err(e) => return Err(e),
        };

        let compass_bearing = self.compass.latest()?;
        let compass_delta = self.compass.delta()?;
        let distance = self.coords.distance_travelled(&self.distance)?;

        if let Some(bearing) = gps_bearing {
            match &mut self.gps_bearings {
                Some(history) => {
                    let reference = history.latest()?;
                    // compass change over the same span as the GPS change
                    let span = BearingHistory::from_samples([compass_bearing, self.compass_at_gps]);
                    if is_drifting(&self.coords, reference, &span, self.config.drift_threshold)? {
                        flags |= MotionFlags::DRIFTING;
                    }
                    history.append(bearing);
                }
                None => self.gps_bearings = Some(BearingHistory::new(bearing)),
            }
            self.compass_at_gps = compass_bearing;
        }

        self.ticks = tick;
        self.fix_pending = false;
        self.heading_pending = false;

        let state = MotionState::compose(flags, gps_bearing.is_some());
        if state != self.state {
            log::info!("tick {}: {:?} -> {:?}", tick, self.state, state);
            self.state = state;
        }

        Ok(TickReport {
            tick,
            state,
            flags,
            drifting: flags.contains(MotionFlags::DRIFTING),
            rotating: flags.contains(MotionFlags::ROTATING),
            gps_bearing,
            compass_bearing,
            compass_delta,
            distance,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn compass(&self) -> &BearingHistory {
        &self.compass
    }

    pub fn coords(&self) -> &CoordinateHistory {
        &self.coords
    }

    pub fn gps_bearings(&self) -> Option<&BearingHistory> {
        self.gps_bearings.as_ref()
    }

    /// State reported by the last tick
    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
