//! TRTL Differential Navigation Core
//!
//! Platform-independent estimator that tracks a moving vessel or antenna
//! platform from successive GPS fixes and compass bearings, and flags two
//! anomalous motion states:
//!
//! - **Drifting**: the GPS-implied heading change disagrees with the
//!   compass-implied heading change (lateral displacement).
//! - **Rotating**: the compass heading changed by more than a noise threshold
//!   between consecutive samples.
//!
//! This crate performs no I/O. Serial ports, NMEA parsing and mount control
//! belong to the host application, which pushes validated numbers in and
//! reads booleans and bearings out.
//!
//! # Architecture
//!
//! - **history**: bounded newest-first histories of bearings and coordinates
//! - **motion**: pure drift/rotation classification functions
//! - **geodesy**: distance collaborator seam, haversine by default
//! - **compass**: magnetic to true heading conversion
//! - **tracker**: control-loop context that owns the histories
//! - **config**: thresholds for the tracker
//!
//! # Usage
//!
//! ```rust
//! use trtl_core::{is_rotating, BearingHistory, Coordinate, CoordinateHistory};
//!
//! let mut compass = BearingHistory::new(170.0);
//! compass.adjust(20.0).unwrap();
//! assert_eq!(compass.latest().unwrap(), 190.0);
//! assert!(is_rotating(&compass, 15.0).unwrap());
//!
//! let mut coords = CoordinateHistory::new(Coordinate::new(0.0, 0.0));
//! coords.append(Coordinate::new(1.0, 1.0));
//! assert!((coords.current_bearing().unwrap() - 45.0).abs() < 1e-9);
//! ```

pub mod angle;
pub mod compass;
pub mod config;
pub mod error;
pub mod geodesy;
pub mod history;
pub mod motion;
pub mod tracker;

pub use compass::CompassReading;
pub use config::{ConfigError, TrackerConfig};
pub use error::NavError;
pub use geodesy::{Coordinate, GeodesicDistance, Haversine, MEAN_EARTH_RADIUS};
pub use history::{BearingHistory, BoundedHistory, CoordinateHistory, HISTORY_CAPACITY};
pub use motion::{is_drifting, is_rotating, MotionFlags, MotionState};
pub use tracker::{TickReport, Tracker};
