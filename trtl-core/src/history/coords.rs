//! GPS coordinate history and GPS-derived bearing

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::{BoundedHistory, HISTORY_CAPACITY};
use crate::angle::normalize_degrees;
use crate::error::NavError;
use crate::geodesy::{Coordinate, GeodesicDistance};

/// Coordinates are trimmed once the length reaches the capacity, so at most
/// nine fixes are retained.
const COORDINATE_RETAIN: usize = HISTORY_CAPACITY - 1;

/// Most-recent-first history of GPS fixes in decimal degrees.
///
/// Latitude and longitude are stored as pairs, so the two sequences always
/// have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateHistory {
    coords: BoundedHistory<Coordinate>,
}

impl CoordinateHistory {
    /// Create a history seeded with `seed` as both current and previous fix.
    pub fn new(seed: Coordinate) -> Self {
        CoordinateHistory {
            coords: BoundedHistory::seeded(seed, COORDINATE_RETAIN),
        }
    }

    /// Build from fixes ordered newest first. May be shorter than two.
    pub fn from_samples<I: IntoIterator<Item = Coordinate>>(coords: I) -> Self {
        CoordinateHistory {
            coords: BoundedHistory::from_newest_first(coords, COORDINATE_RETAIN),
        }
    }

    pub fn append(&mut self, coord: Coordinate) {
        self.coords.push(coord);
    }

    pub fn latest(&self) -> Result<Coordinate, NavError> {
        self.coords.latest()
    }

    /// Bearing of travel between the two most recent fixes, degrees East of
    /// North in [0, 360).
    ///
    /// Degree differences are used directly as planar x/y offsets, with no
    /// meters-per-degree scaling. This is only accurate for small
    /// displacements, and longitude offsets are overweighted away from the
    /// equator.
    ///
    /// Fails with [`NavError::UnchangedPoint`] when the fixes share a
    /// latitude or a longitude, including pure north-south or east-west moves.
    pub fn current_bearing(&self) -> Result<f64, NavError> {
        let (current, previous) = self.coords.pair()?;

        if current.lon == previous.lon || current.lat == previous.lat {
            return Err(NavError::UnchangedPoint);
        }

        let offset = Vector2::new(current.lon - previous.lon, current.lat - previous.lat);
        let bearing = 90.0 - offset.y.atan2(offset.x).to_degrees();

        Ok(normalize_degrees(bearing))
    }

    /// Distance between the two most recent fixes, in `distance`'s unit.
    pub fn distance_travelled<D: GeodesicDistance + ?Sized>(&self, distance: &D) -> Result<f64, NavError> {
        let (current, previous) = self.coords.pair()?;
        Ok(distance.distance(previous, current))
    }

    /// Repeat the latest fix when no new one arrived this tick.
    pub fn lock(&mut self) -> Result<(), NavError> {
        self.coords.repeat_latest()
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Fixes newest first
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.coords.iter().copied()
    }

    /// Latitudes newest first
    pub fn latitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|c| c.lat)
    }

    /// Longitudes newest first
    pub fn longitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|c| c.lon)
    }

    pub fn snapshot(&self) -> CoordinateSnapshot {
        CoordinateSnapshot {
            lats: self.latitudes().collect(),
            lons: self.longitudes().collect(),
        }
    }
}

/// Serializable copy of a coordinate history as parallel newest-first lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSnapshot {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

impl From<CoordinateSnapshot> for CoordinateHistory {
    /// Unpaired trailing entries are dropped.
    fn from(snapshot: CoordinateSnapshot) -> Self {
        CoordinateHistory::from_samples(
            snapshot
                .lats
                .into_iter()
                .zip(snapshot.lons)
                .map(|(lat, lon)| Coordinate::new(lat, lon)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::Haversine;

    const EPSILON: f64 = 1e-9;

    fn history(prev: (f64, f64), current: (f64, f64)) -> CoordinateHistory {
        let mut h = CoordinateHistory::new(Coordinate::new(prev.0, prev.1));
        h.append(Coordinate::new(current.0, current.1));
        h
    }

    #[test]
    fn test_new_duplicates_seed() {
        let h = CoordinateHistory::new(Coordinate::new(10.0, 20.0));
        assert_eq!(h.len(), 2);
        assert_eq!(h.latitudes().collect::<Vec<_>>(), vec![10.0, 10.0]);
        assert_eq!(h.longitudes().collect::<Vec<_>>(), vec![20.0, 20.0]);
    }

    #[test]
    fn test_length_clamps_below_capacity() {
        for appends in 0..15 {
            let mut h = CoordinateHistory::new(Coordinate::new(0.0, 0.0));
            for i in 0..appends {
                h.append(Coordinate::new(i as f64, i as f64));
            }
            assert_eq!(h.len(), (HISTORY_CAPACITY - 1).min(2 + appends));
            assert_eq!(h.latitudes().count(), h.longitudes().count());
        }
    }

    #[test]
    fn test_bearing_north_east() {
        let h = history((0.0, 0.0), (1.0, 1.0));
        assert!((h.current_bearing().unwrap() - 45.0).abs() < EPSILON);
    }

    #[test]
    fn test_bearing_quadrants() {
        // south-east
        let h = history((0.0, 0.0), (-1.0, 1.0));
        assert!((h.current_bearing().unwrap() - 135.0).abs() < EPSILON);
        // south-west
        let h = history((0.0, 0.0), (-1.0, -1.0));
        assert!((h.current_bearing().unwrap() - 225.0).abs() < EPSILON);
        // north-west
        let h = history((0.0, 0.0), (1.0, -1.0));
        assert!((h.current_bearing().unwrap() - 315.0).abs() < EPSILON);
    }

    #[test]
    fn test_bearing_uses_raw_degrees() {
        // Two degrees of longitude east, one of latitude north
        let h = history((50.0, 0.0), (51.0, 2.0));
        let expected = 90.0 - (1.0f64).atan2(2.0).to_degrees();
        assert!((h.current_bearing().unwrap() - expected).abs() < EPSILON);
    }

    #[test]
    fn test_bearing_scale_invariant() {
        let base = history((10.0, 10.0), (10.3, 10.4)).current_bearing().unwrap();
        for scale in [0.001, 0.5, 2.0, 7.0] {
            let h = history((10.0, 10.0), (10.0 + 0.3 * scale, 10.0 + 0.4 * scale));
            assert!((h.current_bearing().unwrap() - base).abs() < 1e-6);
        }
    }

    #[test]
    fn test_unchanged_latitude() {
        let h = history((10.0, 20.0), (10.0, 30.0));
        assert_eq!(h.current_bearing(), Err(NavError::UnchangedPoint));
    }

    #[test]
    fn test_unchanged_longitude() {
        let h = history((10.0, 20.0), (11.0, 20.0));
        assert_eq!(h.current_bearing(), Err(NavError::UnchangedPoint));
    }

    #[test]
    fn test_seeded_history_is_unchanged() {
        let h = CoordinateHistory::new(Coordinate::new(1.0, 2.0));
        assert_eq!(h.current_bearing(), Err(NavError::UnchangedPoint));
    }

    #[test]
    fn test_lock_keeps_query_stable() {
        let mut h = history((0.0, 0.0), (1.0, 1.0));
        h.lock().unwrap();
        // a locked fix repeats, so the bearing between the last two is undefined
        assert_eq!(h.current_bearing(), Err(NavError::UnchangedPoint));
        for _ in 0..4 {
            h.lock().unwrap();
            assert_eq!(h.current_bearing(), Err(NavError::UnchangedPoint));
            assert_eq!(h.distance_travelled(&Haversine::default()).unwrap(), 0.0);
        }
        assert_eq!(h.latest().unwrap(), Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn test_distance_travelled_order() {
        let h = history((1.0, 2.0), (3.0, 4.0));
        let seen = |lat1: f64, lon1: f64, lat2: f64, lon2: f64| lat1 * 1000.0 + lon1 * 100.0 + lat2 * 10.0 + lon2;
        // previous fix first, then current
        assert_eq!(h.distance_travelled(&seen).unwrap(), 1234.0);
    }

    #[test]
    fn test_distance_travelled_haversine() {
        let h = history((0.0, 0.0), (0.0, 1.0));
        let d = h.distance_travelled(&Haversine::default()).unwrap();
        assert!((d - 111_194.93).abs() < 1.0);
    }

    #[test]
    fn test_short_history_errors() {
        let h = CoordinateHistory::from_samples([Coordinate::new(1.0, 1.0)]);
        assert_eq!(
            h.current_bearing(),
            Err(NavError::InsufficientHistory {
                needed: 2,
                available: 1
            })
        );
        assert!(h.distance_travelled(&Haversine::default()).is_err());
    }

    #[test]
    fn test_snapshot_parallel_lists() {
        let h = history((1.0, 2.0), (3.0, 4.0));
        let snapshot = h.snapshot();
        assert_eq!(snapshot.lats, vec![3.0, 1.0, 1.0]);
        assert_eq!(snapshot.lons, vec![4.0, 2.0, 2.0]);
        assert_eq!(CoordinateHistory::from(snapshot), h);
    }
}
