//! Geographic positions and the distance collaborator.
//!
//! The navigation core does not own a geodesy implementation; it calls
//! whatever [`GeodesicDistance`] the host supplies. [`Haversine`] is the
//! default great-circle formula.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (IUGG)
pub const MEAN_EARTH_RADIUS: f64 = 6_371_000.0;

/// A GPS fix in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude, positive north
    pub lat: f64,
    /// Longitude, positive east
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coordinate { lat, lon }
    }
}

/// Distance between two positions, in the implementation's native unit.
///
/// Any closure `Fn(lat1, lon1, lat2, lon2) -> f64` qualifies.
pub trait GeodesicDistance {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64;
}

impl<F> GeodesicDistance for F
where
    F: Fn(f64, f64, f64, f64) -> f64,
{
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        self(from.lat, from.lon, to.lat, to.lon)
    }
}

/// Great-circle distance on a sphere, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Haversine {
    pub radius: f64,
}

impl Haversine {
    pub fn with_radius(radius: f64) -> Self {
        Haversine { radius }
    }
}

impl Default for Haversine {
    fn default() -> Self {
        Haversine {
            radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl GeodesicDistance for Haversine {
    fn distance(&self, from: Coordinate, to: Coordinate) -> f64 {
        let phi1 = from.lat.to_radians();
        let phi2 = to.lat.to_radians();
        let d_phi = (to.lat - from.lat).to_radians();
        let d_lambda = (to.lon - from.lon).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        self.radius * c
    }
}
