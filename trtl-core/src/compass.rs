//! Compass input
//!
//! The magnetic compass reports heading relative to magnetic north. The
//! bearing history works in true bearings, so the local magnetic variation
//! is added before a reading is pushed.

use serde::{Deserialize, Serialize};

use crate::angle::normalize_degrees;

/// One compass sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompassReading {
    /// Heading relative to magnetic north, degrees
    pub magnetic_heading: f64,
    /// Magnetic variation, degrees, East positive
    #[serde(default)]
    pub variation: f64,
}

impl CompassReading {
    pub fn new(magnetic_heading: f64, variation: f64) -> Self {
        CompassReading {
            magnetic_heading,
            variation,
        }
    }

    /// True heading in [0, 360)
    pub fn true_heading(&self) -> f64 {
        normalize_degrees(self.magnetic_heading + self.variation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_heading_east_variation() {
        assert!((CompassReading::new(350.0, 11.3).true_heading() - 1.3).abs() < 1e-9);
        assert_eq!(CompassReading::new(100.0, 11.0).true_heading(), 111.0);
    }

    #[test]
    fn test_true_heading_west_variation() {
        assert_eq!(CompassReading::new(5.0, -10.0).true_heading(), 355.0);
    }

    #[test]
    fn test_deserialize_without_variation() {
        let r: CompassReading = serde_json::from_str(r#"{"magneticHeading": 42.5}"#).unwrap();
        assert_eq!(r.variation, 0.0);
        assert_eq!(r.true_heading(), 42.5);
    }
}
