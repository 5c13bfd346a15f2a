//! Tracker configuration
//!
//! Thresholds are in degrees. They are compared against raw (unwrapped)
//! bearing differences and the planar GPS bearing, so they should be tuned
//! against recorded data rather than derived from sensor specs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geodesy::MEAN_EARTH_RADIUS;

pub const DEFAULT_DRIFT_THRESHOLD: f64 = 10.0;
pub const DEFAULT_ROTATION_THRESHOLD: f64 = 5.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid tracker configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a finite, non-negative number of degrees, got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("earthRadius must be positive and finite, got {0}")]
    InvalidRadius(f64),
}

/// Configuration for [`Tracker`](crate::tracker::Tracker)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Max disagreement between GPS and compass heading change, degrees
    pub drift_threshold: f64,

    /// Max compass heading change per tick, degrees
    pub rotation_threshold: f64,

    /// Sphere radius for the haversine distance, meters
    pub earth_radius: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            rotation_threshold: DEFAULT_ROTATION_THRESHOLD,
            earth_radius: MEAN_EARTH_RADIUS,
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON configuration. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threshold("driftThreshold", self.drift_threshold)?;
        check_threshold("rotationThreshold", self.rotation_threshold)?;
        if !self.earth_radius.is_finite() || self.earth_radius <= 0.0 {
            return Err(ConfigError::InvalidRadius(self.earth_radius));
        }
        Ok(())
    }
}

fn check_threshold(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::from_json("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.drift_threshold, 10.0);
        assert_eq!(config.rotation_threshold, 5.0);
    }

    #[test]
    fn test_partial_override() {
        let config = TrackerConfig::from_json(r#"{"rotationThreshold": 2.5}"#).unwrap();
        assert_eq!(config.rotation_threshold, 2.5);
        assert_eq!(config.drift_threshold, DEFAULT_DRIFT_THRESHOLD);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let err = TrackerConfig::from_json(r#"{"driftThreshold": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold {
                field: "driftThreshold",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = TrackerConfig::from_json(r#"{"earthRadius": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRadius(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = TrackerConfig::from_json("{drift").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(TrackerConfig::default()).unwrap();
        assert_eq!(json["driftThreshold"], 10.0);
        assert_eq!(json["rotationThreshold"], 5.0);
        assert_eq!(json["earthRadius"], 6_371_000.0);
    }
}
