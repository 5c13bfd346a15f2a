//! Degree helpers shared by the bearing computations.

/// Full circle in degrees
pub const FULL_CIRCLE: f64 = 360.0;

/// Normalize an angle in degrees into [0, 360).
///
/// Uses the Euclidean remainder, so negative inputs wrap upwards
/// (`-10` becomes `350`). A tiny negative input whose remainder rounds to
/// exactly 360.0 is folded back to 0.0 to keep the half-open range.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_CIRCLE);
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}
