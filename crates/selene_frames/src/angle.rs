//! Angle normalisation.

/// Wrap degrees into [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Wrap degrees into [-180, 180).
pub fn normalize_180(deg: f64) -> f64 {
    normalize_360(deg + 180.0) - 180.0
}
