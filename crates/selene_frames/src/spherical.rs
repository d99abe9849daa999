//! Cartesian ↔ spherical coordinate conversion.

use crate::angle::normalize_360;

/// Spherical coordinates: longitude, latitude, distance.
///
/// Longitude is measured in the x-y plane from +x toward +y; latitude is
/// elevation above that plane. Used for RA/Dec and ecliptic lon/lat alike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalCoords {
    /// Degrees, [0, 360).
    pub lon_deg: f64,
    /// Degrees, [-90, 90].
    pub lat_deg: f64,
    /// Same unit as the Cartesian input (km throughout this workspace).
    pub distance_km: f64,
}

/// Convert Cartesian `[x, y, z]` to spherical coordinates.
pub fn cartesian_to_spherical(xyz: &[f64; 3]) -> SphericalCoords {
    let [x, y, z] = *xyz;
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return SphericalCoords {
            lon_deg: 0.0,
            lat_deg: 0.0,
            distance_km: 0.0,
        };
    }
    SphericalCoords {
        lon_deg: normalize_360(y.atan2(x).to_degrees()),
        lat_deg: (z / r).clamp(-1.0, 1.0).asin().to_degrees(),
        distance_km: r,
    }
}

/// Convert spherical coordinates back to Cartesian `[x, y, z]`.
pub fn spherical_to_cartesian(s: &SphericalCoords) -> [f64; 3] {
    let (sin_lon, cos_lon) = s.lon_deg.to_radians().sin_cos();
    let (sin_lat, cos_lat) = s.lat_deg.to_radians().sin_cos();
    [
        s.distance_km * cos_lat * cos_lon,
        s.distance_km * cos_lat * sin_lon,
        s.distance_km * sin_lat,
    ]
}
