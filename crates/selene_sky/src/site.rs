//! Observer site on the WGS84 ellipsoid.

/// WGS84 equatorial radius, km.
const WGS84_A_KM: f64 = 6378.137;
/// WGS84 flattening.
const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// Geodetic position of an observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Site {
    /// Geodetic latitude, degrees north.
    pub latitude_deg: f64,
    /// Longitude, degrees east.
    pub longitude_deg: f64,
    /// Height above the ellipsoid, metres.
    pub elevation_m: f64,
}

impl Site {
    pub fn new(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            elevation_m,
        }
    }

    /// A sea-level site.
    pub fn sea_level(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self::new(latitude_deg, longitude_deg, 0.0)
    }

    /// Geocentric position on the equator of date for local sidereal time
    /// `lst_rad`, km.
    pub fn geocentric_vector(&self, lst_rad: f64) -> [f64; 3] {
        let (sin_phi, cos_phi) = self.latitude_deg.to_radians().sin_cos();
        let e2 = WGS84_F * (2.0 - WGS84_F);
        let n = WGS84_A_KM / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let h = self.elevation_m / 1000.0;

        let rho_xy = (n + h) * cos_phi;
        let z = (n * (1.0 - e2) + h) * sin_phi;
        let (sin_t, cos_t) = lst_rad.sin_cos();
        [rho_xy * cos_t, rho_xy * sin_t, z]
    }
}
