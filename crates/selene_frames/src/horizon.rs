//! Horizon system: altitude/azimuth, atmospheric refraction and angular
//! separation.
//!
//! Azimuth is measured from north through east (north = 0°, east = 90°).

/// Altitude and azimuth, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Horizontal {
    /// [-90, 90].
    pub altitude_deg: f64,
    /// [0, 360).
    pub azimuth_deg: f64,
}

/// Surface conditions for the refraction model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atmosphere {
    pub pressure_mbar: f64,
    pub temperature_c: f64,
}

impl Default for Atmosphere {
    /// 1010 mbar and 15 °C.
    fn default() -> Self {
        Self {
            pressure_mbar: 1010.0,
            temperature_c: 15.0,
        }
    }
}

/// Hour angle and declination to the horizon system at latitude `lat_rad`.
pub fn equatorial_to_horizontal(hour_angle_rad: f64, dec_rad: f64, lat_rad: f64) -> Horizontal {
    let (sin_h, cos_h) = hour_angle_rad.sin_cos();
    let (sin_d, cos_d) = dec_rad.sin_cos();
    let (sin_p, cos_p) = lat_rad.sin_cos();

    let sin_alt = (sin_p * sin_d + cos_p * cos_d * cos_h).clamp(-1.0, 1.0);
    let az = (-cos_d * sin_h).atan2(sin_d * cos_p - cos_d * sin_p * cos_h);
    Horizontal {
        altitude_deg: sin_alt.asin().to_degrees(),
        azimuth_deg: crate::angle::normalize_360(az.to_degrees()),
    }
}

/// Refraction (degrees) to add to a geometric altitude.
///
/// Saemundsson's formula, `R = 1.02′ / tan(h + 10.3 / (h + 5.11))`, scaled
/// for pressure and temperature. Zero below −2°, where the formula diverges
/// and the body is under the horizon anyway.
pub fn refraction_deg(true_altitude_deg: f64, atmosphere: &Atmosphere) -> f64 {
    let h = true_altitude_deg;
    if h < -2.0 {
        return 0.0;
    }
    let arg = (h + 10.3 / (h + 5.11)).to_radians();
    let r_arcmin = 1.02 / arg.tan();
    let scale = (atmosphere.pressure_mbar / 1010.0) * (283.0 / (273.0 + atmosphere.temperature_c));
    (r_arcmin * scale / 60.0).max(0.0)
}

/// Great-circle distance (degrees) between two altitude/azimuth directions.
///
/// Vincenty's form, stable at both small and near-antipodal separations.
pub fn angular_separation_deg(a: &Horizontal, b: &Horizontal) -> f64 {
    let (sin1, cos1) = a.altitude_deg.to_radians().sin_cos();
    let (sin2, cos2) = b.altitude_deg.to_radians().sin_cos();
    let (sin_d, cos_d) = (b.azimuth_deg - a.azimuth_deg).to_radians().sin_cos();

    let x = cos2 * sin_d;
    let y = cos1 * sin2 - sin1 * cos2 * cos_d;
    let num = (x * x + y * y).sqrt();
    let den = sin1 * sin2 + cos1 * cos2 * cos_d;
    num.atan2(den).to_degrees()
}
