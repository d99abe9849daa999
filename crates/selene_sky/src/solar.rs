//! Low-precision solar coordinates (Meeus, *Astronomical Algorithms*,
//! ch. 25). About 0.01° in longitude.

use selene_frames::normalize_360;

use crate::AU_KM;

/// Geometric ecliptic longitude (degrees, mean equinox of date) and
/// distance (km) of the Sun.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn sun_geometric(t: f64) -> (f64, f64) {
    let l0 = 280.46646 + t * (36000.76983 + t * 0.0003032);
    let m = (357.52911 + t * (35999.05029 - t * 0.0001537)).to_radians();
    let e = 0.016708634 - t * (0.000042037 + t * 0.0000001267);

    let c = (1.914602 - t * (0.004817 + t * 0.000014)) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let true_lon = normalize_360(l0 + c);
    let nu = m + c.to_radians();
    let r_au = 1.000001018 * (1.0 - e * e) / (1.0 + e * nu.cos());
    (true_lon, r_au * AU_KM)
}

/// Annual aberration in longitude, degrees: −20.4898″ / R.
pub fn aberration_deg(distance_km: f64) -> f64 {
    -20.4898 / 3600.0 / (distance_km / AU_KM)
}
