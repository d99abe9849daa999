//! Lunar phase angle and illuminated fraction (Meeus ch. 48).

use crate::ApparentPlace;

/// Phase angle `i` of the Moon, degrees in [0, 180].
///
/// `cos ψ` is the geocentric Sun-Moon elongation and
/// `tan i = R sin ψ / (Δ − R cos ψ)`.
pub fn phase_angle_deg(moon: &ApparentPlace, sun: &ApparentPlace) -> f64 {
    let (a0, d0) = (sun.ra_deg.to_radians(), sun.dec_deg.to_radians());
    let (a, d) = (moon.ra_deg.to_radians(), moon.dec_deg.to_radians());
    let cos_psi = (d0.sin() * d.sin() + d0.cos() * d.cos() * (a0 - a).cos()).clamp(-1.0, 1.0);
    let psi = cos_psi.acos();

    let r = sun.distance_km;
    let delta = moon.distance_km;
    (r * psi.sin()).atan2(delta - r * cos_psi).to_degrees()
}

/// Illuminated fraction `k = (1 + cos i) / 2`, in [0, 1].
pub fn illuminated_fraction(moon: &ApparentPlace, sun: &ApparentPlace) -> f64 {
    (1.0 + phase_angle_deg(moon, sun).to_radians().cos()) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(ra_deg: f64, dec_deg: f64, distance_km: f64) -> ApparentPlace {
        ApparentPlace {
            ra_deg,
            dec_deg,
            ecl_lon_deg: 0.0,
            ecl_lat_deg: 0.0,
            distance_km,
        }
    }

    #[test]
    fn meeus_example_48a() {
        // 1992 Apr 12 0h TD: k = 0.6786
        let moon = place(134.688470, 13.768368, 368_410.0);
        let sun = place(20.6579, 8.6964, 149_971_520.0);
        let k = illuminated_fraction(&moon, &sun);
        assert!((k - 0.6786).abs() < 1e-3, "k = {k}");
        let i = phase_angle_deg(&moon, &sun);
        assert!((i - 69.0756).abs() < 0.05, "i = {i}");
    }

    #[test]
    fn conjunction_is_dark_and_opposition_full() {
        let sun = place(10.0, 5.0, 1.5e8);
        assert!(illuminated_fraction(&place(10.0, 5.0, 384_000.0), &sun) < 1e-9);
        let full = illuminated_fraction(&place(190.0, -5.0, 384_000.0), &sun);
        assert!(full > 1.0 - 1e-9, "k = {full}");
    }
}
