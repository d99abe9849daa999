//! IAU 2006 equatorial precession.
//!
//! Source: Capitaine, Wallace & Chapront 2003, A&A 412, 567-586; IERS
//! Conventions 2010, Eq. 5.40. The 23 mas frame bias between ICRS and the
//! J2000 mean equator is ignored.

use std::f64::consts::PI;

use crate::rotation::Mat3;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Precession angles `(ζ_A, z_A, θ_A)` in radians.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let zeta = 2.650545
        + t * (2306.083227
            + t * (0.2988499 + t * (0.01801828 + t * (-0.000005971 + t * -0.0000003173))));
    let z = -2.650545
        + t * (2306.077181
            + t * (1.0927348 + t * (0.01826837 + t * (-0.000028596 + t * -0.0000002904))));
    let theta = t
        * (2004.191903
            + t * (-0.4294934 + t * (-0.04182264 + t * (-0.000007089 + t * -0.0000001274))));
    (zeta * ARCSEC_TO_RAD, z * ARCSEC_TO_RAD, theta * ARCSEC_TO_RAD)
}

/// Matrix taking J2000 mean equatorial vectors to the mean equator and
/// equinox of date: `P = R3(−z_A) · R2(θ_A) · R3(−ζ_A)`.
pub fn precession_matrix(t: f64) -> Mat3 {
    let (zeta, z, theta) = precession_angles(t);
    Mat3::rot_z(-z)
        .mul(&Mat3::rot_y(theta))
        .mul(&Mat3::rot_z(-zeta))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_identity_at_j2000() {
        let p = precession_matrix(0.0);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((p.0[i][j] - expected).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn pole_moves_by_theta() {
        // After one century the mean pole has moved about 2004″ from J2000.
        let p = precession_matrix(1.0);
        let pole_of_date_in_j2000 = p.transpose().apply(&[0.0, 0.0, 1.0]);
        let sep_arcsec = pole_of_date_in_j2000[2].acos() / ARCSEC_TO_RAD;
        assert!((sep_arcsec - 2004.19).abs() < 1.0, "{sep_arcsec}″");
    }

    #[test]
    fn theta_persei_to_2028() {
        // J2000 RA 2h44m11.986s, Dec +49°13′42.48″ precessed to JD 2462088.69
        // gives RA 41.5472°, Dec 49.3492° (no proper motion).
        let (ra, dec) = (41.054108_f64.to_radians(), 49.228467_f64.to_radians());
        let v = [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()];
        let t = (2_462_088.69 - 2_451_545.0) / 36_525.0;
        let w = precession_matrix(t).apply(&v);
        let ra2 = w[1].atan2(w[0]).to_degrees();
        let dec2 = w[2].asin().to_degrees();
        assert!((ra2 - 41.5472).abs() < 2e-4, "RA {ra2}");
        assert!((dec2 - 49.3492).abs() < 2e-4, "Dec {dec2}");
    }
}
