//! Earth Rotation Angle and Greenwich sidereal time.
//!
//! Inputs are UT1 Julian Dates. UT1 is approximated by UTC in this
//! workspace (|UT1 − UTC| < 0.9 s, about 0.004° of rotation).
//!
//! Sources:
//! - ERA: IERS Conventions 2010, Eq. 5.15.
//! - GMST polynomial: Capitaine et al. 2003, Table 2.

use std::f64::consts::{PI, TAU};

use crate::julian::{J2000_JD, julian_centuries};

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Earth Rotation Angle, radians in [0, 2π).
///
/// θ = 2π (0.7790572732640 + 1.00273781191135448 Du), Du = JD_UT1 − 2451545.0
pub fn earth_rotation_angle_rad(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    // Split the day count so the large integer part does not swamp the
    // fraction.
    let frac = du.rem_euclid(1.0);
    let theta = TAU * (frac + 0.779_057_273_264_0 + 0.002_737_811_911_354_48 * du);
    theta.rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time, radians in [0, 2π).
///
/// GMST = ERA + (0.014506 + 4612.156534 T + 1.3915817 T² − 0.00000044 T³
/// − 0.000029956 T⁴ − 0.0000000368 T⁵)″
pub fn gmst_rad(jd_ut1: f64) -> f64 {
    let t = julian_centuries(jd_ut1);
    let poly_arcsec = 0.014506
        + t * (4612.156534
            + t * (1.3915817 + t * (-0.00000044 + t * (-0.000029956 + t * -0.0000000368))));
    (earth_rotation_angle_rad(jd_ut1) + poly_arcsec * ARCSEC_TO_RAD).rem_euclid(TAU)
}

/// Greenwich Apparent Sidereal Time from GMST plus the equation of the
/// equinoxes `Δψ cos ε`. Radians in [0, 2π).
pub fn gast_rad(jd_ut1: f64, dpsi_rad: f64, true_obliquity_rad: f64) -> f64 {
    (gmst_rad(jd_ut1) + dpsi_rad * true_obliquity_rad.cos()).rem_euclid(TAU)
}

/// Local sidereal time for an east-positive longitude. Radians in [0, 2π).
pub fn local_sidereal_time_rad(greenwich_rad: f64, longitude_east_rad: f64) -> f64 {
    (greenwich_rad + longitude_east_rad).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn era_at_j2000() {
        let deg = earth_rotation_angle_rad(J2000_JD).to_degrees();
        assert!((deg - 280.46).abs() < 0.01, "ERA = {deg}");
    }

    #[test]
    fn gmst_j2000_midnight() {
        // 2000-Jan-01 0h UT1: GMST = 6h 39m 52.27s = 99.9678°
        let deg = gmst_rad(2_451_544.5).to_degrees();
        assert!((deg - 99.9678).abs() < 0.001, "GMST = {deg}");
    }

    #[test]
    fn gmst_meeus_example_12a() {
        // 1987 Apr 10, 0h UT: 13h 10m 46.3668s = 197.693195°
        let deg = gmst_rad(2_446_895.5).to_degrees();
        assert!((deg - 197.693195).abs() < 1e-4, "GMST = {deg}");
    }

    #[test]
    fn gast_adds_equation_of_equinoxes() {
        let jd = 2_446_895.5;
        // Meeus 12.a: Δψ = −3.788″, ε = 23°26′36.85″ gives −0.2317 s of time
        let dpsi = -3.788 * ARCSEC_TO_RAD;
        let eps = (23.0 + 26.0 / 60.0 + 36.85 / 3600.0_f64).to_radians();
        let diff_s = (gast_rad(jd, dpsi, eps) - gmst_rad(jd)).to_degrees() * 240.0;
        assert!((diff_s + 0.2317).abs() < 1e-3, "EqEq = {diff_s} s");
    }

    #[test]
    fn sidereal_day_is_shorter() {
        // One solar day advances GMST by about 0.9856°.
        let adv = (gmst_rad(2_451_546.0) - gmst_rad(2_451_545.0)).rem_euclid(TAU);
        assert!((adv.to_degrees() - 0.9856).abs() < 1e-3);
    }

    #[test]
    fn lst_east_offset() {
        let lst = local_sidereal_time_rad(6.0, PI / 2.0);
        assert!((lst - (6.0 + PI / 2.0).rem_euclid(TAU)).abs() < 1e-15);
    }

    #[test]
    fn ranges() {
        for &jd in &[2_451_545.0, 2_451_544.5, 2_460_000.5, 2_440_000.5] {
            assert!((0.0..TAU).contains(&earth_rotation_angle_rad(jd)));
            assert!((0.0..TAU).contains(&gmst_rad(jd)));
        }
    }
}
