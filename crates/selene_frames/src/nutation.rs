//! Truncated IAU 2000B nutation.
//!
//! Keeps the 13 largest lunisolar terms of IERS Conventions 2010 Table 5.3b.
//! Every dropped term is below 0.007″.
//!
//! Fundamental arguments: IERS Conventions 2010, Table 5.2e.

use std::f64::consts::TAU;

use crate::rotation::{Mat3, mean_obliquity_rad};

const AS2RAD: f64 = TAU / 1_296_000.0;

/// Nutation in longitude and obliquity, with the obliquities it applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    /// Δψ, radians.
    pub dpsi: f64,
    /// Δε, radians.
    pub deps: f64,
    /// Mean obliquity of date, radians.
    pub mean_obliquity: f64,
}

impl Nutation {
    /// Nutation at `t` Julian centuries of TT since J2000.0.
    pub fn at(t: f64) -> Self {
        let (dpsi, deps) = nutation_iau2000b(t);
        Self {
            dpsi: dpsi * AS2RAD,
            deps: deps * AS2RAD,
            mean_obliquity: mean_obliquity_rad(t),
        }
    }

    /// True obliquity `ε + Δε`.
    pub fn true_obliquity(&self) -> f64 {
        self.mean_obliquity + self.deps
    }

    /// Matrix from mean to true equator and equinox of date:
    /// `N = R1(−(ε + Δε)) · R3(−Δψ) · R1(ε)`.
    pub fn matrix(&self) -> Mat3 {
        Mat3::rot_x(-self.true_obliquity())
            .mul(&Mat3::rot_z(-self.dpsi))
            .mul(&Mat3::rot_x(self.mean_obliquity))
    }
}

/// The five Delaunay arguments `[l, l', F, D, Ω]` in radians.
///
/// `t` = Julian centuries of TDB since J2000.0.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let poly = |c: [f64; 5]| (c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])))) * AS2RAD;
    [
        poly([485868.249036, 1717915923.2178, 31.8792, 0.051635, -0.00024470]),
        poly([1287104.79305, 129596581.0481, -0.5532, 0.000136, -0.00001149]),
        poly([335779.526232, 1739527262.8478, -12.7512, -0.001037, 0.00000417]),
        poly([1072260.70369, 1602961601.2090, -6.3706, 0.006593, -0.00003169]),
        poly([450160.398036, -6962890.5431, 7.4722, 0.007702, -0.00005939]),
    ]
}

/// `[nl, nl', nF, nD, nΩ, S, S', C, C']`, amplitudes in 0.1 μas.
#[rustfmt::skip]
static TERMS: [[i64; 9]; 13] = [
    [ 0,  0,  0,  0,  1, -172064161, -174666, 92052331,  9086],
    [ 0,  0,  2, -2,  2,  -13170906,   -1675,  5730336, -3015],
    [ 0,  0,  2,  0,  2,   -2276413,    -234,   978459,  -485],
    [ 0,  0,  0,  0,  2,    2074554,     207,  -897492,   470],
    [ 0,  1,  0,  0,  0,    1475877,   -3633,    73871,  -184],
    [ 0,  1,  2, -2,  2,    -516821,    1226,   224386,  -677],
    [ 1,  0,  0,  0,  0,     711159,      73,    -6750,     0],
    [ 0,  0,  2,  0,  1,    -387298,    -367,   200728,    18],
    [ 1,  0,  2,  0,  2,    -301461,     -36,   129025,   -63],
    [ 0, -1,  2, -2,  2,     215829,    -494,   -95929,   299],
    [ 0,  0,  2, -2,  1,     128227,     137,   -68982,    -9],
    [-1,  0,  2,  0,  2,     123457,      11,   -53311,    32],
    [-1,  0,  0,  2,  0,     156994,      10,    -1235,     0],
];

/// `(Δψ, Δε)` in arcseconds at `t` Julian centuries since J2000.0.
pub fn nutation_iau2000b(t: f64) -> (f64, f64) {
    let args = fundamental_arguments(t);
    let (dpsi, deps) = TERMS.iter().fold((0.0, 0.0), |(dpsi, deps), row| {
        let arg: f64 = (0..5).map(|k| row[k] as f64 * args[k]).sum();
        let (s, c) = arg.sin_cos();
        (
            dpsi + (row[5] as f64 + row[6] as f64 * t) * s,
            deps + (row[7] as f64 + row[8] as f64 * t) * c,
        )
    });
    // 2000B planetary offsets.
    (dpsi * 1e-7 - 0.000_135, deps * 1e-7 - 0.000_388)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_22a() {
        // 1987 Apr 10 0h TD: Δψ = −3.788″, Δε = +9.443″
        let t = (2_446_895.5 - 2_451_545.0) / 36_525.0;
        let (dpsi, deps) = nutation_iau2000b(t);
        assert!((dpsi + 3.788).abs() < 0.1, "Δψ = {dpsi}");
        assert!((deps - 9.443).abs() < 0.1, "Δε = {deps}");
    }

    #[test]
    fn amplitude_bounds() {
        for i in 0..40 {
            let (dpsi, deps) = nutation_iau2000b(-0.5 + i as f64 * 0.025);
            assert!(dpsi.abs() < 20.0 && deps.abs() < 11.0);
        }
    }

    #[test]
    fn matrix_is_small_rotation() {
        let n = Nutation::at(0.2);
        let m = n.matrix();
        for i in 0..3 {
            assert!((m.0[i][i] - 1.0).abs() < 1e-8);
        }
        // x-axis shift in y is about Δψ cos ε.
        let v = m.apply(&[1.0, 0.0, 0.0]);
        assert!((v[1] - n.dpsi * n.mean_obliquity.cos()).abs() < 1e-9);
    }
}
