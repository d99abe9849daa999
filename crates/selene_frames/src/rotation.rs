//! 3×3 rotation matrices and the equator ↔ ecliptic rotation of date.
//!
//! Elementary rotations follow the IERS convention: `R_n(φ)` rotates the
//! coordinate axes (not the vector) by `φ` about axis `n`.

use std::f64::consts::PI;

const ARCSEC_TO_RAD: f64 = PI / (180.0 * 3600.0);

/// Row-major 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3(pub [[f64; 3]; 3]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);

    /// Rotation of the axes about x.
    pub fn rot_x(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Mat3([[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]])
    }

    /// Rotation of the axes about y.
    pub fn rot_y(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Mat3([[c, 0.0, -s], [0.0, 1.0, 0.0], [s, 0.0, c]])
    }

    /// Rotation of the axes about z.
    pub fn rot_z(phi: f64) -> Self {
        let (s, c) = phi.sin_cos();
        Mat3([[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Matrix product `self · rhs`.
    pub fn mul(&self, rhs: &Mat3) -> Mat3 {
        let a = &self.0;
        let b = &rhs.0;
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
            }
        }
        Mat3(out)
    }

    /// Apply to a column vector.
    pub fn apply(&self, v: &[f64; 3]) -> [f64; 3] {
        let m = &self.0;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.0;
        Mat3([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }
}

/// IAU 2006 mean obliquity of the ecliptic, radians.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn mean_obliquity_rad(t: f64) -> f64 {
    let arcsec = 84381.406
        + t * (-46.836769
            + t * (-0.0001831 + t * (0.00200340 + t * (-0.000000576 + t * -0.0000000434))));
    arcsec * ARCSEC_TO_RAD
}

/// Equatorial → ecliptic, both of date, for obliquity `eps_rad`.
pub fn equatorial_to_ecliptic_of_date(v: &[f64; 3], eps_rad: f64) -> [f64; 3] {
    Mat3::rot_x(eps_rad).apply(v)
}

/// Ecliptic → equatorial, both of date, for obliquity `eps_rad`.
pub fn ecliptic_of_date_to_equatorial(v: &[f64; 3], eps_rad: f64) -> [f64; 3] {
    Mat3::rot_x(-eps_rad).apply(v)
}
