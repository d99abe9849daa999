//! UTC → TAI → TT → TDB conversion chain and its inverse.
//!
//! All quantities are seconds past J2000.0 in the named scale. TDB − TT uses
//! the single periodic term of the NAIF leapseconds kernel:
//! `K sin(E)`, `E = M + EB sin(M)`, `M = M0 + M1 t`.

use crate::leap::tai_minus_utc;

/// TT − TAI in seconds.
pub const TT_MINUS_TAI: f64 = 32.184;

/// Amplitude of the TDB − TT term, seconds.
const K: f64 = 1.657e-3;
/// Eccentricity of the Earth-Moon barycenter orbit.
const EB: f64 = 1.671e-2;
/// Mean anomaly at J2000.0, radians.
const M0: f64 = 6.239_996;
/// Mean anomaly rate, radians per second.
const M1: f64 = 1.990_968_71e-7;

/// TDB − TT at a TT (or TDB) epoch. Peaks at about 1.7 ms.
pub fn tdb_minus_tt(tt_s: f64) -> f64 {
    let m = M0 + M1 * tt_s;
    let e = m + EB * m.sin();
    K * e.sin()
}

/// UTC seconds to TT seconds past J2000.0.
pub fn utc_to_tt(utc_s: f64) -> f64 {
    utc_s + tai_minus_utc(utc_s) + TT_MINUS_TAI
}

/// TT seconds to UTC seconds past J2000.0.
///
/// Inside an inserted leap second the result lands on the following UTC
/// second.
pub fn tt_to_utc(tt_s: f64) -> f64 {
    let tai = tt_s - TT_MINUS_TAI;
    let guess = tai - tai_minus_utc(tai - 37.0);
    tai - tai_minus_utc(guess)
}

/// UTC seconds to TDB seconds past J2000.0.
pub fn utc_to_tdb(utc_s: f64) -> f64 {
    let tt = utc_to_tt(utc_s);
    tt + tdb_minus_tt(tt)
}

/// TDB seconds to UTC seconds past J2000.0.
pub fn tdb_to_utc(tdb_s: f64) -> f64 {
    // One fixed-point step suffices: d(TDB−TT)/dt is about 3e-10.
    let tt = tdb_s - tdb_minus_tt(tdb_s);
    let tt = tdb_s - tdb_minus_tt(tt);
    tt_to_utc(tt)
}
