//! Lunar coordinates from Meeus, *Astronomical Algorithms*, ch. 47.
//!
//! Keeps the 20 leading terms of Tables 47.A and 47.B plus the additive
//! corrections: about 0.01° in longitude and 0.005° in latitude.

use selene_frames::normalize_360;

/// `(D, M, M′, F, Σl in 1e-6°, Σr in 1e-3 km)`
#[rustfmt::skip]
const TERMS_LR: [(f64, f64, f64, f64, f64, f64); 20] = [
    (0.0,  0.0,  1.0,  0.0, 6288774.0, -20905355.0),
    (2.0,  0.0, -1.0,  0.0, 1274027.0,  -3699111.0),
    (2.0,  0.0,  0.0,  0.0,  658314.0,  -2955968.0),
    (0.0,  0.0,  2.0,  0.0,  213618.0,   -569925.0),
    (0.0,  1.0,  0.0,  0.0, -185116.0,     48888.0),
    (0.0,  0.0,  0.0,  2.0, -114332.0,     -3149.0),
    (2.0,  0.0, -2.0,  0.0,   58793.0,    246158.0),
    (2.0, -1.0, -1.0,  0.0,   57066.0,   -152138.0),
    (2.0,  0.0,  1.0,  0.0,   53322.0,   -170733.0),
    (2.0, -1.0,  0.0,  0.0,   45758.0,   -204586.0),
    (0.0,  1.0, -1.0,  0.0,  -40923.0,   -129620.0),
    (1.0,  0.0,  0.0,  0.0,  -34720.0,    108743.0),
    (0.0,  1.0,  1.0,  0.0,  -30383.0,    104755.0),
    (2.0,  0.0,  0.0, -2.0,   15327.0,     10321.0),
    (0.0,  0.0,  1.0,  2.0,  -12528.0,         0.0),
    (0.0,  0.0,  1.0, -2.0,   10980.0,     79661.0),
    (4.0,  0.0, -1.0,  0.0,   10675.0,    -34782.0),
    (0.0,  0.0,  3.0,  0.0,   10034.0,    -23210.0),
    (4.0,  0.0, -2.0,  0.0,    8548.0,    -21636.0),
    (2.0,  1.0, -1.0,  0.0,   -7888.0,     24208.0),
];

/// `(D, M, M′, F, Σb in 1e-6°)`
#[rustfmt::skip]
const TERMS_B: [(f64, f64, f64, f64, f64); 20] = [
    (0.0,  0.0,  0.0,  1.0, 5128122.0),
    (0.0,  0.0,  1.0,  1.0,  280602.0),
    (0.0,  0.0,  1.0, -1.0,  277693.0),
    (2.0,  0.0,  0.0, -1.0,  173237.0),
    (2.0,  0.0, -1.0,  1.0,   55413.0),
    (2.0,  0.0, -1.0, -1.0,   46271.0),
    (2.0,  0.0,  0.0,  1.0,   32573.0),
    (0.0,  0.0,  2.0,  1.0,   17198.0),
    (2.0,  0.0,  1.0, -1.0,    9266.0),
    (0.0,  0.0,  2.0, -1.0,    8822.0),
    (2.0, -1.0,  0.0, -1.0,    8216.0),
    (2.0,  0.0, -2.0, -1.0,    4324.0),
    (2.0,  0.0,  1.0,  1.0,    4200.0),
    (2.0,  1.0,  0.0, -1.0,   -3359.0),
    (2.0, -1.0, -1.0,  1.0,    2463.0),
    (2.0, -1.0,  0.0,  1.0,    2211.0),
    (2.0, -1.0, -1.0, -1.0,    2065.0),
    (0.0,  1.0, -1.0, -1.0,   -1870.0),
    (4.0,  0.0, -1.0, -1.0,    1828.0),
    (0.0,  1.0,  0.0,  1.0,   -1794.0),
];

/// Mean lunar and solar arguments, degrees.
struct Arguments {
    /// L′, Moon mean longitude.
    lp: f64,
    /// D, mean elongation.
    d: f64,
    /// M, Sun mean anomaly.
    m: f64,
    /// M′, Moon mean anomaly.
    mp: f64,
    /// F, argument of latitude.
    f: f64,
}

impl Arguments {
    fn at(t: f64) -> Self {
        let poly = |c: [f64; 5]| normalize_360(c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4]))));
        Self {
            lp: poly([218.3164477, 481267.88123421, -0.0015786, 1.0 / 538841.0, -1.0 / 65194000.0]),
            d: poly([297.8501921, 445267.1114034, -0.0018819, 1.0 / 545868.0, -1.0 / 113065000.0]),
            m: poly([357.5291092, 35999.0502909, -0.0001536, 1.0 / 24490000.0, 0.0]),
            mp: poly([134.9633964, 477198.8675055, 0.0087414, 1.0 / 69699.0, -1.0 / 14712000.0]),
            f: poly([93.2720950, 483202.0175233, -0.0036539, -1.0 / 3526000.0, 1.0 / 863310000.0]),
        }
    }

    fn angle(&self, d: f64, m: f64, mp: f64, f: f64) -> f64 {
        (d * self.d + m * self.m + mp * self.mp + f * self.f).to_radians()
    }
}

/// Geometric ecliptic longitude and latitude (degrees, mean equinox of
/// date) and distance (km) of the Moon.
///
/// `t` = Julian centuries of TT since J2000.0.
pub fn moon_geometric(t: f64) -> (f64, f64, f64) {
    let a = Arguments::at(t);

    // Terms in M are scaled by the decreasing eccentricity of the Earth's orbit.
    let e = 1.0 - t * (0.002516 + t * 0.0000074);
    let e_factor = |m: f64| match m.abs() as i32 {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };

    let (mut sum_l, sum_r) = TERMS_LR.iter().fold((0.0, 0.0), |(l, r), &(d, m, mp, f, cl, cr)| {
        let arg = a.angle(d, m, mp, f);
        let k = e_factor(m);
        (l + cl * k * arg.sin(), r + cr * k * arg.cos())
    });
    let mut sum_b: f64 = TERMS_B
        .iter()
        .map(|&(d, m, mp, f, cb)| cb * e_factor(m) * a.angle(d, m, mp, f).sin())
        .sum();

    // Venus, Jupiter and flattening terms.
    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479264.290 * t).to_radians();
    let a3 = (313.45 + 481266.484 * t).to_radians();
    let lp = a.lp.to_radians();
    let f = a.f.to_radians();
    let mp = a.mp.to_radians();

    sum_l += 3958.0 * a1.sin() + 1962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    (
        normalize_360(a.lp + sum_l / 1e6),
        sum_b / 1e6,
        385_000.56 + sum_r / 1000.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_47a() {
        // 1992 Apr 12 0h TD: λ = 133.162655°, β = −3.229126°, Δ = 368409.7 km
        let t = (2_448_724.5 - 2_451_545.0) / 36_525.0;
        let (lon, lat, dist) = moon_geometric(t);
        assert!((lon - 133.162655).abs() < 0.01, "λ = {lon}");
        assert!((lat + 3.229126).abs() < 0.01, "β = {lat}");
        assert!((dist - 368_409.7).abs() < 50.0, "Δ = {dist}");
    }

    #[test]
    fn distance_stays_in_orbit_range() {
        for i in 0..400 {
            let t = 0.2 + i as f64 * 0.25 / 36_525.0;
            let (_, lat, dist) = moon_geometric(t);
            assert!((355_000.0..407_500.0).contains(&dist), "Δ = {dist}");
            assert!(lat.abs() < 5.4);
        }
    }
}
