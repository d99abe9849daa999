//! Julian Date ↔ Gregorian calendar conversions.
//!
//! Algorithms from Meeus, *Astronomical Algorithms*, ch. 7. Valid for
//! Gregorian dates (after 1582-Oct-15).

/// Julian Date of J2000.0 (2000-Jan-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Days per Julian century.
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Calendar date to Julian Date. `day` may carry a fractional part.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day
        + b as f64
        - 1524.5
}

/// Julian Date to `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let jd = jd + 0.5;
    let z = jd.floor();
    let f = jd - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Julian Date to seconds past J2000.0 in the same time scale.
pub fn jd_to_tdb_seconds(jd: f64) -> f64 {
    (jd - J2000_JD) * SECONDS_PER_DAY
}

/// Seconds past J2000.0 to Julian Date in the same time scale.
pub fn tdb_seconds_to_jd(s: f64) -> f64 {
    J2000_JD + s / SECONDS_PER_DAY
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}
