//! Built-in TAI − UTC leap-second table.
//!
//! Values from IERS Bulletin C. The table ends with the 2017-Jan-01 leap
//! second; IERS has announced none since.

use crate::julian::{calendar_to_jd, jd_to_tdb_seconds};

/// `(year, month, TAI − UTC)` effective from day 1 of that month, 0h UTC.
const LEAP_SECONDS: [(i32, u32, f64); 28] = [
    (1972, 1, 10.0),
    (1972, 7, 11.0),
    (1973, 1, 12.0),
    (1974, 1, 13.0),
    (1975, 1, 14.0),
    (1976, 1, 15.0),
    (1977, 1, 16.0),
    (1978, 1, 17.0),
    (1979, 1, 18.0),
    (1980, 1, 19.0),
    (1981, 7, 20.0),
    (1982, 7, 21.0),
    (1983, 7, 22.0),
    (1985, 7, 23.0),
    (1988, 1, 24.0),
    (1990, 1, 25.0),
    (1991, 1, 26.0),
    (1992, 7, 27.0),
    (1993, 7, 28.0),
    (1994, 7, 29.0),
    (1996, 1, 30.0),
    (1997, 7, 31.0),
    (1999, 1, 32.0),
    (2006, 1, 33.0),
    (2009, 1, 34.0),
    (2012, 7, 35.0),
    (2015, 7, 36.0),
    (2017, 1, 37.0),
];

/// TAI − UTC in seconds at `utc_s` (UTC seconds past J2000.0).
///
/// Before 1972 the first tabulated value is returned; the pre-1972 rubber
/// second is not modelled.
pub fn tai_minus_utc(utc_s: f64) -> f64 {
    LEAP_SECONDS
        .iter()
        .rev()
        .find(|&&(y, m, _)| utc_s >= jd_to_tdb_seconds(calendar_to_jd(y, m, 1.0)))
        .map_or(LEAP_SECONDS[0].2, |&(_, _, dat)| dat)
}
