//! Time scales for the selene workspace.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - a built-in leap-second table
//! - the UTC → TAI → TT → TDB chain and its inverse
//! - Earth rotation angle and sidereal time
//! - an [`Epoch`] type bridging TDB seconds and `chrono` UTC timestamps

pub mod error;
pub mod julian;
pub mod leap;
pub mod scales;
pub mod sidereal;

use std::ops::{Add, Sub};

use chrono::{DateTime, NaiveDate, Utc};

pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar, jd_to_tdb_seconds,
    julian_centuries, tdb_seconds_to_jd,
};
pub use sidereal::{earth_rotation_angle_rad, gast_rad, gmst_rad, local_sidereal_time_rad};

/// Unix time of 2000-Jan-01 12:00:00 UTC.
const UNIX_AT_J2000: i64 = 946_728_000;

/// A TDB epoch represented as seconds past J2000.0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch {
    tdb_seconds: f64,
}

impl Epoch {
    /// Create an epoch from TDB seconds past J2000.0.
    pub fn from_tdb_seconds(s: f64) -> Self {
        Self { tdb_seconds: s }
    }

    /// Create an epoch from a Julian Date in TDB.
    pub fn from_jd_tdb(jd: f64) -> Self {
        Self::from_tdb_seconds(jd_to_tdb_seconds(jd))
    }

    /// Create an epoch from UTC seconds past J2000.0.
    pub fn from_utc_seconds(utc_s: f64) -> Self {
        Self::from_tdb_seconds(scales::utc_to_tdb(utc_s))
    }

    /// Create an epoch from a validated UTC calendar date and time.
    pub fn from_utc_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, TimeError> {
        let invalid = || TimeError::InvalidCalendar {
            year,
            month,
            day,
            hour,
            minute,
        };
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or_else(invalid)?;
        if !(0.0..61.0).contains(&second) {
            return Err(invalid());
        }
        let day_frac = day as f64
            + hour as f64 / 24.0
            + minute as f64 / 1440.0
            + second / SECONDS_PER_DAY;
        let jd_utc = calendar_to_jd(year, month, day_frac);
        Ok(Self::from_utc_seconds(jd_to_tdb_seconds(jd_utc)))
    }

    /// Create an epoch from a `chrono` UTC timestamp.
    pub fn from_datetime(t: &DateTime<Utc>) -> Self {
        let whole = (t.timestamp() - UNIX_AT_J2000) as f64;
        let frac = f64::from(t.timestamp_subsec_nanos()) * 1e-9;
        Self::from_utc_seconds(whole + frac)
    }

    /// TDB seconds past J2000.0.
    pub fn as_tdb_seconds(self) -> f64 {
        self.tdb_seconds
    }

    /// Julian Date in TDB.
    pub fn as_jd_tdb(self) -> f64 {
        tdb_seconds_to_jd(self.tdb_seconds)
    }

    /// Julian Date in TT.
    pub fn as_jd_tt(self) -> f64 {
        let tt = self.tdb_seconds - scales::tdb_minus_tt(self.tdb_seconds);
        tdb_seconds_to_jd(tt)
    }

    /// UTC seconds past J2000.0.
    pub fn as_utc_seconds(self) -> f64 {
        scales::tdb_to_utc(self.tdb_seconds)
    }

    /// Julian Date in UT1, approximated by UTC.
    pub fn as_jd_ut1(self) -> f64 {
        tdb_seconds_to_jd(self.as_utc_seconds())
    }

    /// Convert to a `chrono` UTC timestamp, rounded to the millisecond.
    pub fn to_datetime(self) -> Result<DateTime<Utc>, TimeError> {
        let utc_s = self.as_utc_seconds();
        let millis = (utc_s * 1000.0).round();
        if !millis.is_finite() || millis.abs() > 8.0e15 {
            return Err(TimeError::OutOfRange { utc_seconds: utc_s });
        }
        let unix_ms = millis as i64 + UNIX_AT_J2000 * 1000;
        DateTime::from_timestamp_millis(unix_ms).ok_or(TimeError::OutOfRange { utc_seconds: utc_s })
    }
}

impl Add<f64> for Epoch {
    type Output = Epoch;

    /// Shift by a number of seconds.
    fn add(self, seconds: f64) -> Epoch {
        Epoch::from_tdb_seconds(self.tdb_seconds + seconds)
    }
}

impl Sub<f64> for Epoch {
    type Output = Epoch;

    fn sub(self, seconds: f64) -> Epoch {
        Epoch::from_tdb_seconds(self.tdb_seconds - seconds)
    }
}

impl Sub for Epoch {
    type Output = f64;

    /// Elapsed TDB seconds.
    fn sub(self, other: Epoch) -> f64 {
        self.tdb_seconds - other.tdb_seconds
    }
}
