//! Error types for time-scale conversions.

use thiserror::Error;

/// Errors from calendar validation or conversion to civil time.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar fields do not form a valid date/time.
    #[error("invalid calendar date/time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}")]
    InvalidCalendar {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },
    /// Epoch cannot be represented as a civil timestamp.
    #[error("epoch {utc_seconds} s UTC past J2000 is outside the representable range")]
    OutOfRange { utc_seconds: f64 },
}
