//! Run configuration, built once from the parsed [`Cli`].

use std::path::PathBuf;

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use thiserror::Error;

use crate::args::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "invalid date/time {year:04}-{month:02}-{day:02} {hour:02}:{minute:02}"
    )]
    InvalidDateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },
    #[error("local time {0} does not exist in the configured zone")]
    NonexistentLocalTime(NaiveDateTime),
    #[error("latitude must be within ±90°, got {0}")]
    LatitudeOutOfRange(f64),
    #[error("longitude must be within ±180°, got {0}")]
    LongitudeOutOfRange(f64),
}

/// A place name and a wall-clock date/time with no zone attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationRequest {
    pub location_name: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    naive: NaiveDateTime,
}

impl ObservationRequest {
    pub fn new(
        location_name: impl Into<String>,
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    ) -> Result<Self, ConfigError> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .ok_or(ConfigError::InvalidDateTime {
                year,
                month,
                day,
                hour,
                minute,
            })?;
        Ok(Self {
            location_name: location_name.into(),
            year,
            month,
            day,
            hour,
            minute,
            naive,
        })
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.naive
    }
}

/// A time zone for reading the request or printing local times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// The system zone.
    Local,
    Fixed(FixedOffset),
}

impl Zone {
    /// Read a wall-clock time in this zone. An ambiguous time (DST fall-back)
    /// takes the earlier instant; a skipped one is an error.
    pub fn to_utc(&self, naive: NaiveDateTime) -> Result<DateTime<Utc>, ConfigError> {
        let resolved = match self {
            Self::Local => pick_earliest(Local.from_local_datetime(&naive)),
            Self::Fixed(offset) => pick_earliest(offset.from_local_datetime(&naive)),
        };
        resolved.ok_or(ConfigError::NonexistentLocalTime(naive))
    }

    /// Wall-clock time of `t` in this zone.
    pub fn localize(&self, t: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Self::Local => t.with_timezone(&Local).naive_local(),
            Self::Fixed(offset) => t.with_timezone(offset).naive_local(),
        }
    }
}

fn pick_earliest<Tz: TimeZone>(r: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    match r {
        LocalResult::Single(t) | LocalResult::Ambiguous(t, _) => Some(t.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Everything one run needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub request: ObservationRequest,
    /// Zone the request's wall-clock time is read in. UTC unless
    /// `--utc-offset` is given.
    pub request_zone: Zone,
    /// Zone for printed times and for the calendar day the phase is named
    /// on. The system zone unless `--utc-offset` is given.
    pub display_zone: Zone,
    pub ephemeris: PathBuf,
    pub geocoder_url: String,
    /// `(latitude, longitude)` given on the command line.
    pub coordinates: Option<(f64, f64)>,
    pub debug: bool,
    pub verbose: bool,
}

impl RunConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let request = ObservationRequest::new(
            cli.location,
            cli.year,
            cli.month,
            cli.day,
            cli.hour,
            cli.minute,
        )?;

        let coordinates = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(ConfigError::LatitudeOutOfRange(lat));
                }
                if !(-180.0..=180.0).contains(&lon) {
                    return Err(ConfigError::LongitudeOutOfRange(lon));
                }
                Some((lat, lon))
            }
            _ => None,
        };

        Ok(Self {
            request,
            request_zone: Zone::Fixed(cli.utc_offset.unwrap_or(Utc.fix())),
            display_zone: cli.utc_offset.map_or(Zone::Local, Zone::Fixed),
            ephemeris: cli.ephemeris,
            geocoder_url: cli.geocoder_url,
            coordinates,
            debug: cli.debug,
            verbose: cli.verbose,
        })
    }

    /// The observed instant.
    pub fn instant(&self) -> Result<DateTime<Utc>, ConfigError> {
        self.request_zone.to_utc(self.request.naive())
    }
}
