//! Error types for event search.

use selene_sky::SkyError;
use selene_time::TimeError;
use thiserror::Error;

/// Errors from quarter and rise/set search.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from an ephemeris source.
    #[error(transparent)]
    Sky(#[from] SkyError),
    /// Error converting an event time to civil time.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// Invalid search configuration.
    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
    /// The scan window closed without an event.
    #[error("no event found: {0}")]
    NotFound(&'static str),
}
