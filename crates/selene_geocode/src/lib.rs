//! Place-name lookup.
//!
//! [`Geocoder`] turns free text into [`GeoCoordinates`]. A lookup that
//! finds nothing is a normal outcome ([`GeocodeOutcome::NotFound`]), not an
//! error; transport and parse failures are [`GeocodeError`]s.

pub mod nominatim;

use std::fmt;

use thiserror::Error;

pub use nominatim::{NominatimGeocoder, parse_search_response};

/// A resolved place.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoCoordinates {
    /// Degrees north.
    pub latitude: f64,
    /// Degrees east.
    pub longitude: f64,
    /// Human-readable address of the match.
    pub address: String,
}

impl fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.address, self.latitude, self.longitude)
    }
}

/// Result of a lookup that reached the service.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Resolved(GeoCoordinates),
    NotFound,
}

/// Geocoding failures.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GeocodeError {
    #[error("geocoder request failed")]
    Transport(#[from] reqwest::Error),
    #[error("geocoder returned HTTP {status}")]
    Status { status: u16 },
    #[error("malformed geocoder response: {0}")]
    Malformed(String),
    #[error("invalid geocoder configuration: {0}")]
    InvalidConfig(&'static str),
}

/// A place-name resolver.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<GeocodeOutcome, GeocodeError>;
}

/// Always answers with the same outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGeocoder {
    outcome: GeocodeOutcome,
}

impl FixedGeocoder {
    pub fn resolved(coords: GeoCoordinates) -> Self {
        Self {
            outcome: GeocodeOutcome::Resolved(coords),
        }
    }

    pub fn not_found() -> Self {
        Self {
            outcome: GeocodeOutcome::NotFound,
        }
    }
}

impl Geocoder for FixedGeocoder {
    fn geocode(&self, query: &str) -> Result<GeocodeOutcome, GeocodeError> {
        tracing::debug!(query, "fixed geocoder");
        Ok(self.outcome.clone())
    }
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str) -> Result<GeocodeOutcome, GeocodeError> {
        (**self).geocode(query)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str) -> Result<GeocodeOutcome, GeocodeError> {
        (**self).geocode(query)
    }
}
