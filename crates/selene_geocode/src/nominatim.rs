//! OpenStreetMap Nominatim search client.

use serde::Deserialize;

use crate::{GeoCoordinates, GeocodeError, GeocodeOutcome, Geocoder};

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_USER_AGENT: &str = concat!("selene/", env!("CARGO_PKG_VERSION"));

/// One element of the `search?format=json` array. Coordinates arrive as
/// strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// Blocking Nominatim client.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, GeocodeError> {
        let base_url = base_url.trim_end_matches('/');
        if base_url.is_empty() {
            return Err(GeocodeError::InvalidConfig("base URL must not be empty"));
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_owned(),
        })
    }

    pub fn with_defaults() -> Result<Self, GeocodeError> {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_AGENT)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<GeocodeOutcome, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, query, "nominatim lookup");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
            });
        }
        let body = response.text()?;
        parse_search_response(&body)
    }
}

/// Parse a `search?format=json` body. An empty array is `NotFound`; only the
/// first hit is used.
pub fn parse_search_response(body: &str) -> Result<GeocodeOutcome, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;
    let Some(hit) = hits.into_iter().next() else {
        return Ok(GeocodeOutcome::NotFound);
    };

    let parse = |field: &str, value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| GeocodeError::Malformed(format!("{field} is not a number: {value:?}")))
    };
    let latitude = parse("lat", &hit.lat)?;
    let longitude = parse("lon", &hit.lon)?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(GeocodeError::Malformed(format!(
            "coordinates out of range: ({latitude}, {longitude})"
        )));
    }

    Ok(GeocodeOutcome::Resolved(GeoCoordinates {
        latitude,
        longitude,
        address: hit.display_name,
    }))
}
