//! Apparent places of the Sun and Moon and what an observer on the Earth
//! sees of them.
//!
//! Two [`EphemerisSource`] implementations supply geocentric apparent
//! places: [`AnalyticEphemeris`] (truncated Meeus series, no files needed)
//! and [`KernelEphemeris`] (JPL SPK through [`selene_core::Engine`]).
//! [`observe`] turns either into topocentric altitude and azimuth for a
//! [`Site`].

pub mod analytic;
pub mod illumination;
pub mod kernel;
pub mod lunar;
pub mod observe;
pub mod site;
pub mod solar;

use selene_core::{Body, EngineError};
use selene_frames::{
    SphericalCoords, cartesian_to_spherical, ecliptic_of_date_to_equatorial,
    equatorial_to_ecliptic_of_date, spherical_to_cartesian,
};
use selene_time::Epoch;
use thiserror::Error;

pub use analytic::AnalyticEphemeris;
pub use illumination::{illuminated_fraction, phase_angle_deg};
pub use kernel::KernelEphemeris;
pub use observe::{Observation, observe, semidiameter_deg};
pub use site::Site;

/// Astronomical unit, km.
pub const AU_KM: f64 = 149_597_870.7;

/// Speed of light, km/s.
pub const SPEED_OF_LIGHT_KM_S: f64 = 299_792.458;

/// Errors from computing an apparent place.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SkyError {
    #[error("{source_name} ephemeris does not provide {body:?}")]
    UnsupportedBody {
        source_name: &'static str,
        body: Body,
    },
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Geocentric apparent place on the true equator and equinox of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPlace {
    /// Right ascension, degrees [0, 360).
    pub ra_deg: f64,
    /// Declination, degrees.
    pub dec_deg: f64,
    /// Ecliptic longitude of date, degrees [0, 360).
    pub ecl_lon_deg: f64,
    /// Ecliptic latitude of date, degrees.
    pub ecl_lat_deg: f64,
    /// Geocentric distance, km.
    pub distance_km: f64,
}

impl ApparentPlace {
    /// Build from ecliptic-of-date coordinates.
    pub fn from_ecliptic(lon_deg: f64, lat_deg: f64, distance_km: f64, true_obliquity: f64) -> Self {
        let ecl = SphericalCoords {
            lon_deg,
            lat_deg,
            distance_km,
        };
        let eq = cartesian_to_spherical(&ecliptic_of_date_to_equatorial(
            &spherical_to_cartesian(&ecl),
            true_obliquity,
        ));
        Self {
            ra_deg: eq.lon_deg,
            dec_deg: eq.lat_deg,
            ecl_lon_deg: selene_frames::normalize_360(lon_deg),
            ecl_lat_deg: lat_deg,
            distance_km,
        }
    }

    /// Build from a Cartesian vector on the true equator of date.
    pub fn from_equatorial_vector(v: &[f64; 3], true_obliquity: f64) -> Self {
        let eq = cartesian_to_spherical(v);
        let ecl = cartesian_to_spherical(&equatorial_to_ecliptic_of_date(v, true_obliquity));
        Self {
            ra_deg: eq.lon_deg,
            dec_deg: eq.lat_deg,
            ecl_lon_deg: ecl.lon_deg,
            ecl_lat_deg: ecl.lat_deg,
            distance_km: eq.distance_km,
        }
    }

    /// Cartesian vector on the true equator of date, km.
    pub fn equatorial_vector(&self) -> [f64; 3] {
        spherical_to_cartesian(&SphericalCoords {
            lon_deg: self.ra_deg,
            lat_deg: self.dec_deg,
            distance_km: self.distance_km,
        })
    }

    pub fn distance_au(&self) -> f64 {
        self.distance_km / AU_KM
    }
}

/// A provider of geocentric apparent places.
pub trait EphemerisSource {
    /// Short name for logs and errors.
    fn name(&self) -> &'static str;

    /// Geocentric apparent place of `body` at `epoch`.
    fn apparent(&self, body: Body, epoch: Epoch) -> Result<ApparentPlace, SkyError>;
}

impl<S: EphemerisSource + ?Sized> EphemerisSource for &S {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn apparent(&self, body: Body, epoch: Epoch) -> Result<ApparentPlace, SkyError> {
        (**self).apparent(body, epoch)
    }
}
