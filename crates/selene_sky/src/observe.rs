//! Topocentric observation of a body from a [`Site`].

use selene_core::Body;
use selene_frames::{
    Atmosphere, Horizontal, Nutation, cartesian_to_spherical, equatorial_to_horizontal,
    normalize_180, refraction_deg,
};
use selene_time::{Epoch, gast_rad, julian_centuries, local_sidereal_time_rad};

use crate::{ApparentPlace, EphemerisSource, Site, SkyError};

/// Mean lunar radius, km.
const MOON_RADIUS_KM: f64 = 1737.4;
/// Nominal solar radius, km.
const SUN_RADIUS_KM: f64 = 696_000.0;

/// What an observer at a site sees of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub body: Body,
    pub epoch: Epoch,
    /// Geocentric apparent place.
    pub geocentric: ApparentPlace,
    /// Topocentric right ascension, degrees [0, 360).
    pub ra_deg: f64,
    /// Topocentric declination, degrees.
    pub dec_deg: f64,
    /// Local hour angle, degrees [-180, 180).
    pub hour_angle_deg: f64,
    /// Topocentric distance, km.
    pub distance_km: f64,
    /// Altitude without refraction, degrees.
    pub geometric_altitude_deg: f64,
    /// Altitude (refracted when an atmosphere was given) and azimuth.
    pub horizontal: Horizontal,
}

impl Observation {
    pub fn altitude_deg(&self) -> f64 {
        self.horizontal.altitude_deg
    }

    pub fn azimuth_deg(&self) -> f64 {
        self.horizontal.azimuth_deg
    }
}

/// Observe `body` from `site` at `epoch`, refracting the altitude when
/// `atmosphere` is given.
pub fn observe<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    epoch: Epoch,
    atmosphere: Option<&Atmosphere>,
) -> Result<Observation, SkyError> {
    let geocentric = source.apparent(body, epoch)?;

    let nut = Nutation::at(julian_centuries(epoch.as_jd_tt()));
    let gast = gast_rad(epoch.as_jd_ut1(), nut.dpsi, nut.true_obliquity());
    let lst = local_sidereal_time_rad(gast, site.longitude_deg.to_radians());

    let g = geocentric.equatorial_vector();
    let o = site.geocentric_vector(lst);
    let topo = cartesian_to_spherical(&[g[0] - o[0], g[1] - o[1], g[2] - o[2]]);

    let hour_angle = lst - topo.lon_deg.to_radians();
    let geometric = equatorial_to_horizontal(
        hour_angle,
        topo.lat_deg.to_radians(),
        site.latitude_deg.to_radians(),
    );
    let horizontal = match atmosphere {
        Some(atm) => Horizontal {
            altitude_deg: geometric.altitude_deg + refraction_deg(geometric.altitude_deg, atm),
            azimuth_deg: geometric.azimuth_deg,
        },
        None => geometric,
    };

    Ok(Observation {
        body,
        epoch,
        geocentric,
        ra_deg: topo.lon_deg,
        dec_deg: topo.lat_deg,
        hour_angle_deg: normalize_180(hour_angle.to_degrees()),
        distance_km: topo.distance_km,
        geometric_altitude_deg: geometric.altitude_deg,
        horizontal,
    })
}

/// Apparent angular semidiameter, degrees. The Earth has none.
pub fn semidiameter_deg(body: Body, distance_km: f64) -> Option<f64> {
    let radius = match body {
        Body::Moon => MOON_RADIUS_KM,
        Body::Sun => SUN_RADIUS_KM,
        Body::Earth => return None,
    };
    Some((radius / distance_km).clamp(-1.0, 1.0).asin().to_degrees())
}
