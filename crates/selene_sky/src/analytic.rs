//! Series-based apparent places. No files needed.

use selene_core::Body;
use selene_frames::Nutation;
use selene_time::{Epoch, julian_centuries};

use crate::lunar::moon_geometric;
use crate::solar::{aberration_deg, sun_geometric};
use crate::{ApparentPlace, EphemerisSource, SkyError};

/// Apparent Sun and Moon from truncated Meeus series, corrected for
/// nutation (and, for the Sun, annual aberration).
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisSource for AnalyticEphemeris {
    fn name(&self) -> &'static str {
        "analytic"
    }

    fn apparent(&self, body: Body, epoch: Epoch) -> Result<ApparentPlace, SkyError> {
        // TDB and TT differ by < 2 ms; the series cannot tell them apart.
        let t = julian_centuries(epoch.as_jd_tdb());
        let nut = Nutation::at(t);
        let dpsi_deg = nut.dpsi.to_degrees();
        let eps = nut.true_obliquity();

        match body {
            Body::Sun => {
                let (lon, dist) = sun_geometric(t);
                Ok(ApparentPlace::from_ecliptic(
                    lon + dpsi_deg + aberration_deg(dist),
                    0.0,
                    dist,
                    eps,
                ))
            }
            Body::Moon => {
                let (lon, lat, dist) = moon_geometric(t);
                Ok(ApparentPlace::from_ecliptic(lon + dpsi_deg, lat, dist, eps))
            }
            Body::Earth => Err(SkyError::UnsupportedBody {
                source_name: self.name(),
                body,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_meeus_example_25a() {
        // 1992 Oct 13.0 TD: λ = 199.90895°, α = 198.38083°, δ = −7.78507°
        let p = AnalyticEphemeris
            .apparent(Body::Sun, Epoch::from_jd_tdb(2_448_908.5))
            .unwrap();
        assert!((p.ecl_lon_deg - 199.90895).abs() < 0.002, "λ = {}", p.ecl_lon_deg);
        assert!((p.ra_deg - 198.38083).abs() < 0.002, "α = {}", p.ra_deg);
        assert!((p.dec_deg + 7.78507).abs() < 0.002, "δ = {}", p.dec_deg);
        assert_eq!(p.ecl_lat_deg, 0.0);
    }

    #[test]
    fn moon_meeus_example_47a() {
        // 1992 Apr 12 0h TD, apparent λ = 133.167265°, β = −3.229126°
        let p = AnalyticEphemeris
            .apparent(Body::Moon, Epoch::from_jd_tdb(2_448_724.5))
            .unwrap();
        assert!((p.ecl_lon_deg - 133.167265).abs() < 0.01, "λ = {}", p.ecl_lon_deg);
        assert!((p.ecl_lat_deg + 3.229126).abs() < 0.01, "β = {}", p.ecl_lat_deg);
        // α = 134.688470°, δ = 13.768368°
        assert!((p.ra_deg - 134.688470).abs() < 0.015, "α = {}", p.ra_deg);
        assert!((p.dec_deg - 13.768368).abs() < 0.015, "δ = {}", p.dec_deg);
    }

    #[test]
    fn earth_is_unsupported() {
        let err = AnalyticEphemeris
            .apparent(Body::Earth, Epoch::from_tdb_seconds(0.0))
            .unwrap_err();
        assert!(matches!(err, SkyError::UnsupportedBody { body: Body::Earth, .. }));
    }
}
