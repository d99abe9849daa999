//! The two computation back-ends behind [`CelestialComputation`].
//!
//! The analytic back-end produces the full report: refracted altaz,
//! illumination, rise/set, next full moon and the phase name. The kernel
//! back-end reads an SPK file and produces unrefracted altaz and distances
//! for a cross-check. The two are printed side by side and never reconciled.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use selene_core::Body;
use selene_frames::{Atmosphere, angular_separation_deg};
use selene_search::{
    MoonPhaseName, QuarterAnchors, RiseSetConfig, RiseSetResult, classify_phase, next_full_moon,
    next_rise, next_set, prev_rise,
};
use selene_sky::{
    AU_KM, AnalyticEphemeris, EphemerisSource, KernelEphemeris, Site, illuminated_fraction,
    observe,
};
use selene_time::Epoch;

use crate::config::Zone;

/// A position back-end for the report.
pub trait CelestialComputation {
    type Output;

    fn name(&self) -> &'static str;

    fn compute(&self, site: &Site, instant: Epoch, zone: &Zone) -> Result<Self::Output>;
}

/// Altitude and azimuth of one body, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AltAz {
    pub altitude_degrees: f64,
    pub azimuth_degrees: f64,
}

/// Moon section of the analytic report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonObservation {
    pub position: AltAz,
    pub illumination_percent: f64,
    pub next_rise: RiseSetResult,
    pub next_set: RiseSetResult,
    pub next_full_moon: Epoch,
    pub phase_name: MoonPhaseName,
}

/// Sun section of the analytic report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunObservation {
    pub position: AltAz,
    pub previous_rise: RiseSetResult,
    pub next_set: RiseSetResult,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialObservation {
    pub moon: MoonObservation,
    pub sun: SunObservation,
}

/// Analytic series with standard refraction.
#[derive(Debug, Clone, Default)]
pub struct AnalyticBackend {
    source: AnalyticEphemeris,
    atmosphere: Atmosphere,
    riseset: RiseSetConfig,
}

impl AnalyticBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CelestialComputation for AnalyticBackend {
    type Output = CelestialObservation;

    fn name(&self) -> &'static str {
        self.source.name()
    }

    fn compute(&self, site: &Site, instant: Epoch, zone: &Zone) -> Result<CelestialObservation> {
        let source = &self.source;
        let air = Some(&self.atmosphere);

        let moon = observe(source, Body::Moon, site, instant, air).context("observing the Moon")?;
        let sun = observe(source, Body::Sun, site, instant, air).context("observing the Sun")?;
        let fraction = illuminated_fraction(&moon.geocentric, &sun.geocentric);

        let moon_rise = next_rise(source, Body::Moon, site, instant, &self.riseset)?;
        let moon_set = next_set(source, Body::Moon, site, instant, &self.riseset)?;
        let full = next_full_moon(source, instant)?
            .ok_or_else(|| anyhow!("no full moon found after {}", instant.as_jd_tdb()))?;

        let anchors = match zone {
            Zone::Local => QuarterAnchors::around(source, instant, &chrono::Local),
            Zone::Fixed(offset) => QuarterAnchors::around(source, instant, offset),
        }
        .context("searching lunar quarters")?;
        let date = zone.localize(instant.to_datetime()?).date();
        let phase_name = classify_phase(date, &anchors)
            .ok_or_else(|| anyhow!("moon phase could not be classified for {date}: {anchors:?}"))?;

        let sun_rise = prev_rise(source, Body::Sun, site, instant, &self.riseset)?;
        let sun_set = next_set(source, Body::Sun, site, instant, &self.riseset)?;

        tracing::debug!(backend = self.name(), %phase_name, fraction, "analytic observation done");
        Ok(CelestialObservation {
            moon: MoonObservation {
                position: AltAz {
                    altitude_degrees: moon.altitude_deg(),
                    azimuth_degrees: moon.azimuth_deg(),
                },
                illumination_percent: fraction * 100.0,
                next_rise: moon_rise,
                next_set: moon_set,
                next_full_moon: full.epoch,
                phase_name,
            },
            sun: SunObservation {
                position: AltAz {
                    altitude_degrees: sun.altitude_deg(),
                    azimuth_degrees: sun.azimuth_deg(),
                },
                previous_rise: sun_rise,
                next_set: sun_set,
            },
        })
    }
}

/// Altaz of one body plus its distance from the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangedAltAz {
    pub position: AltAz,
    pub distance_au: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelObservation {
    pub moon: RangedAltAz,
    pub sun: RangedAltAz,
    /// Great-circle angle between the two altaz directions.
    pub separation_degrees: f64,
}

/// SPK-kernel positions, sea level, no refraction.
#[derive(Debug)]
pub struct KernelBackend {
    source: KernelEphemeris,
}

impl KernelBackend {
    pub fn open(path: &Path) -> Result<Self> {
        let source = KernelEphemeris::open(path)
            .with_context(|| format!("loading ephemeris {}", path.display()))?;
        Ok(Self { source })
    }
}

impl CelestialComputation for KernelBackend {
    type Output = KernelObservation;

    fn name(&self) -> &'static str {
        self.source.name()
    }

    fn compute(&self, site: &Site, instant: Epoch, _zone: &Zone) -> Result<KernelObservation> {
        let site = Site::sea_level(site.latitude_deg, site.longitude_deg);
        let ranged = |body: Body| -> Result<(RangedAltAz, selene_frames::Horizontal)> {
            let obs = observe(&self.source, body, &site, instant, None)
                .with_context(|| format!("observing {body:?} from the kernel"))?;
            Ok((
                RangedAltAz {
                    position: AltAz {
                        altitude_degrees: obs.altitude_deg(),
                        azimuth_degrees: obs.azimuth_deg(),
                    },
                    distance_au: obs.distance_km / AU_KM,
                },
                obs.horizontal,
            ))
        };
        let (moon, moon_h) = ranged(Body::Moon)?;
        let (sun, sun_h) = ranged(Body::Sun)?;

        Ok(KernelObservation {
            moon,
            sun,
            separation_degrees: angular_separation_deg(&moon_h, &sun_h),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;
    use selene_search::RiseSetEvent;

    use super::*;

    fn hooke_park() -> Site {
        Site::sea_level(50.7921955, -2.6708453)
    }

    fn utc() -> Zone {
        Zone::Fixed(FixedOffset::east_opt(0).unwrap())
    }

    #[test]
    fn analytic_report_evening() {
        let instant = Epoch::from_utc_calendar(2020, 3, 7, 20, 0, 0.0).unwrap();
        let obs = AnalyticBackend::new()
            .compute(&hooke_park(), instant, &utc())
            .unwrap();

        let moon = obs.moon.position;
        assert!((moon.altitude_degrees - 43.0).abs() < 1.0, "alt = {}", moon.altitude_degrees);
        assert!((moon.azimuth_degrees - 119.9).abs() < 1.5, "az = {}", moon.azimuth_degrees);
        assert!(obs.moon.illumination_percent > 90.0 && obs.moon.illumination_percent < 100.0);
        assert_eq!(obs.moon.phase_name, MoonPhaseName::WaxingGibbous);
        assert!(obs.sun.position.altitude_degrees < -10.0);

        assert!(matches!(
            obs.moon.next_rise,
            RiseSetResult::Event { event: RiseSetEvent::Rise, .. }
        ));
        assert!(matches!(
            obs.sun.previous_rise,
            RiseSetResult::Event { event: RiseSetEvent::Rise, .. }
        ));
        let full = obs.moon.next_full_moon.to_datetime().unwrap();
        assert_eq!(full.date_naive().to_string(), "2020-03-09");
    }

    #[test]
    fn missing_kernel_fails_to_open() {
        let err = KernelBackend::open(Path::new("/nonexistent/de421.bsp")).unwrap_err();
        assert!(format!("{err:#}").contains("de421.bsp"));
    }
}
