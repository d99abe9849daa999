//! Apparent places from a JPL SPK kernel.
//!
//! Pipeline per body and epoch:
//! 1. Earth barycentric state at the observation epoch.
//! 2. Light-time iteration on the target's barycentric position.
//! 3. Annual aberration from the Earth's barycentric velocity.
//! 4. Precession and nutation to the true equator and equinox of date.

use std::path::Path;

use selene_core::{Body, Engine, EngineConfig, Observer, Query};
use selene_frames::{Nutation, precession_matrix};
use selene_time::{Epoch, julian_centuries};

use crate::{ApparentPlace, EphemerisSource, SPEED_OF_LIGHT_KM_S, SkyError};

const LIGHT_TIME_ITERATIONS: usize = 3;

/// [`EphemerisSource`] backed by an SPK [`Engine`].
#[derive(Debug)]
pub struct KernelEphemeris {
    engine: Engine,
}

impl KernelEphemeris {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    /// Load a single SPK file.
    pub fn open(path: &Path) -> Result<Self, SkyError> {
        let engine = Engine::new(EngineConfig::with_single_spk(path.to_path_buf()))?;
        Ok(Self::new(engine))
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    fn barycentric(&self, body: Body, epoch: Epoch) -> Result<[f64; 6], SkyError> {
        let state = self.engine.query(Query {
            target: body,
            observer: Observer::SolarSystemBarycenter,
            epoch,
        })?;
        let [x, y, z] = state.position_km;
        let [vx, vy, vz] = state.velocity_km_s;
        Ok([x, y, z, vx, vy, vz])
    }

    /// Light-time corrected geocentric position on the ICRF axes, km.
    fn astrometric(&self, body: Body, epoch: Epoch, earth: &[f64; 6]) -> Result<[f64; 3], SkyError> {
        let mut tau = 0.0;
        let mut rel = [0.0; 3];
        for _ in 0..LIGHT_TIME_ITERATIONS {
            let target = self.barycentric(body, epoch - tau)?;
            rel = [target[0] - earth[0], target[1] - earth[1], target[2] - earth[2]];
            tau = norm(&rel) / SPEED_OF_LIGHT_KM_S;
        }
        Ok(rel)
    }
}

impl EphemerisSource for KernelEphemeris {
    fn name(&self) -> &'static str {
        "spk"
    }

    fn apparent(&self, body: Body, epoch: Epoch) -> Result<ApparentPlace, SkyError> {
        if body == Body::Earth {
            return Err(SkyError::UnsupportedBody {
                source_name: self.name(),
                body,
            });
        }

        let earth = self.barycentric(Body::Earth, epoch)?;
        let astrometric = self.astrometric(body, epoch, &earth)?;
        let distance_km = norm(&astrometric);
        let proper = aberrate(&astrometric, &[earth[3], earth[4], earth[5]]);

        let t = julian_centuries(epoch.as_jd_tt());
        let nut = Nutation::at(t);
        let unit_of_date = nut.matrix().apply(&precession_matrix(t).apply(&proper));
        let of_date = unit_of_date.map(|c| c * distance_km);

        tracing::trace!(
            body = ?body,
            distance_km,
            light_time_s = distance_km / SPEED_OF_LIGHT_KM_S,
            "kernel apparent place"
        );
        Ok(ApparentPlace::from_equatorial_vector(&of_date, nut.true_obliquity()))
    }
}

fn norm(v: &[f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// First-order annual aberration: `u′ = u + v/c − u (u·v)/c`, renormalised.
/// Returns a unit vector.
fn aberrate(position: &[f64; 3], observer_velocity_km_s: &[f64; 3]) -> [f64; 3] {
    let r = norm(position);
    if r == 0.0 {
        return [0.0; 3];
    }
    let u = position.map(|c| c / r);
    let beta = observer_velocity_km_s.map(|c| c / SPEED_OF_LIGHT_KM_S);
    let dot = u[0] * beta[0] + u[1] * beta[1] + u[2] * beta[2];
    let shifted = [
        u[0] + beta[0] - u[0] * dot,
        u[1] + beta[1] - u[1] * dot,
        u[2] + beta[2] - u[2] * dot,
    ];
    let n = norm(&shifted);
    shifted.map(|c| c / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aberration_shifts_toward_velocity() {
        // Star on +x, observer moving along +y at 30 km/s: ~20.6″ toward +y.
        let u = aberrate(&[1.0e8, 0.0, 0.0], &[0.0, 30.0, 0.0]);
        let shift_arcsec = u[1].atan2(u[0]).to_degrees() * 3600.0;
        assert!((shift_arcsec - 20.64).abs() < 0.05, "shift = {shift_arcsec}″");
        assert!((norm(&u) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn aberration_vanishes_along_velocity() {
        let u = aberrate(&[0.0, 0.0, 5.0], &[0.0, 0.0, 30.0]);
        assert!(u[0].abs() < 1e-15 && u[1].abs() < 1e-15);
    }

    #[test]
    fn zero_vector_stays_zero() {
        assert_eq!(aberrate(&[0.0; 3], &[1.0, 2.0, 3.0]), [0.0; 3]);
    }
}
