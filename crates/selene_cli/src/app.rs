//! One run of the report, start to finish.

use std::io::Write;

use anyhow::{Context, Result};
use selene_geocode::{GeocodeOutcome, Geocoder};
use selene_sky::Site;
use selene_time::Epoch;

use crate::config::RunConfig;
use crate::observation::{AnalyticBackend, CelestialComputation, KernelBackend};
use crate::report;

/// Geocode, compute and print. A place the geocoder cannot find ends the
/// report after the timestamp and is not an error.
pub fn run<G, W>(config: &RunConfig, geocoder: &G, out: &mut W) -> Result<()>
where
    G: Geocoder + ?Sized,
    W: Write,
{
    let request = &config.request;
    report::write_header(out, config, request.naive())?;

    let place = match geocoder
        .geocode(&request.location_name)
        .with_context(|| format!("geocoding {:?}", request.location_name))?
    {
        GeocodeOutcome::Resolved(place) => place,
        GeocodeOutcome::NotFound => {
            tracing::warn!(location = %request.location_name, "location not found");
            return Ok(());
        }
    };
    report::write_place(out, &place)?;

    let instant_utc = config.instant()?;
    let instant = Epoch::from_datetime(&instant_utc);
    let site = Site::sea_level(place.latitude, place.longitude);
    tracing::debug!(%instant_utc, lat = site.latitude_deg, lon = site.longitude_deg, "observing");

    let analytic = AnalyticBackend::new();
    let observation = analytic
        .compute(&site, instant, &config.display_zone)
        .with_context(|| format!("{} back-end", analytic.name()))?;
    report::write_analytic(out, &observation, &config.display_zone)?;

    let kernel = KernelBackend::open(&config.ephemeris)?;
    let cross_check = kernel
        .compute(&site, instant, &config.display_zone)
        .with_context(|| format!("{} back-end", kernel.name()))?;
    report::write_kernel(out, &cross_check)?;

    out.flush()?;
    Ok(())
}
