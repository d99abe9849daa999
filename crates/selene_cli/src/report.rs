//! Plain-text report.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDateTime;
use selene_geocode::GeoCoordinates;
use selene_search::RiseSetResult;
use selene_time::Epoch;

use crate::banner::BANNER;
use crate::config::{RunConfig, Zone};
use crate::observation::{CelestialObservation, KernelObservation};

const STAMP: &str = "%Y-%m-%d %H:%M";

/// Degrees as `D:MM:SS.s`, rounded to a tenth of an arcsecond.
pub fn sexagesimal(deg: f64) -> String {
    let sign = if deg < 0.0 { "-" } else { "" };
    let tenths = (deg.abs() * 36_000.0).round() as u64;
    let d = tenths / 36_000;
    let m = (tenths / 600) % 60;
    let s = (tenths % 600) as f64 / 10.0;
    format!("{sign}{d}:{m:02}:{s:04.1}")
}

fn local_stamp(epoch: Epoch, zone: &Zone) -> Result<String> {
    Ok(zone.localize(epoch.to_datetime()?).format(STAMP).to_string())
}

fn event_stamp(result: &RiseSetResult, zone: &Zone) -> Result<String> {
    match result {
        RiseSetResult::Event { epoch, .. } => local_stamp(*epoch, zone),
        RiseSetResult::NeverRises => Ok("never rises".to_owned()),
        RiseSetResult::NeverSets => Ok("never sets".to_owned()),
    }
}

/// Banner, optional configuration echo and the request timestamp.
pub fn write_header<W: Write>(out: &mut W, config: &RunConfig, local: NaiveDateTime) -> Result<()> {
    write!(out, "{BANNER}")?;
    if config.debug {
        writeln!(out, "args: {config:?}")?;
    }
    writeln!(out, "{}", local.format("%Y-%m-%d %H:%M:%S"))?;
    Ok(())
}

pub fn write_place<W: Write>(out: &mut W, place: &GeoCoordinates) -> Result<()> {
    writeln!(out, "{}", place.address)?;
    writeln!(out, "({}, {})", place.latitude, place.longitude)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_analytic<W: Write>(out: &mut W, obs: &CelestialObservation, zone: &Zone) -> Result<()> {
    let moon = &obs.moon;
    writeln!(
        out,
        "Moon:  {} {}",
        sexagesimal(moon.position.altitude_degrees),
        sexagesimal(moon.position.azimuth_degrees)
    )?;
    writeln!(
        out,
        "moon azimuth / altitude {:.1} {:.1}",
        moon.position.azimuth_degrees, moon.position.altitude_degrees
    )?;
    writeln!(out, "moon illumination {:.1}", moon.illumination_percent)?;
    writeln!(
        out,
        "next moon rise / full moon {} {}",
        event_stamp(&moon.next_rise, zone)?,
        local_stamp(moon.next_full_moon, zone)?
    )?;
    writeln!(out, "phase:  {}", moon.phase_name)?;
    writeln!(out)?;

    let sun = &obs.sun;
    writeln!(
        out,
        "Sun:  {} {}",
        sexagesimal(sun.position.altitude_degrees),
        sexagesimal(sun.position.azimuth_degrees)
    )?;
    writeln!(
        out,
        "{} {}",
        event_stamp(&sun.previous_rise, zone)?,
        event_stamp(&sun.next_set, zone)?
    )?;
    writeln!(
        out,
        "sun  azimuth / altitude {:.1} {:.1}",
        sun.position.azimuth_degrees, sun.position.altitude_degrees
    )?;
    writeln!(out)?;
    Ok(())
}

pub fn write_kernel<W: Write>(out: &mut W, obs: &KernelObservation) -> Result<()> {
    writeln!(out, "separation {:.4} deg", obs.separation_degrees)?;
    for (label, body) in [("Moon: ", &obs.moon), ("Sun:  ", &obs.sun)] {
        writeln!(
            out,
            "{label} alt {:.4} deg, az {:.4} deg, {:.6} au",
            body.position.altitude_degrees, body.position.azimuth_degrees, body.distance_au
        )?;
    }
    Ok(())
}
