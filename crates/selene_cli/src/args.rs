//! Command-line arguments.

use std::path::PathBuf;

use chrono::FixedOffset;
use clap::Parser;
use selene_geocode::nominatim::DEFAULT_BASE_URL;

#[derive(Debug, Parser)]
#[command(
    name = "selene",
    version,
    about = "Moon and Sun positions, phase and rise/set times for a place and local time"
)]
pub struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Echo the parsed configuration
    #[arg(long)]
    pub debug: bool,

    /// Name of the location
    #[arg(short, long, default_value = "Hooke Park, UK")]
    pub location: String,

    #[arg(short, long, default_value_t = 2020, allow_hyphen_values = true)]
    pub year: i32,

    #[arg(short, long, default_value_t = 3)]
    pub month: u32,

    #[arg(short, long, default_value_t = 7)]
    pub day: u32,

    #[arg(long, default_value_t = 20)]
    pub hour: u32,

    /// Minutes
    #[arg(long = "min", default_value_t = 0)]
    pub minute: u32,

    /// Path to an SPK kernel (e.g. de421.bsp)
    #[arg(long, env = "SELENE_EPHEMERIS", default_value = "de421.bsp")]
    pub ephemeris: PathBuf,

    /// Nominatim base URL
    #[arg(long, env = "SELENE_GEOCODER_URL", default_value = DEFAULT_BASE_URL)]
    pub geocoder_url: String,

    /// Zone for the request and printed times, as ±HH:MM (default: request in
    /// UTC, times printed in the system zone)
    #[arg(long, value_parser = parse_utc_offset, allow_hyphen_values = true)]
    pub utc_offset: Option<FixedOffset>,

    /// Latitude in degrees north; skips the geocoder
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude in degrees east; skips the geocoder
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// Parse `Z`, `UTC` or `±HH:MM` / `±HHMM` / `±HH`.
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(format!("offset must start with + or -: {s:?}")),
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) || !matches!(digits.len(), 2 | 4) {
        return Err(format!("offset must look like ±HH:MM: {s:?}"));
    }
    let hours: i32 = digits[..2].parse().map_err(|_| format!("bad hours in {s:?}"))?;
    let minutes: i32 = if digits.len() == 4 {
        digits[2..].parse().map_err(|_| format!("bad minutes in {s:?}"))?
    } else {
        0
    };
    if hours > 14 || minutes > 59 {
        return Err(format!("offset out of range: {s:?}"));
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| format!("offset out of range: {s:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_report_evening() {
        let cli = Cli::parse_from(["selene"]);
        assert_eq!(cli.location, "Hooke Park, UK");
        assert_eq!((cli.year, cli.month, cli.day, cli.hour, cli.minute), (2020, 3, 7, 20, 0));
        assert!(!cli.verbose && !cli.debug);
        assert!(cli.lat.is_none() && cli.lon.is_none());
    }

    #[test]
    fn short_flags() {
        let cli = Cli::parse_from(["selene", "-v", "-l", "Paris", "-y", "2021", "-m", "6", "-d", "1"]);
        assert!(cli.verbose);
        assert_eq!(cli.location, "Paris");
        assert_eq!((cli.year, cli.month, cli.day), (2021, 6, 1));
    }

    #[test]
    fn negative_coordinates_and_offset() {
        let cli = Cli::parse_from([
            "selene",
            "--lat",
            "-33.9",
            "--lon",
            "-70.6",
            "--utc-offset",
            "-04:00",
        ]);
        assert_eq!(cli.lat, Some(-33.9));
        assert_eq!(cli.lon, Some(-70.6));
        assert_eq!(cli.utc_offset.map(|o| o.local_minus_utc()), Some(-4 * 3600));
    }

    #[test]
    fn lone_latitude_is_rejected() {
        assert!(Cli::try_parse_from(["selene", "--lat", "50.0"]).is_err());
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_utc_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_utc_offset("-0800").unwrap().local_minus_utc(), -28_800);
        assert_eq!(parse_utc_offset("+01").unwrap().local_minus_utc(), 3600);
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert!(parse_utc_offset("05:00").is_err());
        assert!(parse_utc_offset("+5:00").is_err());
        assert!(parse_utc_offset("+15:00").is_err());
        assert!(parse_utc_offset("+01:75").is_err());
    }
}
