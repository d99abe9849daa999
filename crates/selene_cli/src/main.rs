use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use selene_cli::{Cli, RunConfig, run};
use selene_geocode::nominatim::DEFAULT_USER_AGENT;
use selene_geocode::{FixedGeocoder, GeoCoordinates, Geocoder, NominatimGeocoder};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = RunConfig::from_cli(cli).context("invalid arguments")?;
    let geocoder: Box<dyn Geocoder> = match config.coordinates {
        Some((latitude, longitude)) => Box::new(FixedGeocoder::resolved(GeoCoordinates {
            latitude,
            longitude,
            address: config.request.location_name.clone(),
        })),
        None => Box::new(
            NominatimGeocoder::new(&config.geocoder_url, DEFAULT_USER_AGENT)
                .context("building the geocoder")?,
        ),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &geocoder, &mut out)
}
