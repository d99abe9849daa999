//! The `selene` report: where the Moon and Sun are for a named place and
//! local time, with the Moon's phase and the nearby rise/set times.

pub mod app;
pub mod args;
pub mod banner;
pub mod config;
pub mod observation;
pub mod report;

pub use app::run;
pub use args::Cli;
pub use config::{ConfigError, ObservationRequest, RunConfig, Zone};
pub use observation::{AnalyticBackend, CelestialComputation, KernelBackend};
