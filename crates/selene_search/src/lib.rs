//! Celestial event search for the Moon and Sun.
//!
//! This crate provides:
//! - Lunar quarter search (new, first quarter, full, last quarter)
//! - Rise/set search with refraction and semidiameter
//! - The eight-way moon-phase classifier over quarter dates

pub mod error;
pub mod lunar_phase;
pub mod phase_name;
pub mod riseset;

pub use error::SearchError;
pub use lunar_phase::{
    LunarQuarter, QuarterAnchors, QuarterEvent, SearchDirection, elongation_deg, find_quarter,
    local_date, next_full_moon, next_new_moon, next_quarter, prev_full_moon, prev_new_moon,
    prev_quarter,
};
pub use phase_name::{MoonPhaseName, classify_phase};
pub use riseset::{
    RiseSetConfig, RiseSetEvent, RiseSetResult, find_rise_set, next_rise, next_set, prev_rise,
};
