//! Lunar quarter search.
//!
//! A quarter occurs when the apparent Moon-Sun elongation in ecliptic
//! longitude reaches 0°, 90°, 180° or 270°. The search samples
//! `f(t) = normalize_180(elongation(t) − target)` on a coarse grid and
//! bisects the first genuine sign change.

use chrono::{NaiveDate, TimeZone};
use selene_core::Body;
use selene_frames::{normalize_180, normalize_360};
use selene_sky::EphemerisSource;
use selene_time::Epoch;

use crate::error::SearchError;

/// Coarse scan step, seconds (half a day).
const SCAN_STEP_S: f64 = 43_200.0;
/// Scan window, seconds (40 days covers a synodic month with margin).
const SCAN_WINDOW_S: f64 = 40.0 * 86_400.0;
/// Bisection stops below this bracket width, seconds.
const CONVERGENCE_S: f64 = 1.0;

/// The four principal phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LunarQuarter {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl LunarQuarter {
    pub const ALL: [LunarQuarter; 4] = [
        Self::New,
        Self::FirstQuarter,
        Self::Full,
        Self::LastQuarter,
    ];

    /// Moon-Sun elongation at which this quarter occurs, degrees.
    pub const fn target_elongation_deg(self) -> f64 {
        match self {
            Self::New => 0.0,
            Self::FirstQuarter => 90.0,
            Self::Full => 180.0,
            Self::LastQuarter => 270.0,
        }
    }
}

/// Direction of an event search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// A quarter and the instant it occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterEvent {
    pub quarter: LunarQuarter,
    pub epoch: Epoch,
}

/// Apparent ecliptic elongation of the Moon from the Sun, degrees [0, 360).
pub fn elongation_deg<S: EphemerisSource + ?Sized>(
    source: &S,
    epoch: Epoch,
) -> Result<f64, SearchError> {
    let moon = source.apparent(Body::Moon, epoch)?;
    let sun = source.apparent(Body::Sun, epoch)?;
    Ok(normalize_360(moon.ecl_lon_deg - sun.ecl_lon_deg))
}

fn offset_from_target<S: EphemerisSource + ?Sized>(
    source: &S,
    quarter: LunarQuarter,
    epoch: Epoch,
) -> Result<f64, SearchError> {
    Ok(normalize_180(
        elongation_deg(source, epoch)? - quarter.target_elongation_deg(),
    ))
}

/// A sign change that is not the ±180° wrap of the normalised offset.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}

fn bisect<S: EphemerisSource + ?Sized>(
    source: &S,
    quarter: LunarQuarter,
    mut t_a: Epoch,
    mut f_a: f64,
    mut t_b: Epoch,
) -> Result<Epoch, SearchError> {
    while t_b - t_a > CONVERGENCE_S {
        let t_mid = t_a + 0.5 * (t_b - t_a);
        let f_mid = offset_from_target(source, quarter, t_mid)?;
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
    }
    Ok(t_a + 0.5 * (t_b - t_a))
}

/// Find the quarter nearest to `from` in `direction`.
///
/// Forward finds the first occurrence at or after `from`; backward the
/// last one strictly before it.
pub fn find_quarter<S: EphemerisSource + ?Sized>(
    source: &S,
    quarter: LunarQuarter,
    from: Epoch,
    direction: SearchDirection,
) -> Result<Option<QuarterEvent>, SearchError> {
    let step = match direction {
        SearchDirection::Forward => SCAN_STEP_S,
        SearchDirection::Backward => -SCAN_STEP_S,
    };
    let max_steps = (SCAN_WINDOW_S / SCAN_STEP_S).ceil() as usize;

    let mut t_prev = from;
    let mut f_prev = offset_from_target(source, quarter, from)?;
    if f_prev == 0.0 && direction == SearchDirection::Forward {
        return Ok(Some(QuarterEvent {
            quarter,
            epoch: from,
        }));
    }

    for _ in 0..max_steps {
        let t_curr = t_prev + step;
        let f_curr = offset_from_target(source, quarter, t_curr)?;

        if f_curr == 0.0 {
            return Ok(Some(QuarterEvent {
                quarter,
                epoch: t_curr,
            }));
        }
        if is_genuine_crossing(f_prev, f_curr) {
            let (t_a, f_a, t_b) = match direction {
                SearchDirection::Forward => (t_prev, f_prev, t_curr),
                SearchDirection::Backward => (t_curr, f_curr, t_prev),
            };
            let epoch = bisect(source, quarter, t_a, f_a, t_b)?;
            tracing::trace!(?quarter, jd_tdb = epoch.as_jd_tdb(), "quarter found");
            return Ok(Some(QuarterEvent { quarter, epoch }));
        }

        t_prev = t_curr;
        f_prev = f_curr;
    }
    Ok(None)
}

/// First occurrence of `quarter` at or after `from`.
pub fn next_quarter<S: EphemerisSource + ?Sized>(
    source: &S,
    quarter: LunarQuarter,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    find_quarter(source, quarter, from, SearchDirection::Forward)
}

/// Last occurrence of `quarter` strictly before `from`.
pub fn prev_quarter<S: EphemerisSource + ?Sized>(
    source: &S,
    quarter: LunarQuarter,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    find_quarter(source, quarter, from, SearchDirection::Backward)
}

pub fn next_full_moon<S: EphemerisSource + ?Sized>(
    source: &S,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    next_quarter(source, LunarQuarter::Full, from)
}

pub fn prev_full_moon<S: EphemerisSource + ?Sized>(
    source: &S,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    prev_quarter(source, LunarQuarter::Full, from)
}

pub fn next_new_moon<S: EphemerisSource + ?Sized>(
    source: &S,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    next_quarter(source, LunarQuarter::New, from)
}

pub fn prev_new_moon<S: EphemerisSource + ?Sized>(
    source: &S,
    from: Epoch,
) -> Result<Option<QuarterEvent>, SearchError> {
    prev_quarter(source, LunarQuarter::New, from)
}

/// Local calendar dates of the quarters on either side of an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterAnchors {
    pub prev_new: NaiveDate,
    pub next_new: NaiveDate,
    pub prev_first_quarter: NaiveDate,
    pub next_first_quarter: NaiveDate,
    pub prev_full: NaiveDate,
    pub next_full: NaiveDate,
    pub prev_last_quarter: NaiveDate,
    pub next_last_quarter: NaiveDate,
}

impl QuarterAnchors {
    /// Search all eight quarters around `epoch` and read their dates in
    /// `zone`.
    pub fn around<S, Tz>(source: &S, epoch: Epoch, zone: &Tz) -> Result<Self, SearchError>
    where
        S: EphemerisSource + ?Sized,
        Tz: TimeZone,
    {
        let date = |quarter: LunarQuarter,
                    direction: SearchDirection|
         -> Result<NaiveDate, SearchError> {
            let event = find_quarter(source, quarter, epoch, direction)?
                .ok_or(SearchError::NotFound("lunar quarter within 40 days"))?;
            local_date(event.epoch, zone)
        };
        use LunarQuarter::*;
        use SearchDirection::*;
        Ok(Self {
            prev_new: date(New, Backward)?,
            next_new: date(New, Forward)?,
            prev_first_quarter: date(FirstQuarter, Backward)?,
            next_first_quarter: date(FirstQuarter, Forward)?,
            prev_full: date(Full, Backward)?,
            next_full: date(Full, Forward)?,
            prev_last_quarter: date(LastQuarter, Backward)?,
            next_last_quarter: date(LastQuarter, Forward)?,
        })
    }
}

/// Calendar date of `epoch` in `zone`.
pub fn local_date<Tz: TimeZone>(epoch: Epoch, zone: &Tz) -> Result<NaiveDate, SearchError> {
    Ok(epoch.to_datetime()?.with_timezone(zone).date_naive())
}
