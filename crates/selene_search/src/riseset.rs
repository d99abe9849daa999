//! Rise and set search for the Sun and Moon.
//!
//! An event is the instant the topocentric geometric altitude of the body's
//! centre crosses `h0 = −(refraction + semidiameter)`. The semidiameter is
//! taken from the body's distance at each sample, so the Moon's parallax
//! and changing size are both included.

use selene_core::Body;
use selene_sky::{EphemerisSource, Site, observe, semidiameter_deg};
use selene_time::Epoch;

use crate::error::SearchError;
use crate::lunar_phase::SearchDirection;

/// Bisection stops below this bracket width, seconds.
const CONVERGENCE_S: f64 = 1.0;

/// Rising or setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    Rise,
    Set,
}

/// Search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiseSetConfig {
    /// Refraction at the horizon, arcminutes. Default: 34.
    pub refraction_arcmin: f64,
    /// Coarse scan step, minutes. Default: 10.
    pub step_minutes: f64,
    /// Scan window, days. Default: 2.
    pub window_days: f64,
}

impl Default for RiseSetConfig {
    fn default() -> Self {
        Self {
            refraction_arcmin: 34.0,
            step_minutes: 10.0,
            window_days: 2.0,
        }
    }
}

impl RiseSetConfig {
    fn validate(&self) -> Result<(), SearchError> {
        if !(self.step_minutes.is_finite() && self.step_minutes > 0.0) {
            return Err(SearchError::InvalidConfig("step_minutes must be positive"));
        }
        if !(self.window_days.is_finite() && self.window_days >= self.step_minutes / 1440.0) {
            return Err(SearchError::InvalidConfig(
                "window_days must cover at least one step",
            ));
        }
        if !self.refraction_arcmin.is_finite() {
            return Err(SearchError::InvalidConfig("refraction_arcmin must be finite"));
        }
        Ok(())
    }
}

/// Result of a rise/set search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// Event occurs at `epoch`.
    Event { epoch: Epoch, event: RiseSetEvent },
    /// Below `h0` for the whole window, or no rise within it.
    NeverRises,
    /// Above `h0` for the whole window, or no set within it.
    NeverSets,
}

impl RiseSetResult {
    pub fn epoch(&self) -> Option<Epoch> {
        match self {
            Self::Event { epoch, .. } => Some(*epoch),
            Self::NeverRises | Self::NeverSets => None,
        }
    }
}

/// Altitude above the event horizon `h0`, degrees. Positive means up.
fn height_above_h0<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    epoch: Epoch,
    config: &RiseSetConfig,
) -> Result<f64, SearchError> {
    let obs = observe(source, body, site, epoch, None)?;
    let semidiameter = semidiameter_deg(body, obs.distance_km).unwrap_or(0.0);
    let h0 = -(config.refraction_arcmin / 60.0 + semidiameter);
    Ok(obs.geometric_altitude_deg - h0)
}

/// Search for `event` from `from` in `direction`.
///
/// Forward scans `[from, from + window]`; backward scans
/// `[from − window, from)`.
pub fn find_rise_set<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    event: RiseSetEvent,
    from: Epoch,
    direction: SearchDirection,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    config.validate()?;
    let step = config.step_minutes * 60.0;
    let max_steps = (config.window_days * 1440.0 / config.step_minutes).ceil() as usize;
    let step = match direction {
        SearchDirection::Forward => step,
        SearchDirection::Backward => -step,
    };

    let mut t_prev = from;
    let mut g_prev = height_above_h0(source, body, site, from, config)?;
    let mut ever_up = g_prev >= 0.0;
    let mut ever_down = !ever_up;

    for _ in 0..max_steps {
        let t_curr = t_prev + step;
        let g_curr = height_above_h0(source, body, site, t_curr, config)?;
        ever_up |= g_curr >= 0.0;
        ever_down |= g_curr < 0.0;

        // Order the bracket in time.
        let (t_a, g_a, t_b, g_b) = match direction {
            SearchDirection::Forward => (t_prev, g_prev, t_curr, g_curr),
            SearchDirection::Backward => (t_curr, g_curr, t_prev, g_prev),
        };
        let crossed = match event {
            RiseSetEvent::Rise => g_a < 0.0 && g_b >= 0.0,
            RiseSetEvent::Set => g_a >= 0.0 && g_b < 0.0,
        };
        if crossed {
            let epoch = bisect(source, body, site, config, t_a, g_a, t_b)?;
            tracing::trace!(?body, ?event, jd_tdb = epoch.as_jd_tdb(), "rise/set found");
            return Ok(RiseSetResult::Event { epoch, event });
        }

        t_prev = t_curr;
        g_prev = g_curr;
    }

    // Circumpolar or permanently hidden for the whole window; a partial
    // window without the wanted crossing reports by the event kind.
    Ok(match (ever_up, ever_down, event) {
        (true, false, _) => RiseSetResult::NeverSets,
        (false, true, _) => RiseSetResult::NeverRises,
        (_, _, RiseSetEvent::Rise) => RiseSetResult::NeverRises,
        (_, _, RiseSetEvent::Set) => RiseSetResult::NeverSets,
    })
}

fn bisect<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    config: &RiseSetConfig,
    mut t_a: Epoch,
    g_a: f64,
    mut t_b: Epoch,
) -> Result<Epoch, SearchError> {
    let below_at_a = g_a < 0.0;
    while t_b - t_a > CONVERGENCE_S {
        let t_mid = t_a + 0.5 * (t_b - t_a);
        let g_mid = height_above_h0(source, body, site, t_mid, config)?;
        if (g_mid < 0.0) == below_at_a {
            t_a = t_mid;
        } else {
            t_b = t_mid;
        }
    }
    Ok(t_a + 0.5 * (t_b - t_a))
}

/// Next rise of `body` after `from`.
pub fn next_rise<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    from: Epoch,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    find_rise_set(source, body, site, RiseSetEvent::Rise, from, SearchDirection::Forward, config)
}

/// Next set of `body` after `from`.
pub fn next_set<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    from: Epoch,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    find_rise_set(source, body, site, RiseSetEvent::Set, from, SearchDirection::Forward, config)
}

/// Most recent rise of `body` before `from`.
pub fn prev_rise<S: EphemerisSource + ?Sized>(
    source: &S,
    body: Body,
    site: &Site,
    from: Epoch,
    config: &RiseSetConfig,
) -> Result<RiseSetResult, SearchError> {
    find_rise_set(source, body, site, RiseSetEvent::Rise, from, SearchDirection::Backward, config)
}
