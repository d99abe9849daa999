//! Human-readable moon phase from the quarter dates around a day.

use std::fmt;

use chrono::NaiveDate;

use crate::lunar_phase::QuarterAnchors;

/// One of the eight named phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhaseName {
    Full,
    New,
    FirstQuarter,
    LastQuarter,
    WaxingCrescent,
    WaxingGibbous,
    WaningGibbous,
    WaningCrescent,
}

impl MoonPhaseName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::New => "New",
            Self::FirstQuarter => "First quarter",
            Self::LastQuarter => "Last quarter",
            Self::WaxingCrescent => "Waxing crescent",
            Self::WaxingGibbous => "Waxing gibbous",
            Self::WaningGibbous => "Waning gibbous",
            Self::WaningCrescent => "Waning crescent",
        }
    }
}

impl fmt::Display for MoonPhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn ascending(dates: [NaiveDate; 5]) -> bool {
    dates.windows(2).all(|w| w[0] < w[1])
}

/// Name the phase on local calendar day `date`.
///
/// A day holding a quarter takes that quarter's name, checked in the order
/// Full, New, First quarter, Last quarter. Otherwise the first matching
/// cyclic ordering of the surrounding quarters decides. `None` means the
/// anchors fit no ordering.
pub fn classify_phase(date: NaiveDate, a: &QuarterAnchors) -> Option<MoonPhaseName> {
    let exact = [
        (MoonPhaseName::Full, a.next_full, a.prev_full),
        (MoonPhaseName::New, a.next_new, a.prev_new),
        (MoonPhaseName::FirstQuarter, a.next_first_quarter, a.prev_first_quarter),
        (MoonPhaseName::LastQuarter, a.next_last_quarter, a.prev_last_quarter),
    ];
    if let Some((name, _, _)) = exact
        .iter()
        .find(|(_, next, prev)| date == *next || date == *prev)
    {
        return Some(*name);
    }

    let orderings = [
        (
            MoonPhaseName::WaxingCrescent,
            [a.prev_new, a.next_first_quarter, a.next_full, a.next_last_quarter, a.next_new],
        ),
        (
            MoonPhaseName::WaxingGibbous,
            [a.prev_first_quarter, a.next_full, a.next_last_quarter, a.next_new, a.next_first_quarter],
        ),
        (
            MoonPhaseName::WaningGibbous,
            [a.prev_full, a.next_last_quarter, a.next_new, a.next_first_quarter, a.next_full],
        ),
        (
            MoonPhaseName::WaningCrescent,
            [a.prev_last_quarter, a.next_new, a.next_first_quarter, a.next_full, a.next_last_quarter],
        ),
    ];
    orderings
        .iter()
        .find(|(_, dates)| ascending(*dates))
        .map(|(name, _)| *name)
}
