//! Property tests for the moon-phase classifier over synthetic lunations.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use selene_search::{MoonPhaseName, QuarterAnchors, classify_phase};

/// Mean quarter spacing, days.
const QUARTER_DAYS: f64 = 29.530_588 / 4.0;

/// Quarter `k` (0 = new, 1 = first, 2 = full, 3 = last, repeating) as a day
/// offset from the base new moon.
fn quarter_day(k: i64) -> i64 {
    (k as f64 * QUARTER_DAYS).round() as i64
}

fn date(base: NaiveDate, offset: i64) -> NaiveDate {
    if offset >= 0 {
        base.checked_add_days(Days::new(offset as u64)).unwrap()
    } else {
        base.checked_sub_days(Days::new((-offset) as u64)).unwrap()
    }
}

/// Anchors for observation day `day`: "next" is on or after it, "prev"
/// strictly before.
fn anchors(base: NaiveDate, day: i64) -> QuarterAnchors {
    let mut next = [None; 4];
    let mut prev = [None; 4];
    for k in -8..16 {
        let d = quarter_day(k);
        let slot = k.rem_euclid(4) as usize;
        if d >= day && next[slot].is_none() {
            next[slot] = Some(d);
        }
        if d < day {
            prev[slot] = Some(d);
        }
    }
    let at = |o: Option<i64>| date(base, o.unwrap());
    QuarterAnchors {
        prev_new: at(prev[0]),
        next_new: at(next[0]),
        prev_first_quarter: at(prev[1]),
        next_first_quarter: at(next[1]),
        prev_full: at(prev[2]),
        next_full: at(next[2]),
        prev_last_quarter: at(prev[3]),
        next_last_quarter: at(next[3]),
    }
}

/// Expected name from the day's position in the cycle.
fn expected(day: i64) -> MoonPhaseName {
    let q: Vec<i64> = (0..5).map(quarter_day).collect();
    match day {
        d if d == q[0] || d == q[4] => MoonPhaseName::New,
        d if d == q[1] => MoonPhaseName::FirstQuarter,
        d if d == q[2] => MoonPhaseName::Full,
        d if d == q[3] => MoonPhaseName::LastQuarter,
        d if d < q[1] => MoonPhaseName::WaxingCrescent,
        d if d < q[2] => MoonPhaseName::WaxingGibbous,
        d if d < q[3] => MoonPhaseName::WaningGibbous,
        _ => MoonPhaseName::WaningCrescent,
    }
}

fn base_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..40_000).prop_map(|n| {
        NaiveDate::from_ymd_opt(1950, 1, 1)
            .and_then(|d| d.checked_add_days(Days::new(n)))
            .unwrap()
    })
}

proptest! {
    #[test]
    fn every_day_of_a_lunation_gets_its_name(base in base_date(), day in 0i64..=29) {
        let a = anchors(base, day);
        prop_assert_eq!(classify_phase(date(base, day), &a), Some(expected(day)));
    }

    #[test]
    fn anchor_days_always_take_the_exact_name(base in base_date(), k in 0i64..4) {
        let day = quarter_day(k);
        let a = anchors(base, day);
        let name = classify_phase(date(base, day), &a).unwrap();
        let exact = [
            MoonPhaseName::New,
            MoonPhaseName::FirstQuarter,
            MoonPhaseName::Full,
            MoonPhaseName::LastQuarter,
        ];
        prop_assert_eq!(name, exact[k as usize]);
    }
}
