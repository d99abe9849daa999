//! Quarter search against published NASA lunar phase times.
//!
//! Uses the analytic source, so no kernel files are needed.

use chrono::{NaiveDate, Utc};
use selene_search::*;
use selene_sky::AnalyticEphemeris;
use selene_time::Epoch;

fn report_epoch() -> Epoch {
    Epoch::from_utc_calendar(2020, 3, 7, 20, 0, 0.0).unwrap()
}

fn minutes_between(epoch: Epoch, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> f64 {
    let expected = Epoch::from_utc_calendar(y, mo, d, h, mi, 0.0).unwrap();
    (epoch - expected).abs() / 60.0
}

/// NASA: Full Moon 2020-Mar-09 17:48 UTC
#[test]
fn full_moon_march_2020() {
    let event = next_full_moon(&AnalyticEphemeris, report_epoch())
        .unwrap()
        .expect("should find full moon");
    assert_eq!(event.quarter, LunarQuarter::Full);
    let off = minutes_between(event.epoch, 2020, 3, 9, 17, 48);
    assert!(off < 20.0, "off by {off:.1} min");
}

/// NASA: New Moon 2020-Feb-23 15:32 UTC
#[test]
fn previous_new_moon() {
    let event = prev_new_moon(&AnalyticEphemeris, report_epoch())
        .unwrap()
        .expect("should find new moon");
    let off = minutes_between(event.epoch, 2020, 2, 23, 15, 32);
    assert!(off < 20.0, "off by {off:.1} min");
}

/// NASA: Last Quarter 2020-Mar-16 09:34 UTC, First Quarter 2020-Mar-02 19:57 UTC
#[test]
fn quarters_either_side() {
    let lq = next_quarter(&AnalyticEphemeris, LunarQuarter::LastQuarter, report_epoch())
        .unwrap()
        .unwrap();
    assert!(minutes_between(lq.epoch, 2020, 3, 16, 9, 34) < 20.0);

    let fq = prev_quarter(&AnalyticEphemeris, LunarQuarter::FirstQuarter, report_epoch())
        .unwrap()
        .unwrap();
    assert!(minutes_between(fq.epoch, 2020, 3, 2, 19, 57) < 20.0);
}

#[test]
fn previous_is_strictly_before_and_next_not_before() {
    let from = report_epoch();
    for q in LunarQuarter::ALL {
        let next = next_quarter(&AnalyticEphemeris, q, from).unwrap().unwrap();
        let prev = prev_quarter(&AnalyticEphemeris, q, from).unwrap().unwrap();
        assert!(next.epoch >= from, "{q:?}");
        assert!(prev.epoch < from, "{q:?}");
        let gap_days = (next.epoch - prev.epoch) / 86_400.0;
        assert!((29.2..29.9).contains(&gap_days), "{q:?}: {gap_days}");
    }
}

#[test]
fn elongation_at_full_moon_is_half_turn() {
    let event = next_full_moon(&AnalyticEphemeris, report_epoch()).unwrap().unwrap();
    let e = elongation_deg(&AnalyticEphemeris, event.epoch).unwrap();
    assert!((e - 180.0).abs() < 1e-3, "elongation = {e}");
}

#[test]
fn anchors_and_phase_for_report_evening() {
    let anchors = QuarterAnchors::around(&AnalyticEphemeris, report_epoch(), &Utc).unwrap();
    let ymd = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
    assert_eq!(anchors.next_full, ymd(2020, 3, 9));
    assert_eq!(anchors.prev_full, ymd(2020, 2, 9));
    assert_eq!(anchors.next_new, ymd(2020, 3, 24));
    assert_eq!(anchors.prev_new, ymd(2020, 2, 23));
    assert_eq!(anchors.next_first_quarter, ymd(2020, 4, 1));
    assert_eq!(anchors.prev_first_quarter, ymd(2020, 3, 2));
    assert_eq!(anchors.next_last_quarter, ymd(2020, 3, 16));
    assert_eq!(anchors.prev_last_quarter, ymd(2020, 2, 15));

    let phase = classify_phase(ymd(2020, 3, 7), &anchors);
    assert_eq!(phase, Some(MoonPhaseName::WaxingGibbous));
}
