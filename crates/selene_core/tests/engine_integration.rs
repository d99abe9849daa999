//! Integration tests for the query engine.
//!
//! DE421 tests skip when `kernels/data/de421.bsp` is absent; the chain tests
//! run against a small in-memory kernel.

use std::path::PathBuf;

use jpl_kernel::SpkKernel;
use selene_core::*;
use selene_time::Epoch;

fn kernel_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../kernels/data/de421.bsp")
}

fn real_engine() -> Option<Engine> {
    let spk = kernel_path();
    if !spk.exists() {
        eprintln!("Skipping: kernel not found at {}", spk.display());
        return None;
    }
    Some(Engine::new(EngineConfig::with_single_spk(spk)).expect("should load engine"))
}

fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

#[test]
fn moon_geocentric_distance_2020_03_07() {
    let Some(engine) = real_engine() else {
        return;
    };
    let epoch = Epoch::from_utc_calendar(2020, 3, 7, 20, 0, 0.0).unwrap();
    let state = engine
        .query(Query {
            target: Body::Moon,
            observer: Observer::Body(Body::Earth),
            epoch,
        })
        .unwrap();
    // Perigee fell on 2020-03-10 at 357 122 km.
    let r = norm(state.position_km);
    assert!((356_000.0..372_000.0).contains(&r), "Moon at {r:.0} km");
}

#[test]
fn earth_velocity_is_orbital() {
    let Some(engine) = real_engine() else {
        return;
    };
    let state = engine
        .query(Query {
            target: Body::Earth,
            observer: Observer::SolarSystemBarycenter,
            epoch: Epoch::from_tdb_seconds(0.0),
        })
        .unwrap();
    let v = norm(state.velocity_km_s);
    assert!((29.0..31.0).contains(&v), "Earth at {v:.3} km/s");
}

#[test]
fn epoch_outside_de421_is_an_error() {
    let Some(engine) = real_engine() else {
        return;
    };
    let q = Query {
        target: Body::Moon,
        observer: Observer::Body(Body::Earth),
        epoch: Epoch::from_tdb_seconds(1.0e11),
    };
    assert!(matches!(
        engine.query(q),
        Err(EngineError::Kernel(jpl_kernel::KernelError::EpochOutOfRange { .. }))
    ));
}

// ---------------------------------------------------------------------------
// In-memory kernel: constant-position segments 3→0, 399→3, 301→3, 10→0
// ---------------------------------------------------------------------------

const RECORD: usize = 1024;
const HALF: f64 = 1.0e9;

fn put_f64(buf: &mut [u8], word: usize, v: f64) {
    buf[word * 8..word * 8 + 8].copy_from_slice(&v.to_le_bytes());
}

fn constant_kernel(segments: &[(i32, i32, [f64; 3])]) -> SpkKernel {
    // Each segment: MID, RADIUS, one coefficient per axis, then the trailer.
    let words_per_segment = 2 + 3 + 4;
    let mut bytes = vec![0u8; RECORD * 4];
    bytes[0..8].copy_from_slice(b"DAF/SPK ");
    bytes[8..12].copy_from_slice(&2i32.to_le_bytes());
    bytes[12..16].copy_from_slice(&6i32.to_le_bytes());
    bytes[76..80].copy_from_slice(&2i32.to_le_bytes());
    bytes[88..96].copy_from_slice(b"LTL-IEEE");

    put_f64(&mut bytes[RECORD..], 2, segments.len() as f64);
    for (i, &(target, center, pos)) in segments.iter().enumerate() {
        let first = 3 * RECORD / 8 + i * words_per_segment;
        let data = [0.0, HALF, pos[0], pos[1], pos[2], -HALF, 2.0 * HALF, 5.0, 1.0];
        for (k, v) in data.iter().enumerate() {
            put_f64(&mut bytes, first + k, *v);
        }

        let base = 3 + i * 5;
        put_f64(&mut bytes[RECORD..], base, -HALF);
        put_f64(&mut bytes[RECORD..], base + 1, HALF);
        let begin = (first + 1) as i32;
        let end = (first + words_per_segment) as i32;
        for (k, v) in [target, center, 1, 2, begin, end].iter().enumerate() {
            let off = RECORD + (base + 2) * 8 + k * 4;
            bytes[off..off + 4].copy_from_slice(&v.to_le_bytes());
        }
    }
    SpkKernel::from_bytes(&bytes).expect("in-memory kernel should parse")
}

fn synthetic_engine() -> Engine {
    let kernel = constant_kernel(&[
        (3, 0, [1.0e8, 0.0, 0.0]),
        (399, 3, [-4_000.0, 0.0, 0.0]),
        (301, 3, [380_000.0, 10.0, 0.0]),
        (10, 0, [-1.0e6, 0.0, 0.0]),
    ]);
    Engine::from_kernels(vec![kernel]).unwrap()
}

#[test]
fn chain_difference_moon_from_earth() {
    let engine = synthetic_engine();
    let (state, stats) = engine
        .query_with_stats(Query {
            target: Body::Moon,
            observer: Observer::Body(Body::Earth),
            epoch: Epoch::from_tdb_seconds(0.0),
        })
        .unwrap();
    assert!((state.position_km[0] - 384_000.0).abs() < 1e-6);
    assert!((state.position_km[1] - 10.0).abs() < 1e-9);
    assert_eq!(state.velocity_km_s, [0.0; 3]);
    // 301→3, 3→0, 399→3, then 3→0 from the cache.
    assert_eq!(stats.evaluations, 3);
    assert_eq!(stats.cache_hits, 1);
}

#[test]
fn sun_from_earth() {
    let engine = synthetic_engine();
    let state = engine
        .query(Query {
            target: Body::Sun,
            observer: Observer::Body(Body::Earth),
            epoch: Epoch::from_tdb_seconds(0.0),
        })
        .unwrap();
    assert!((state.position_km[0] - (-1.0e6 - 1.0e8 + 4_000.0)).abs() < 1e-6);
}

#[test]
fn identical_target_and_observer_rejected() {
    let engine = synthetic_engine();
    let q = Query {
        target: Body::Earth,
        observer: Observer::Body(Body::Earth),
        epoch: Epoch::from_tdb_seconds(0.0),
    };
    assert!(matches!(engine.query(q), Err(EngineError::UnsupportedQuery(_))));
}

#[test]
fn non_finite_epoch_rejected() {
    let engine = synthetic_engine();
    let q = Query {
        target: Body::Moon,
        observer: Observer::SolarSystemBarycenter,
        epoch: Epoch::from_tdb_seconds(f64::NAN),
    };
    assert!(matches!(engine.query(q), Err(EngineError::InvalidQuery(_))));
}

#[test]
fn missing_body_is_kernel_error() {
    let kernel = constant_kernel(&[(3, 0, [1.0, 2.0, 3.0])]);
    let engine = Engine::from_kernels(vec![kernel]).unwrap();
    let q = Query {
        target: Body::Sun,
        observer: Observer::SolarSystemBarycenter,
        epoch: Epoch::from_tdb_seconds(0.0),
    };
    assert!(matches!(engine.query(q), Err(EngineError::Kernel(_))));
}
