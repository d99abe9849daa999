//! NAIF SPK (Spacecraft and Planet Kernel) reader.
//!
//! Loads a binary SPK such as JPL's `de421.bsp` into memory and evaluates
//! Chebyshev segments (SPK Types 2 and 3) for a `(target, center)` pair at
//! an epoch given in TDB seconds past J2000.0.
//!
//! Reference: NAIF "SPK Required Reading" (public domain).

pub mod chebyshev;
pub mod daf;

use std::path::Path;

use thiserror::Error;

pub use chebyshev::{chebyshev_value, chebyshev_value_and_rate};
pub use daf::{DafHeader, Endian};

/// Errors from loading or evaluating an SPK kernel.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KernelError {
    #[error("cannot read kernel: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed kernel: {0}")]
    Format(String),
    #[error("SPK data type {data_type} (target {target}) is not supported")]
    UnsupportedType { target: i32, data_type: i32 },
    #[error("no segment for target {target} relative to center {center}")]
    SegmentNotFound { target: i32, center: i32 },
    #[error("epoch {epoch_tdb_s} s TDB outside coverage of target {target} / center {center}")]
    EpochOutOfRange {
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    },
}

/// Layout trailer of a Chebyshev (Type 2/3) segment.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ChebyshevLayout {
    /// Start epoch of the first record, TDB seconds.
    init: f64,
    /// Length of each record's interval in seconds.
    interval: f64,
    /// Words per record.
    record_words: usize,
    /// Number of records.
    count: usize,
}

/// Descriptor of one SPK segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SpkSegment {
    pub target: i32,
    pub center: i32,
    /// NAIF frame code; 1 is J2000.
    pub frame: i32,
    pub data_type: i32,
    /// Coverage start, TDB seconds past J2000.
    pub start_epoch: f64,
    /// Coverage end, TDB seconds past J2000.
    pub end_epoch: f64,
    /// First data word (0-based index into the word array).
    start_word: usize,
    layout: Option<ChebyshevLayout>,
}

impl SpkSegment {
    pub fn covers(&self, epoch_tdb_s: f64) -> bool {
        (self.start_epoch..=self.end_epoch).contains(&epoch_tdb_s)
    }
}

/// Position (km) and velocity (km/s) of a target relative to its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpkEvaluation {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// A loaded SPK kernel.
pub struct SpkKernel {
    header: DafHeader,
    words: Vec<f64>,
    segments: Vec<SpkSegment>,
}

impl std::fmt::Debug for SpkKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpkKernel")
            .field("internal_name", &self.header.internal_name)
            .field("segments", &self.segments.len())
            .finish()
    }
}

impl SpkKernel {
    /// Read and parse an SPK file.
    pub fn load(path: &Path) -> Result<Self, KernelError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parse an SPK held in memory.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KernelError> {
        let header = daf::parse_header(bytes)?;
        if header.nd != 2 || header.ni != 6 {
            return Err(KernelError::Format(format!(
                "SPK summaries need ND=2 NI=6, found ND={} NI={}",
                header.nd, header.ni
            )));
        }

        let words = daf::decode_words(bytes, header.endian);
        let summaries = daf::read_summaries(bytes, &header)?;

        let mut segments = Vec::with_capacity(summaries.len());
        for s in summaries {
            let [target, center, frame, data_type, begin, end] = [
                s.ints[0], s.ints[1], s.ints[2], s.ints[3], s.ints[4], s.ints[5],
            ];
            if begin < 1 || end < begin || end as usize > words.len() {
                return Err(KernelError::Format(format!(
                    "segment for target {target} has bad address range {begin}..{end}"
                )));
            }
            let start_word = begin as usize - 1;
            let end_word = end as usize - 1;
            let layout = match data_type {
                2 | 3 => Some(read_layout(&words, start_word, end_word, data_type)?),
                _ => None,
            };
            segments.push(SpkSegment {
                target,
                center,
                frame,
                data_type,
                start_epoch: s.doubles[0],
                end_epoch: s.doubles[1],
                start_word,
                layout,
            });
        }

        Ok(Self {
            header,
            words,
            segments,
        })
    }

    pub fn header(&self) -> &DafHeader {
        &self.header
    }

    pub fn segments(&self) -> &[SpkSegment] {
        &self.segments
    }

    /// Center body of the first segment for `target`, if any.
    pub fn center_for(&self, target: i32) -> Option<i32> {
        self.segments
            .iter()
            .find(|s| s.target == target)
            .map(|s| s.center)
    }

    /// Evaluate `target` relative to `center` at `epoch_tdb_s`.
    ///
    /// Later segments take precedence over earlier ones, as in the NAIF
    /// toolkit.
    pub fn evaluate(
        &self,
        target: i32,
        center: i32,
        epoch_tdb_s: f64,
    ) -> Result<SpkEvaluation, KernelError> {
        let mut seen = false;
        for seg in self.segments.iter().rev() {
            if seg.target != target || seg.center != center {
                continue;
            }
            seen = true;
            if !seg.covers(epoch_tdb_s) {
                continue;
            }
            let layout = seg.layout.ok_or(KernelError::UnsupportedType {
                target,
                data_type: seg.data_type,
            })?;
            return Ok(self.evaluate_chebyshev(seg, layout, epoch_tdb_s));
        }

        if seen {
            Err(KernelError::EpochOutOfRange {
                target,
                center,
                epoch_tdb_s,
            })
        } else {
            Err(KernelError::SegmentNotFound { target, center })
        }
    }

    /// Sum the segment chain from `body` down to the solar system
    /// barycenter (code 0). Returns `[x, y, z, vx, vy, vz]`.
    pub fn resolve_to_ssb(&self, body: i32, epoch_tdb_s: f64) -> Result<[f64; 6], KernelError> {
        let mut state = [0.0; 6];
        let mut code = body;
        while code != 0 {
            let center = match self.center_for(code) {
                Some(c) => c,
                None => {
                    let bary = planet_body_to_barycenter(code);
                    if bary == code {
                        return Err(KernelError::SegmentNotFound {
                            target: code,
                            center: -1,
                        });
                    }
                    code = bary;
                    continue;
                }
            };
            let eval = self.evaluate(code, center, epoch_tdb_s)?;
            for i in 0..3 {
                state[i] += eval.position_km[i];
                state[i + 3] += eval.velocity_km_s[i];
            }
            code = center;
        }
        Ok(state)
    }

    fn evaluate_chebyshev(
        &self,
        seg: &SpkSegment,
        layout: ChebyshevLayout,
        epoch_tdb_s: f64,
    ) -> SpkEvaluation {
        let raw = ((epoch_tdb_s - layout.init) / layout.interval).floor();
        let index = (raw.max(0.0) as usize).min(layout.count - 1);
        let record = &self.words[seg.start_word + index * layout.record_words..]
            [..layout.record_words];

        let mid = record[0];
        let radius = record[1];
        let s = (epoch_tdb_s - mid) / radius;
        let components = if seg.data_type == 3 { 6 } else { 3 };
        let n = (layout.record_words - 2) / components;
        let coeffs = |axis: usize| &record[2 + axis * n..2 + (axis + 1) * n];

        let mut out = SpkEvaluation {
            position_km: [0.0; 3],
            velocity_km_s: [0.0; 3],
        };
        for axis in 0..3 {
            let (p, dp) = chebyshev_value_and_rate(coeffs(axis), s);
            out.position_km[axis] = p;
            out.velocity_km_s[axis] = if components == 6 {
                chebyshev_value(coeffs(axis + 3), s)
            } else {
                dp / radius
            };
        }
        out
    }
}

/// Read the four-word trailer `INIT, INTLEN, RSIZE, N` of a Type 2/3 segment.
fn read_layout(
    words: &[f64],
    start_word: usize,
    end_word: usize,
    data_type: i32,
) -> Result<ChebyshevLayout, KernelError> {
    if end_word < start_word + 3 {
        return Err(KernelError::Format("Chebyshev segment too short".into()));
    }
    let init = words[end_word - 3];
    let interval = words[end_word - 2];
    let record_words = words[end_word - 1] as usize;
    let count = words[end_word] as usize;

    let components = if data_type == 3 { 6 } else { 3 };
    let valid = interval > 0.0
        && count > 0
        && record_words > 2
        && (record_words - 2) % components == 0
        && start_word + count * record_words <= end_word - 3;
    if !valid {
        return Err(KernelError::Format(format!(
            "inconsistent Type {data_type} trailer: INTLEN={interval} RSIZE={record_words} N={count}"
        )));
    }

    Ok(ChebyshevLayout {
        init,
        interval,
        record_words,
        count,
    })
}

/// Map a planet body code (`x99`) to its system barycenter (`x`).
///
/// Used when a kernel carries only barycenters for the outer systems.
pub fn planet_body_to_barycenter(code: i32) -> i32 {
    if (199..=999).contains(&code) && code % 100 == 99 {
        code / 100
    } else {
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycenter_mapping() {
        assert_eq!(planet_body_to_barycenter(499), 4);
        assert_eq!(planet_body_to_barycenter(599), 5);
        assert_eq!(planet_body_to_barycenter(301), 301);
        assert_eq!(planet_body_to_barycenter(10), 10);
    }

    #[test]
    fn rejects_non_spk_summary_shape() {
        let mut rec = vec![0u8; daf::RECORD_BYTES * 2];
        rec[0..8].copy_from_slice(b"DAF/PCK ");
        rec[8..12].copy_from_slice(&2i32.to_le_bytes());
        rec[12..16].copy_from_slice(&5i32.to_le_bytes());
        rec[76..80].copy_from_slice(&2i32.to_le_bytes());
        rec[88..96].copy_from_slice(b"LTL-IEEE");
        assert!(matches!(
            SpkKernel::from_bytes(&rec),
            Err(KernelError::Format(_))
        ));
    }
}
