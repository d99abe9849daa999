//! DAF (Double precision Array File) container parsing.
//!
//! A DAF is a sequence of 1024-byte records. Record 1 is the file record;
//! summary records form a doubly linked list starting at `FWARD`, each
//! followed by a name record. Array data is addressed in 1-based 8-byte
//! words.
//!
//! Reference: NAIF "DAF Required Reading" (public domain).

use crate::KernelError;

/// Bytes per DAF record.
pub const RECORD_BYTES: usize = 1024;

/// Bytes per DAF word (one double).
pub const WORD_BYTES: usize = 8;

/// Byte order of the numeric data in a DAF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn read_i32(self, b: &[u8]) -> i32 {
        let raw = [b[0], b[1], b[2], b[3]];
        match self {
            Self::Little => i32::from_le_bytes(raw),
            Self::Big => i32::from_be_bytes(raw),
        }
    }

    fn read_f64(self, b: &[u8]) -> f64 {
        let raw = [b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]];
        match self {
            Self::Little => f64::from_le_bytes(raw),
            Self::Big => f64::from_be_bytes(raw),
        }
    }
}

/// Parsed DAF file record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DafHeader {
    /// File identification word, e.g. `DAF/SPK`.
    pub id_word: String,
    /// Number of double components per summary.
    pub nd: usize,
    /// Number of integer components per summary.
    pub ni: usize,
    /// Internal file name.
    pub internal_name: String,
    /// Record number of the first summary record.
    pub forward: usize,
    pub endian: Endian,
}

impl DafHeader {
    /// Summary size in words: `ND + (NI + 1) / 2`.
    pub fn summary_words(&self) -> usize {
        self.nd + self.ni.div_ceil(2)
    }
}

/// One array summary: its double and integer components.
#[derive(Debug, Clone, PartialEq)]
pub struct DafSummary {
    pub doubles: Vec<f64>,
    pub ints: Vec<i32>,
}

/// Parse the file record (record 1).
pub fn parse_header(bytes: &[u8]) -> Result<DafHeader, KernelError> {
    if bytes.len() < RECORD_BYTES {
        return Err(KernelError::Format(format!(
            "file is {} bytes, shorter than one DAF record",
            bytes.len()
        )));
    }

    let id_word = text_field(&bytes[0..8]);
    if !id_word.starts_with("DAF/") && id_word != "NAIF/DAF" {
        return Err(KernelError::Format(format!("unexpected id word {id_word:?}")));
    }

    let endian = match &bytes[88..96] {
        b"BIG-IEEE" => Endian::Big,
        b"LTL-IEEE" => Endian::Little,
        // Pre-N0050 files carry no format string; probe ND instead.
        _ => {
            if Endian::Little.read_i32(&bytes[8..12]) == 2 {
                Endian::Little
            } else {
                Endian::Big
            }
        }
    };

    let nd = endian.read_i32(&bytes[8..12]);
    let ni = endian.read_i32(&bytes[12..16]);
    let forward = endian.read_i32(&bytes[76..80]);
    if nd < 0 || ni < 2 || forward < 2 {
        return Err(KernelError::Format(format!(
            "bad file record: ND={nd} NI={ni} FWARD={forward}"
        )));
    }

    let internal_name = text_field(&bytes[16..76]);

    Ok(DafHeader {
        id_word,
        nd: nd as usize,
        ni: ni as usize,
        internal_name,
        forward: forward as usize,
        endian,
    })
}

/// Walk the summary record chain and collect every array summary.
pub fn read_summaries(bytes: &[u8], header: &DafHeader) -> Result<Vec<DafSummary>, KernelError> {
    let mut summaries = Vec::new();
    let ss = header.summary_words();
    let mut record = header.forward;
    // Guard against a corrupt chain that loops.
    let max_records = bytes.len() / RECORD_BYTES + 1;
    let mut visited = 0;

    while record != 0 {
        visited += 1;
        if visited > max_records {
            return Err(KernelError::Format("summary record chain does not terminate".into()));
        }
        let start = (record - 1) * RECORD_BYTES;
        let rec = bytes.get(start..start + RECORD_BYTES).ok_or_else(|| {
            KernelError::Format(format!("summary record {record} past end of file"))
        })?;

        let e = header.endian;
        let next = e.read_f64(&rec[0..8]) as usize;
        let count = e.read_f64(&rec[16..24]) as usize;
        if 3 + count * ss > RECORD_BYTES / WORD_BYTES {
            return Err(KernelError::Format(format!(
                "summary record {record} claims {count} summaries"
            )));
        }

        for i in 0..count {
            let base = (3 + i * ss) * WORD_BYTES;
            let doubles = (0..header.nd)
                .map(|k| e.read_f64(&rec[base + k * WORD_BYTES..]))
                .collect();
            let int_base = base + header.nd * WORD_BYTES;
            let ints = (0..header.ni)
                .map(|k| e.read_i32(&rec[int_base + k * 4..]))
                .collect();
            summaries.push(DafSummary { doubles, ints });
        }

        record = next;
    }

    Ok(summaries)
}

/// Decode the whole file as a flat word array. Index 0 is word address 1.
pub fn decode_words(bytes: &[u8], endian: Endian) -> Vec<f64> {
    bytes
        .chunks_exact(WORD_BYTES)
        .map(|w| endian.read_f64(w))
        .collect()
}

/// Character field of a DAF record, with trailing NUL and blank padding removed.
fn text_field(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_record(endian_tag: &[u8; 8], nd: i32, ni: i32, fward: i32) -> Vec<u8> {
        let mut rec = vec![0u8; RECORD_BYTES];
        rec[0..8].copy_from_slice(b"DAF/SPK ");
        rec[8..12].copy_from_slice(&nd.to_le_bytes());
        rec[12..16].copy_from_slice(&ni.to_le_bytes());
        rec[16..20].copy_from_slice(b"TEST");
        rec[76..80].copy_from_slice(&fward.to_le_bytes());
        rec[88..96].copy_from_slice(endian_tag);
        rec
    }

    #[test]
    fn header_little_endian() {
        let rec = file_record(b"LTL-IEEE", 2, 6, 2);
        let h = parse_header(&rec).unwrap();
        assert_eq!(h.id_word, "DAF/SPK");
        assert_eq!((h.nd, h.ni, h.forward), (2, 6, 2));
        assert_eq!(h.endian, Endian::Little);
        assert_eq!(h.summary_words(), 5);
        assert_eq!(h.internal_name, "TEST");
    }

    #[test]
    fn header_text_fields_drop_nul_and_blank_padding() {
        let mut rec = file_record(b"LTL-IEEE", 2, 6, 2);
        rec[0..8].copy_from_slice(b"DAF/SPK\0");
        rec[16..76].fill(0);
        rec[16..24].copy_from_slice(b"DE-0421 ");
        let h = parse_header(&rec).unwrap();
        assert_eq!(h.id_word, "DAF/SPK");
        assert_eq!(h.internal_name, "DE-0421");
    }

    #[test]
    fn header_without_format_string_probes_nd() {
        let rec = file_record(b"        ", 2, 6, 2);
        assert_eq!(parse_header(&rec).unwrap().endian, Endian::Little);
    }

    #[test]
    fn header_rejects_short_file() {
        assert!(matches!(parse_header(&[0u8; 100]), Err(KernelError::Format(_))));
    }

    #[test]
    fn header_rejects_foreign_file() {
        let mut rec = file_record(b"LTL-IEEE", 2, 6, 2);
        rec[0..8].copy_from_slice(b"GIF89a  ");
        assert!(matches!(parse_header(&rec), Err(KernelError::Format(_))));
    }

    #[test]
    fn decode_words_little_endian() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&1.5f64.to_le_bytes());
        bytes.extend_from_slice(&(-2.0f64).to_le_bytes());
        assert_eq!(decode_words(&bytes, Endian::Little), vec![1.5, -2.0]);
    }
}
