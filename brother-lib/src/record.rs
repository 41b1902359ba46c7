//! Vendor binary record decoding.
//!
//! Brother printers pack several maintenance values into a single octet string
//! made of fixed-width records followed by a one-byte checksum (`0xff`). Each
//! record starts with a one-byte tag naming the sensor it reports.
//!
//! Two layouts exist:
//!
//! - **Current** (7 bytes, 14 hex digits): `TT RR RR VV VV VV VV` where the
//!   last four bytes are a big-endian value.
//! - **Legacy** (5 bytes, 10 hex digits): `TT RR RR NN DD`; the value is the
//!   ratio `NN / DD` expressed in percent. `DD` is always `0x14` on the printers
//!   seen so far, which is what the generation detector keys on.
//!
//! Percentages are rounded half to even.

use crate::constants::{LEGACY_RECORD_TERMINATOR, LEGACY_RECORD_WIDTH, RECORD_WIDTH};
use crate::error::BrotherError;
use crate::sensor::Sensor;
use std::fmt;
use tracing::trace;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Firmware generation, which decides the record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Generation {
    Current,
    Legacy,
}

impl Generation {
    /// Record width in hex digits.
    pub fn record_width(self) -> usize {
        match self {
            Generation::Current => RECORD_WIDTH,
            Generation::Legacy => LEGACY_RECORD_WIDTH,
        }
    }

    /// Classify a maintenance field (hex, checksum already stripped).
    pub fn detect(hex: &str) -> Self {
        if is_legacy(hex) {
            Generation::Legacy
        } else {
            Generation::Current
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Current => f.write_str("current"),
            Generation::Legacy => f.write_str("legacy"),
        }
    }
}

/// Hex-encode a binary field and drop the trailing checksum byte.
pub fn to_hex_without_checksum(bytes: &[u8]) -> String {
    match bytes.split_last() {
        Some((_checksum, payload)) => hex::encode(payload),
        None => String::new(),
    }
}

/// Split a hex string into records of `width` digits.
///
/// A trailing partial record is kept as is; the decoders skip it.
pub fn split_records(hex: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    hex.as_bytes()
        .chunks(width)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect()
}

/// Whether a maintenance field uses the legacy 10-digit layout.
///
/// True only when the length is a non-zero multiple of 10 and every record
/// ends with the `14` terminator.
pub fn is_legacy(hex: &str) -> bool {
    if hex.is_empty() || hex.len() % LEGACY_RECORD_WIDTH != 0 {
        return false;
    }
    hex.as_bytes()
        .chunks(LEGACY_RECORD_WIDTH)
        .all(|record| &record[LEGACY_RECORD_WIDTH - 2..] == LEGACY_RECORD_TERMINATOR.as_bytes())
}

fn lookup(tag_map: &[(u8, Sensor)], tag: u8) -> Option<Sensor> {
    tag_map
        .iter()
        .find_map(|&(known, sensor)| (known == tag).then_some(sensor))
}

fn parse_hex<T>(record: &str, digits: &str, parse: fn(&str, u32) -> Result<T, std::num::ParseIntError>) -> Result<T, BrotherError> {
    parse(digits, 16).map_err(|err| BrotherError::InvalidRecord {
        record: record.to_string(),
        reason: err.to_string(),
    })
}

fn tag_of(record: &str) -> Option<u8> {
    record.get(..2).and_then(|tag| u8::from_str_radix(tag, 16).ok())
}

/// `numerator / denominator`, rounded half to even.
fn div_round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Scale a value transmitted as percent × 100 back to whole percent.
pub fn percent_from_hundredths(raw: u32) -> u32 {
    // raw / 100 always fits in u32
    div_round_half_even(u64::from(raw), 100) as u32
}

/// Decode current-generation records.
///
/// Records with an unknown tag, or too short to hold a value, are skipped.
pub fn decode_records<S: AsRef<str>>(records: &[S], tag_map: &[(u8, Sensor)], percent: &[Sensor]) -> Vec<(Sensor, u32)> {
    let mut readings = Vec::with_capacity(records.len());
    for record in records {
        let record = record.as_ref();
        let Some(sensor) = tag_of(record).and_then(|tag| lookup(tag_map, tag)) else {
            continue;
        };
        if record.len() < 10 {
            trace!(record, "Skipping truncated record");
            continue;
        }
        let Some(digits) = record.get(record.len() - 8..) else {
            continue;
        };
        let raw = match parse_hex(record, digits, u32::from_str_radix) {
            Ok(raw) => raw,
            Err(err) => {
                trace!(%err, "Skipping unreadable record");
                continue;
            }
        };
        let value = if percent.contains(&sensor) {
            percent_from_hundredths(raw)
        } else {
            raw
        };
        readings.push((sensor, value));
    }
    readings
}

/// Decode legacy-generation records.
///
/// A zero denominator is reported as an error instead of being skipped.
pub fn decode_records_legacy<S: AsRef<str>>(
    records: &[S],
    tag_map: &[(u8, Sensor)],
) -> Result<Vec<(Sensor, u32)>, BrotherError> {
    let mut readings = Vec::with_capacity(records.len());
    for record in records {
        let record = record.as_ref();
        let Some(sensor) = tag_of(record).and_then(|tag| lookup(tag_map, tag)) else {
            continue;
        };
        if record.len() < LEGACY_RECORD_WIDTH {
            trace!(record, "Skipping truncated legacy record");
            continue;
        }
        let numerator = parse_hex(record, record.get(6..8).unwrap_or_default(), u8::from_str_radix)?;
        let denominator = parse_hex(record, record.get(8..10).unwrap_or_default(), u8::from_str_radix)?;
        if denominator == 0 {
            return Err(BrotherError::InvalidRecord {
                record: record.to_string(),
                reason: "denominator is zero".to_string(),
            });
        }
        let value = div_round_half_even(u64::from(numerator) * 100, u64::from(denominator));
        readings.push((sensor, value as u32));
    }
    Ok(readings)
}

/// Build a current-generation record for `tag` carrying `value`.
pub fn encode_record(tag: u8, value: u32) -> String {
    format!("{tag:02x}0104{value:08x}")
}
