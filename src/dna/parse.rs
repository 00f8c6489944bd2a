//! Dna — parsing and normalization of ledger DNA values
//!
//! Input is normalized to a 16-character, zero-padded decimal string and
//! split into 8 consecutive two-digit segments. Parsing is the only place
//! in the crate that can fail; everything downstream is total.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Number of decimal digits in a normalized DNA string
pub const DNA_DIGITS: usize = 16;

/// Number of two-digit segments in a DNA value
pub const SEGMENT_COUNT: usize = DNA_DIGITS / 2;

const MAX_DNA: u64 = 9_999_999_999_999_999;

/// DNA parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DnaError {
    #[error("Invalid DNA '{0}': expected a non-negative integer of at most 16 digits")]
    InvalidDna(String),
}

/// A normalized zombie DNA value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dna {
    digits: String,
    segments: [u8; SEGMENT_COUNT],
}

impl Dna {
    /// Parse a DNA value from its textual form
    ///
    /// Accepts a non-negative decimal integer below 10^16. Leading zeros
    /// are not significant, so `"00000000000000042"` is the same as `"42"`.
    pub fn parse(input: &str) -> Result<Self, DnaError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DnaError::InvalidDna(input.to_string()));
        }
        let significant = trimmed.trim_start_matches('0');
        if significant.len() > DNA_DIGITS {
            return Err(DnaError::InvalidDna(input.to_string()));
        }

        Ok(Self::from_digits(format!("{:0>width$}", significant, width = DNA_DIGITS)))
    }

    /// Build a DNA value from its numeric form
    pub fn from_u64(value: u64) -> Result<Self, DnaError> {
        if value > MAX_DNA {
            return Err(DnaError::InvalidDna(value.to_string()));
        }
        Ok(Self::from_u64_wrapping(value))
    }

    /// DNA from an arbitrary integer, reduced modulo 10^16
    pub fn from_u64_wrapping(value: u64) -> Self {
        Self::from_digits(format!("{:0width$}", value % (MAX_DNA + 1), width = DNA_DIGITS))
    }

    /// `digits` must be exactly `DNA_DIGITS` ASCII digits
    fn from_digits(digits: String) -> Self {
        let mut segments = [0u8; SEGMENT_COUNT];
        for (slot, pair) in segments.iter_mut().zip(digits.as_bytes().chunks(2)) {
            *slot = (pair[0] - b'0') * 10 + (pair[1] - b'0');
        }
        Self { digits, segments }
    }

    /// All 8 segments, in order
    pub fn segments(&self) -> [u8; SEGMENT_COUNT] {
        self.segments
    }

    /// A single segment; `index` must be below `SEGMENT_COUNT`
    pub fn segment(&self, index: usize) -> u8 {
        self.segments[index]
    }

    /// The normalized 16-digit string
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// The numeric value of the DNA
    pub fn value(&self) -> u64 {
        self.segments
            .iter()
            .fold(0u64, |acc, &s| acc * 100 + u64::from(s))
    }

    /// Number of distinct segment values
    pub fn unique_segments(&self) -> usize {
        let mut seen = [false; 100];
        self.segments
            .iter()
            .filter(|&&s| !std::mem::replace(&mut seen[s as usize], true))
            .count()
    }

    /// SHA-256 fingerprint of the normalized DNA string
    pub fn fingerprint(&self) -> String {
        hex::encode(Self::digest(&self.digits))
    }

    /// Stable 64-bit seed derived from the fingerprint
    pub fn render_seed(&self) -> u64 {
        let digest = Self::digest(&self.digits);
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(bytes)
    }

    fn digest(data: &str) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"zombie-dna-v1");
        hasher.update(data.as_bytes());
        hasher.finalize().into()
    }
}

impl FromStr for Dna {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Dna {
    type Error = DnaError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::from_u64(value)
    }
}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl Serialize for Dna {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.digits)
    }
}

impl<'de> Deserialize<'de> for Dna {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Dna::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_length() {
        let dna = Dna::parse("1234567890123456").unwrap();
        assert_eq!(dna.segments(), [12, 34, 56, 78, 90, 12, 34, 56]);
        assert_eq!(dna.as_str(), "1234567890123456");
        assert_eq!(dna.value(), 1_234_567_890_123_456);
    }

    #[test]
    fn test_parse_pads_short_input() {
        let dna = Dna::parse("42").unwrap();
        assert_eq!(dna.as_str(), "0000000000000042");
        assert_eq!(dna.segments(), [0, 0, 0, 0, 0, 0, 0, 42]);
        assert_eq!(dna.to_string(), "0000000000000042");
    }

    #[test]
    fn test_equivalent_inputs_normalize_equal() {
        let a = Dna::parse("42").unwrap();
        let b = Dna::parse("  0042 ").unwrap();
        let c = Dna::from_u64(42).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.render_seed(), b.render_seed());
    }

    #[test]
    fn test_rejects_invalid_input() {
        for bad in ["", "   ", "-1", "12.5", "abc", "12a4", "+7", "12345678901234567"] {
            assert_eq!(
                Dna::parse(bad),
                Err(DnaError::InvalidDna(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_leading_zeros_are_not_significant() {
        let dna = Dna::parse("00000000000000042").unwrap();
        assert_eq!(dna, Dna::parse("42").unwrap());
        assert_eq!(dna.as_str(), "0000000000000042");
        assert_eq!(Dna::parse("0000000000000000000").unwrap().value(), 0);
        assert_eq!(
            Dna::parse("0009999999999999999").unwrap(),
            Dna::from_u64(MAX_DNA).unwrap()
        );
        assert!(Dna::parse("00012345678901234567").is_err());
    }

    #[test]
    fn test_from_u64_bounds() {
        assert!(Dna::from_u64(MAX_DNA).is_ok());
        assert!(Dna::from_u64(MAX_DNA + 1).is_err());
        assert!(Dna::try_from(u64::MAX).is_err());
        assert_eq!(Dna::from_u64(0).unwrap().segments(), [0; SEGMENT_COUNT]);
        assert_eq!(
            Dna::from_u64_wrapping(12_345_678_901_234_567_890).as_str(),
            "5678901234567890"
        );
    }

    #[test]
    fn test_unique_segments() {
        assert_eq!(Dna::parse("1234567890123456").unwrap().unique_segments(), 5);
        assert_eq!(Dna::parse("42").unwrap().unique_segments(), 2);
        assert_eq!(Dna::parse("0102030405060708").unwrap().unique_segments(), 8);
    }

    #[test]
    fn test_serde_uses_normalized_string() {
        let dna = Dna::parse("7").unwrap();
        let json = serde_json::to_string(&dna).unwrap();
        assert_eq!(json, "\"0000000000000007\"");
        let back: Dna = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(back, dna);
        assert!(serde_json::from_str::<Dna>("\"zombie\"").is_err());
    }

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = Dna::parse("1").unwrap().fingerprint();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(fp, Dna::parse("2").unwrap().fingerprint());
    }
}
