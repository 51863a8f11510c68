//! Nucleotide sequences and the transforms applied to them

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PcrError;
use super::iupac::{base_to_bit, complement, is_valid_dna, IUPAC_FROM_MASK};

/// An immutable nucleotide sequence.
///
/// Symbols are IUPAC nucleotide codes, stored lowercase. Every constructor
/// normalizes case so the rest of the crate can compare bytes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence(Vec<u8>);

impl Sequence {
    /// Build a sequence from text, rejecting anything outside the IUPAC
    /// nucleotide alphabet.
    pub fn new(text: impl AsRef<[u8]>) -> Result<Self, PcrError> {
        let bytes = text.as_ref();
        if let Some(position) = bytes.iter().position(|&b| !is_valid_dna(b)) {
            return Err(PcrError::InvalidSymbol {
                symbol: bytes[position] as char,
                position,
            });
        }
        Ok(Self(bytes.to_ascii_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Copy out the half-open range `[range.start, range.end)`.
    ///
    /// Panics if the range is out of bounds, like slice indexing.
    pub fn slice(&self, range: Range<usize>) -> Sequence {
        Sequence(self.0[range].to_vec())
    }

    pub fn reverse_complement(&self) -> Sequence {
        reverse_complement(self)
    }
}

impl FromStr for Sequence {
    type Err = PcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sequence::new(s)
    }
}

impl TryFrom<String> for Sequence {
    type Error = PcrError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Sequence::new(s)
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.to_string()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only ASCII IUPAC codes can be stored
        f.write_str(std::str::from_utf8(&self.0).map_err(|_| fmt::Error)?)
    }
}

/// Compute the reverse complement of a sequence.
///
/// Uses the full IUPAC complement table: `r/y`, `k/m`, `b/v` and `d/h` swap,
/// `s`, `w` and `n` complement to themselves.
pub fn reverse_complement(seq: &Sequence) -> Sequence {
    Sequence(seq.as_bytes().iter().rev().map(|&b| complement(b)).collect())
}

/// A compiled search pattern: one base-set bitmask per symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(Vec<u8>);

impl Pattern {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn masks(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &m in &self.0 {
            write!(f, "{}", IUPAC_FROM_MASK[(m & 0b1111) as usize] as char)?;
        }
        Ok(())
    }
}

/// Convert a sequence into a pattern where each ambiguity code accepts every
/// base it stands for.
pub fn to_pattern(seq: &Sequence) -> Pattern {
    Pattern(seq.as_bytes().iter().map(|&b| base_to_bit(b)).collect())
}

/// Simulate bisulfite treatment.
///
/// Every `c` becomes `t`, except a `c` directly followed by `g` when
/// `methylation_protected` is set. A trailing `c` has no following base and
/// is always converted.
pub fn bisulfite_convert(seq: &Sequence, methylation_protected: bool) -> Sequence {
    let bytes = seq.as_bytes();
    let converted = bytes
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let protected = methylation_protected && bytes.get(i + 1) == Some(&b'g');
            if b == b'c' && !protected {
                b't'
            } else {
                b
            }
        })
        .collect();
    Sequence(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    #[test]
    fn test_new_normalizes_case() {
        assert_eq!(seq("ACgT").to_string(), "acgt");
    }

    #[test]
    fn test_new_rejects_invalid_symbol() {
        match Sequence::new("acgxt") {
            Err(PcrError::InvalidSymbol { symbol, position }) => {
                assert_eq!(symbol, 'x');
                assert_eq!(position, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(Sequence::new("ac-gt").is_err());
    }

    #[test]
    fn test_empty_sequence_is_allowed() {
        let s = seq("");
        assert!(s.is_empty());
        assert_eq!(s.reverse_complement(), s);
    }

    #[test]
    fn test_slice() {
        let s = seq("aattccgg");
        assert_eq!(s.slice(2..6).to_string(), "ttcc");
        assert!(s.slice(3..3).is_empty());
    }

    #[test]
    fn test_reverse_complement() {
        assert_eq!(seq("aaac").reverse_complement().to_string(), "gttt");
        assert_eq!(seq("acgt").reverse_complement().to_string(), "acgt");
        assert_eq!(seq("acnt").reverse_complement().to_string(), "angt");
        assert_eq!(seq("arkb").reverse_complement().to_string(), "vmyt");
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        let s = seq("acgtryswkmbdhvn");
        assert_eq!(s.reverse_complement().reverse_complement(), s);
    }

    #[test]
    fn test_to_pattern() {
        let p = to_pattern(&seq("acgn"));
        assert_eq!(p.masks(), &[0b0001, 0b0010, 0b0100, 0b1111]);
        assert_eq!(p.to_string(), "acgn");
        assert!(to_pattern(&seq("")).is_empty());
    }

    #[test]
    fn test_bisulfite_full_conversion() {
        let once = bisulfite_convert(&seq("accgtcgc"), false);
        assert_eq!(once.to_string(), "attgttgt");
        assert!(!once.as_bytes().contains(&b'c'));
        assert_eq!(bisulfite_convert(&once, false), once);
    }

    #[test]
    fn test_bisulfite_protects_cpg() {
        assert_eq!(bisulfite_convert(&seq("acgc"), true).to_string(), "acgt");
        assert_eq!(bisulfite_convert(&seq("ccgg"), true).to_string(), "tcgg");
    }

    #[test]
    fn test_bisulfite_trailing_c() {
        assert_eq!(bisulfite_convert(&seq("gc"), true).to_string(), "gt");
        assert_eq!(bisulfite_convert(&seq("c"), true).to_string(), "t");
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let json = serde_json::to_string(&seq("ACGT")).unwrap();
        assert_eq!(json, "\"acgt\"");
        let back: Sequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq("acgt"));
        assert!(serde_json::from_str::<Sequence>("\"acxt\"").is_err());
    }
}
