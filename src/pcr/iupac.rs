//! IUPAC nucleotide codes and bitmask utilities

use bio::alphabets::{dna, Alphabet};
use once_cell::sync::Lazy;

/// IUPAC nucleotide alphabet (both cases)
pub static IUPAC_ALPHABET: Lazy<Alphabet> = Lazy::new(dna::iupac_alphabet);

/// Check if a byte belongs to the IUPAC nucleotide alphabet
pub fn is_valid_dna(b: u8) -> bool {
    IUPAC_ALPHABET.is_word([b])
}

/// Complement a single nucleotide under the full IUPAC table.
/// Case is preserved; unknown bytes map to themselves.
#[inline]
pub fn complement(b: u8) -> u8 {
    dna::complement(b)
}

// ── Bitmask representation: bit 0 = A, bit 1 = C, bit 2 = G, bit 3 = T ──

/// Lookup table: 4-bit bitmask index -> lowercase IUPAC code byte.
/// Index 0 (no bases) maps to b'?' and should not occur with valid DNA data.
pub const IUPAC_FROM_MASK: [u8; 16] = [
    b'?', // 0b0000 - no bases (invalid)
    b'a', // 0b0001
    b'c', // 0b0010
    b'm', // 0b0011 - A|C
    b'g', // 0b0100
    b'r', // 0b0101 - A|G
    b's', // 0b0110 - C|G
    b'v', // 0b0111 - A|C|G
    b't', // 0b1000
    b'w', // 0b1001 - A|T
    b'y', // 0b1010 - C|T
    b'h', // 0b1011 - A|C|T
    b'k', // 0b1100 - G|T
    b'd', // 0b1101 - A|G|T
    b'b', // 0b1110 - C|G|T
    b'n', // 0b1111 - A|C|G|T
];

/// Convert a lowercase nucleotide byte to its bitmask. Also handles IUPAC
/// ambiguity codes. Returns 0 for unrecognized bytes, uppercase included.
#[inline]
pub fn base_to_bit(b: u8) -> u8 {
    match b {
        b'a' => 0b0001,
        b'c' => 0b0010,
        b'g' => 0b0100,
        b't' => 0b1000,
        b'r' => 0b0101,
        b'y' => 0b1010,
        b's' => 0b0110,
        b'w' => 0b1001,
        b'k' => 0b1100,
        b'm' => 0b0011,
        b'b' => 0b1110,
        b'd' => 0b1101,
        b'h' => 0b1011,
        b'v' => 0b0111,
        b'n' => 0b1111,
        _ => 0,
    }
}

/// Check whether a pattern symbol (as a bitmask) accepts a target byte.
///
/// The target's base set must be contained in the pattern's, so a pattern
/// `n` accepts every base while a template `n` only matches a pattern `n`.
/// Unrecognized target bytes never match.
#[inline]
pub fn mask_accepts(pattern_mask: u8, target: u8) -> bool {
    let target_mask = base_to_bit(target);
    target_mask != 0 && target_mask & !pattern_mask == 0
}
