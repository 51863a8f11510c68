//! Primer binding site search on both strands
//!
//! Matches are reported by start offset and may overlap: after a hit at `k`
//! the scan resumes at `k + 1`, not at the end of the hit.

use log::debug;

use super::iupac::mask_accepts;
use super::sequence::{to_pattern, Pattern, Sequence};

/// Exact matcher for one compiled pattern.
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Pattern,
}

impl Matcher {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn from_sequence(seq: &Sequence) -> Self {
        Self::new(to_pattern(seq))
    }

    /// Check whether the pattern matches `haystack` starting exactly at `offset`.
    #[inline]
    pub fn matches_at(&self, haystack: &[u8], offset: usize) -> bool {
        let masks = self.pattern.masks();
        if masks.is_empty() || offset + masks.len() > haystack.len() {
            return false;
        }
        masks
            .iter()
            .zip(&haystack[offset..])
            .all(|(&m, &b)| mask_accepts(m, b))
    }

    /// Find the first match starting at or after `start`.
    pub fn find_at(&self, haystack: &[u8], start: usize) -> Option<usize> {
        let len = self.pattern.len();
        if len == 0 || len > haystack.len() {
            return None;
        }
        (start..=haystack.len() - len).find(|&k| self.matches_at(haystack, k))
    }

    /// Iterate over all match offsets, overlapping matches included.
    pub fn find_overlapping<'h>(&'h self, haystack: &'h [u8]) -> OverlappingMatches<'h> {
        OverlappingMatches {
            matcher: self,
            haystack,
            next: 0,
        }
    }
}

/// Iterator returned by [`Matcher::find_overlapping`].
#[derive(Debug)]
pub struct OverlappingMatches<'h> {
    matcher: &'h Matcher,
    haystack: &'h [u8],
    next: usize,
}

impl Iterator for OverlappingMatches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.haystack.len() {
            return None;
        }
        let found = self.matcher.find_at(self.haystack, self.next)?;
        self.next = found + 1;
        Some(found)
    }
}

/// Locate a motif and its reverse complement in a sequence.
///
/// Returns `(forward_positions, reverse_positions)`: start offsets where the
/// motif itself matches, and where its reverse complement matches. Both are
/// ascending. An empty motif or sequence yields two empty lists. A
/// palindromic motif reports the same offsets in both lists.
pub fn search_primer(motif: &Sequence, sequence: &Sequence) -> (Vec<usize>, Vec<usize>) {
    if motif.is_empty() || sequence.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let forward = Matcher::from_sequence(motif);
    let reverse = Matcher::from_sequence(&motif.reverse_complement());
    let haystack = sequence.as_bytes();

    let forward_positions: Vec<usize> = forward.find_overlapping(haystack).collect();
    let reverse_positions: Vec<usize> = reverse.find_overlapping(haystack).collect();

    debug!(
        "motif {}: {} forward / {} reverse hits in {} bp",
        motif,
        forward_positions.len(),
        reverse_positions.len(),
        haystack.len()
    );

    (forward_positions, reverse_positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    fn count_matches(motif: &str, target: &str) -> usize {
        let matcher = Matcher::from_sequence(&seq(motif));
        let target = seq(target);
        matcher.find_overlapping(target.as_bytes()).count()
    }

    #[test]
    fn test_find_overlapping_counts() {
        assert_eq!(count_matches("atgc", "atgcatgc"), 2);
        assert_eq!(count_matches("atgc", "ccgc"), 0);
        assert_eq!(count_matches("atgc", ""), 0);
        assert_eq!(count_matches("atgc", &"atgc".repeat(100)), 100);
    }

    #[test]
    fn test_find_overlapping_resumes_after_start() {
        let matcher = Matcher::from_sequence(&seq("aa"));
        let hits: Vec<usize> = matcher.find_overlapping(b"aaaa").collect();
        assert_eq!(hits, vec![0, 1, 2]);
    }

    #[test]
    fn test_find_at() {
        let matcher = Matcher::from_sequence(&seq("cg"));
        assert_eq!(matcher.find_at(b"acgacg", 0), Some(1));
        assert_eq!(matcher.find_at(b"acgacg", 2), Some(4));
        assert_eq!(matcher.find_at(b"acgacg", 5), None);
        assert_eq!(matcher.find_at(b"c", 0), None);
    }

    #[test]
    fn test_ambiguous_primer_matches_bases() {
        assert_eq!(count_matches("anc", "aacagcatc"), 3);
        // A template n is not a guaranteed base, so a concrete primer skips it
        assert_eq!(count_matches("aac", "anc"), 0);
    }

    #[test]
    fn test_search_empty_inputs() {
        assert_eq!(search_primer(&seq(""), &seq("")), (vec![], vec![]));
        assert_eq!(search_primer(&seq(""), &seq("atgc")), (vec![], vec![]));
        assert_eq!(search_primer(&seq("atgccgga"), &seq("")), (vec![], vec![]));
    }

    #[test]
    fn test_search_overlapping() {
        assert_eq!(search_primer(&seq("aa"), &seq("aaaa")), (vec![0, 1, 2], vec![]));
    }

    #[test]
    fn test_search_self() {
        assert_eq!(
            search_primer(&seq("aaaatgc"), &seq("aaaatgc")),
            (vec![0], vec![])
        );
    }

    #[test]
    fn test_search_periodic_forward() {
        let target = seq(&"aatgcc".repeat(3));
        assert_eq!(
            search_primer(&seq("aatgcc"), &target),
            (vec![0, 6, 12], vec![])
        );
    }

    #[test]
    fn test_search_periodic_reverse() {
        let target = seq(&"aatgcc".repeat(3)).reverse_complement();
        assert_eq!(
            search_primer(&seq("aatgcc"), &target),
            (vec![], vec![0, 6, 12])
        );
    }

    #[test]
    fn test_search_palindrome_reports_both() {
        assert_eq!(
            search_primer(&seq("gaattc"), &seq("ttgaattcaa")),
            (vec![2], vec![2])
        );
    }

    #[test]
    fn test_motif_longer_than_sequence() {
        assert_eq!(search_primer(&seq("acgtacgt"), &seq("acg")), (vec![], vec![]));
    }
}
