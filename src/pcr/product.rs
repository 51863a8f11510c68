//! PCR products and their CpG features

use std::sync::Arc;

use super::error::PcrError;
use super::sequence::{bisulfite_convert, Sequence};
use super::types::{Primer, ProductReport};

/// One amplicon: the template stretch between two primer binding sites.
///
/// Coordinates are half-open indices into the template. The primer-occupied
/// flanks are `[start, start_inner)` and `[end_inner, end)`.
#[derive(Debug, Clone)]
pub struct PcrProduct {
    template: Arc<Sequence>,
    sequence: Sequence,
    start: usize,
    start_inner: usize,
    end_inner: usize,
    end: usize,
    forward_primer: Primer,
    reverse_primer: Primer,
}

impl PcrProduct {
    /// Build a product over `template[start..end)` bound by `forward_primer`
    /// on the left and `reverse_primer` on the right.
    ///
    /// Fails with [`PcrError::InvalidGeometry`] unless
    /// `start <= start_inner <= end_inner <= end <= template.len()`.
    pub fn new(
        template: Arc<Sequence>,
        start: usize,
        end: usize,
        forward_primer: Primer,
        reverse_primer: Primer,
    ) -> Result<Self, PcrError> {
        let start_inner = start + forward_primer.len();
        let end_inner = end.checked_sub(reverse_primer.len());
        let geometry_error = || PcrError::InvalidGeometry {
            start,
            start_inner,
            end_inner: end_inner.unwrap_or(0),
            end,
            template_len: template.len(),
        };

        let end_inner = end_inner.ok_or_else(geometry_error)?;
        if start > end || start_inner > end_inner || end > template.len() {
            return Err(geometry_error());
        }

        Ok(Self {
            sequence: template.slice(start..end),
            template,
            start,
            start_inner,
            end_inner,
            end,
            forward_primer,
            reverse_primer,
        })
    }

    pub fn template(&self) -> &Arc<Sequence> {
        &self.template
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn start_inner(&self) -> usize {
        self.start_inner
    }

    pub fn end_inner(&self) -> usize {
        self.end_inner
    }

    pub fn forward_primer(&self) -> &Primer {
        &self.forward_primer
    }

    pub fn reverse_primer(&self) -> &Primer {
        &self.reverse_primer
    }

    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Bases covered by the forward primer
    pub fn head(&self) -> Sequence {
        self.template.slice(self.start..self.start_inner)
    }

    /// Amplified bases between the primers
    pub fn interior(&self) -> Sequence {
        self.template.slice(self.start_inner..self.end_inner)
    }

    /// Bases covered by the reverse primer
    pub fn tail(&self) -> Sequence {
        self.template.slice(self.end_inner..self.end)
    }

    /// Offsets within the interior where a `c` is followed by a `g`.
    ///
    /// The `c` must lie in the interior; its `g` may fall on the first base
    /// of the reverse primer flank.
    pub fn cpg_sites(&self) -> Vec<usize> {
        let bytes = self.sequence.as_bytes();
        let offset = self.start_inner - self.start;
        (offset..self.end_inner - self.start)
            .filter(|&k| bytes[k] == b'c' && bytes.get(k + 1) == Some(&b'g'))
            .map(|k| k - offset)
            .collect()
    }

    pub fn detectable_cpg_count(&self) -> usize {
        self.cpg_sites().len()
    }

    /// Product sequence after bisulfite treatment
    pub fn bisulfite(&self, methylated: bool) -> Sequence {
        bisulfite_convert(&self.sequence, methylated)
    }

    /// Summarize the product. `bisulfite` adds the converted sequence, its
    /// value telling whether CpG cytosines are treated as methylated.
    pub fn report(&self, bisulfite: Option<bool>) -> ProductReport {
        let cpg_sites = self.cpg_sites();
        ProductReport {
            start: self.start,
            end: self.end,
            start_inner: self.start_inner,
            end_inner: self.end_inner,
            length: self.length(),
            forward_primer: self.forward_primer.name.clone(),
            reverse_primer: self.reverse_primer.name.clone(),
            sequence: self.sequence.to_string(),
            detectable_cpg: cpg_sites.len(),
            cpg_sites,
            bisulfite_sequence: bisulfite
                .map(|methylated| self.bisulfite(methylated).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    fn primer(name: &str, s: &str) -> Primer {
        Primer::new(name, seq(s))
    }

    fn product(template: &str, start: usize, end: usize, fw: &str, rv: &str) -> PcrProduct {
        PcrProduct::new(
            Arc::new(seq(template)),
            start,
            end,
            primer("fw", fw),
            primer("rv", rv),
        )
        .unwrap()
    }

    #[test]
    fn test_geometry_and_slices() {
        let p = product("ggttacgtacgtccaa", 2, 14, "tt", "gg");
        assert_eq!(p.start(), 2);
        assert_eq!(p.end(), 14);
        assert_eq!(p.start_inner(), 4);
        assert_eq!(p.end_inner(), 12);
        assert_eq!(p.length(), 12);
        assert_eq!(p.sequence().to_string(), "ttacgtacgtcc");
        assert_eq!(p.head().to_string(), "tt");
        assert_eq!(p.interior().to_string(), "acgtacgt");
        assert_eq!(p.tail().to_string(), "cc");
    }

    #[test]
    fn test_cpg_sites_interior_offsets() {
        let p = product("ttacgtacgtcc", 0, 12, "tt", "gg");
        assert_eq!(p.cpg_sites(), vec![1, 5]);
        assert_eq!(p.detectable_cpg_count(), 2);
    }

    #[test]
    fn test_cpg_in_primer_flank_is_ignored() {
        // cg inside both primer flanks only
        let p = product("cgaaaacg", 0, 8, "cg", "cg");
        assert!(p.cpg_sites().is_empty());
    }

    #[test]
    fn test_cpg_reaching_into_tail() {
        let p = product("ttaacgg", 0, 7, "tt", "cc");
        assert_eq!(p.interior().to_string(), "aac");
        assert_eq!(p.cpg_sites(), vec![2]);
    }

    #[test]
    fn test_sequence_is_a_copy() {
        let template = Arc::new(seq("ttacgtcc"));
        let p = PcrProduct::new(template.clone(), 0, 8, primer("f", "tt"), primer("r", "gg"))
            .unwrap();
        assert_eq!(p.sequence().as_bytes(), template.as_bytes());
        assert!(Arc::ptr_eq(p.template(), &template));
    }

    #[test]
    fn test_primers_longer_than_product_rejected() {
        let template = Arc::new(seq("ttacgtcc"));
        let err = PcrProduct::new(template.clone(), 0, 4, primer("f", "ttac"), primer("r", "cc"));
        assert!(matches!(err, Err(PcrError::InvalidGeometry { .. })));

        let err = PcrProduct::new(template.clone(), 0, 1, primer("f", ""), primer("r", "cc"));
        assert!(matches!(err, Err(PcrError::InvalidGeometry { .. })));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let template = Arc::new(seq("ttacgtcc"));
        assert!(PcrProduct::new(template.clone(), 5, 3, primer("f", ""), primer("r", "")).is_err());
        assert!(PcrProduct::new(template, 0, 9, primer("f", "t"), primer("r", "c")).is_err());
    }

    #[test]
    fn test_bisulfite_and_report() {
        let p = product("ttacgtacgtcc", 0, 12, "tt", "gg");
        assert_eq!(p.bisulfite(true).to_string(), "ttacgtacgttt");
        assert_eq!(p.bisulfite(false).to_string(), "ttatgtatgttt");

        let report = p.report(None);
        assert_eq!(report.length, 12);
        assert_eq!(report.cpg_sites, vec![1, 5]);
        assert_eq!(report.detectable_cpg, 2);
        assert_eq!(report.forward_primer, "fw");
        assert_eq!(report.reverse_primer, "rv");
        assert_eq!(report.bisulfite_sequence, None);

        let methylated = p.report(Some(true));
        assert_eq!(methylated.bisulfite_sequence.as_deref(), Some("ttacgtacgttt"));
        let unmethylated = p.report(Some(false));
        assert_eq!(unmethylated.bisulfite_sequence.as_deref(), Some("ttatgtatgttt"));
    }
}
