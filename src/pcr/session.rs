//! PCR sessions and amplicon enumeration
//!
//! A product needs one primer bound in forward orientation (left anchor) and
//! one bound in reverse orientation further downstream (right anchor). Every
//! left/right pairing of the two primers is tried, so the number of candidates
//! is O(hits_fwd × hits_rev) per rule. Repetitive templates can make this
//! quadratic.

use std::sync::Arc;

use log::{debug, info};
use once_cell::sync::OnceCell;

use super::error::PcrError;
use super::motif::search_primer;
use super::product::PcrProduct;
use super::sequence::Sequence;
use super::types::{PcrParams, Primer, PrimerPair, ProductOrder};

/// Binding sites of one primer on the template
struct PrimerHits<'a> {
    primer: &'a Primer,
    forward: Vec<usize>,
    reverse: Vec<usize>,
}

impl<'a> PrimerHits<'a> {
    fn search(primer: &'a Primer, template: &Sequence) -> Self {
        let (forward, reverse) = search_primer(&primer.sequence, template);
        Self {
            primer,
            forward,
            reverse,
        }
    }
}

/// Enumerate every amplicon the primer pair produces on the template.
///
/// Rules are applied in this order, left anchor first:
/// forward×forward, forward×reverse, reverse×forward, reverse×reverse.
/// When both primers have the same sequence only the first rule is used.
pub fn enumerate_products(
    template: &Arc<Sequence>,
    primers: &PrimerPair,
    params: &PcrParams,
) -> Result<Vec<PcrProduct>, PcrError> {
    let (fw_hits, rv_hits) = rayon::join(
        || PrimerHits::search(&primers.forward, template),
        || PrimerHits::search(&primers.reverse, template),
    );

    let rules: Vec<(&PrimerHits, &PrimerHits)> =
        if primers.forward.sequence == primers.reverse.sequence {
            vec![(&fw_hits, &fw_hits)]
        } else {
            vec![
                (&fw_hits, &fw_hits),
                (&fw_hits, &rv_hits),
                (&rv_hits, &fw_hits),
                (&rv_hits, &rv_hits),
            ]
        };

    let mut products = Vec::new();
    for (left, right) in rules {
        for &i in &left.forward {
            for &j in &right.reverse {
                // The right primer's reverse complement starts at j, so the
                // left primer must end at or before it
                if i > j || i + left.primer.len() > j {
                    continue;
                }
                let end = j + right.primer.len();
                if !params.accepts_length(end - i) {
                    continue;
                }
                products.push(PcrProduct::new(
                    Arc::clone(template),
                    i,
                    end,
                    left.primer.clone(),
                    right.primer.clone(),
                )?);
            }
        }
    }

    if params.product_order == ProductOrder::Coordinate {
        products.sort_by_key(|p| (p.start(), p.end()));
    }

    debug!(
        "{} products from {}+{} forward and {}+{} reverse hits",
        products.len(),
        fw_hits.forward.len(),
        rv_hits.forward.len(),
        fw_hits.reverse.len(),
        rv_hits.reverse.len()
    );

    Ok(products)
}

/// A template together with a primer pair.
///
/// Products are computed on first access and cached for the session's
/// lifetime; concurrent callers share one computation.
#[derive(Debug)]
pub struct PcrSession {
    name: String,
    template: Arc<Sequence>,
    primers: PrimerPair,
    params: PcrParams,
    products: OnceCell<Vec<PcrProduct>>,
}

impl PcrSession {
    pub fn new(
        name: impl Into<String>,
        template: Arc<Sequence>,
        forward: Primer,
        reverse: Primer,
    ) -> Self {
        Self::with_params(name, template, PrimerPair::new(forward, reverse), PcrParams::default())
    }

    pub fn with_params(
        name: impl Into<String>,
        template: Arc<Sequence>,
        primers: PrimerPair,
        params: PcrParams,
    ) -> Self {
        Self {
            name: name.into(),
            template,
            primers,
            params,
            products: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template(&self) -> &Arc<Sequence> {
        &self.template
    }

    pub fn primers(&self) -> &PrimerPair {
        &self.primers
    }

    pub fn forward(&self) -> &Primer {
        &self.primers.forward
    }

    pub fn reverse(&self) -> &Primer {
        &self.primers.reverse
    }

    pub fn params(&self) -> &PcrParams {
        &self.params
    }

    /// Whether the product list has been computed yet
    pub fn is_computed(&self) -> bool {
        self.products.get().is_some()
    }

    /// The session's products, computing them on first call.
    pub fn products(&self) -> Result<&[PcrProduct], PcrError> {
        self.products_with(|| {
            let products = enumerate_products(&self.template, &self.primers, &self.params)?;
            info!(
                "{}: {} products ({} / {}) on {} bp template",
                self.name,
                products.len(),
                self.primers.forward.name,
                self.primers.reverse.name,
                self.template.len()
            );
            Ok(products)
        })
    }

    /// Cached products, running `compute` only if no call has stored them yet.
    /// A failed computation leaves the cache empty.
    fn products_with<F>(&self, compute: F) -> Result<&[PcrProduct], PcrError>
    where
        F: FnOnce() -> Result<Vec<PcrProduct>, PcrError>,
    {
        self.products.get_or_try_init(compute).map(Vec::as_slice)
    }

    /// The product with the most detectable CpG sites, earliest on ties
    pub fn best_product(&self) -> Result<Option<&PcrProduct>, PcrError> {
        let products = self.products()?;
        let mut best: Option<&PcrProduct> = None;
        for product in products {
            if best.map_or(true, |b| product.detectable_cpg_count() > b.detectable_cpg_count()) {
                best = Some(product);
            }
        }
        Ok(best)
    }
}
