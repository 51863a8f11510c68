//! Data types for PCR simulation

use serde::{Deserialize, Serialize};

use super::sequence::Sequence;

/// A named oligonucleotide primer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Primer {
    pub name: String,
    pub sequence: Sequence,
}

impl Primer {
    pub fn new(name: impl Into<String>, sequence: Sequence) -> Self {
        Self {
            name: name.into(),
            sequence,
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Forward and reverse primer of one assay. Both are searched on both strands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimerPair {
    pub forward: Primer,
    pub reverse: Primer,
}

impl PrimerPair {
    pub fn new(forward: Primer, reverse: Primer) -> Self {
        Self { forward, reverse }
    }
}

/// Order of the product list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductOrder {
    /// Sorted by `(start, end)`
    Coordinate,
    /// Combination rule first, then hit positions within each rule
    Enumeration,
}

impl Default for ProductOrder {
    fn default() -> Self {
        Self::Coordinate
    }
}

/// Thread count configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadCount {
    /// Use all available CPU cores
    Auto,
    /// Use a specific number of threads
    Fixed(usize),
}

impl Default for ThreadCount {
    fn default() -> Self {
        Self::Auto
    }
}

impl ThreadCount {
    /// Get the actual number of threads to use
    pub fn get_count(&self) -> usize {
        match self {
            Self::Auto => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            Self::Fixed(n) => (*n).max(1),
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PcrParams {
    pub product_order: ProductOrder,
    pub min_product_length: usize,
    pub max_product_length: Option<usize>,
    pub thread_count: ThreadCount,
    /// Add bisulfite-converted products to reports. `Some(true)` keeps CpG
    /// cytosines as methylated.
    pub bisulfite: Option<bool>,
}

impl Default for PcrParams {
    fn default() -> Self {
        Self {
            product_order: ProductOrder::Coordinate,
            min_product_length: 0,
            max_product_length: None,
            thread_count: ThreadCount::Auto,
            bisulfite: None,
        }
    }
}

impl PcrParams {
    /// Check a product length against the configured window
    pub fn accepts_length(&self, length: usize) -> bool {
        length >= self.min_product_length
            && self.max_product_length.map_or(true, |max| length <= max)
    }
}

/// Serializable summary of one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReport {
    pub start: usize,
    pub end: usize,
    pub start_inner: usize,
    pub end_inner: usize,
    pub length: usize,
    pub forward_primer: String,
    pub reverse_primer: String,
    pub sequence: String,
    pub cpg_sites: Vec<usize>,
    pub detectable_cpg: usize,
    /// Bisulfite-converted product, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bisulfite_sequence: Option<String>,
}

/// Result of simulating one primer pair against a template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairScreenResult {
    pub session: String,
    pub forward_primer: String,
    pub reverse_primer: String,
    pub product_count: usize,
    pub max_detectable_cpg: usize,
    pub products: Vec<ProductReport>,
}
