//! Error types for PCR simulation

use thiserror::Error;

/// Errors that can occur while building sequences or simulating PCR.
#[derive(Debug, Error)]
pub enum PcrError {
    /// A symbol outside the IUPAC nucleotide alphabet.
    #[error("Invalid nucleotide '{symbol}' at position {position}")]
    InvalidSymbol { symbol: char, position: usize },

    /// Product coordinates that break `start <= start_inner <= end_inner <= end`.
    /// Always an enumeration bug, never bad input.
    #[error("Invalid product geometry: start={start} start_inner={start_inner} end_inner={end_inner} end={end} (template length {template_len})")]
    InvalidGeometry {
        start: usize,
        start_inner: usize,
        end_inner: usize,
        end: usize,
        template_len: usize,
    },

    /// Error parsing FASTA input.
    #[error("FASTA parse error: {0}")]
    FastaParse(String),

    /// IO error during file reading.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading or writing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The worker pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
