//! PCR Sim - In-silico PCR Simulation
//!
//! Locates primer binding sites on both strands of a DNA template,
//! enumerates the amplicons a primer pair produces, and reports the CpG
//! sites each amplicon exposes for bisulfite methylation assays.

pub mod pcr;

pub use pcr::*;
