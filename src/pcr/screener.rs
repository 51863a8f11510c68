//! Primer pair screening
//!
//! Runs one PCR session per candidate primer pair against the same template
//! and summarizes how much methylation signal each assay can read.

use std::sync::Arc;

use log::info;
use rayon::prelude::*;

use super::error::PcrError;
use super::sequence::Sequence;
use super::session::PcrSession;
use super::types::{PairScreenResult, PcrParams, PrimerPair};

/// Simulate every primer pair against the template.
///
/// Sessions are computed in parallel on a pool sized by
/// `params.thread_count`. Results keep the order of `pairs`.
pub fn screen_primer_pairs(
    name: &str,
    template: Arc<Sequence>,
    pairs: &[PrimerPair],
    params: &PcrParams,
) -> Result<Vec<PairScreenResult>, PcrError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(params.thread_count.get_count())
        .build()?;

    let sessions: Vec<PcrSession> = pairs
        .iter()
        .enumerate()
        .map(|(idx, pair)| {
            PcrSession::with_params(
                format!("{}#{}", name, idx + 1),
                Arc::clone(&template),
                pair.clone(),
                params.clone(),
            )
        })
        .collect();

    let results = pool.install(|| {
        sessions
            .par_iter()
            .map(summarize_session)
            .collect::<Result<Vec<_>, PcrError>>()
    })?;

    info!(
        "{}: screened {} primer pairs, {} produce amplicons",
        name,
        results.len(),
        results.iter().filter(|r| r.product_count > 0).count()
    );

    Ok(results)
}

fn summarize_session(session: &PcrSession) -> Result<PairScreenResult, PcrError> {
    let products = session.products()?;
    let bisulfite = session.params().bisulfite;
    let reports: Vec<_> = products.iter().map(|p| p.report(bisulfite)).collect();
    let max_detectable_cpg = reports.iter().map(|r| r.detectable_cpg).max().unwrap_or(0);

    Ok(PairScreenResult {
        session: session.name().to_string(),
        forward_primer: session.forward().name.clone(),
        reverse_primer: session.reverse().name.clone(),
        product_count: reports.len(),
        max_detectable_cpg,
        products: reports,
    })
}
