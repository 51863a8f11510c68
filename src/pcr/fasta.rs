//! FASTA text parsing for templates and primers

use super::error::PcrError;
use super::sequence::Sequence;
use super::types::{Primer, PrimerPair};

/// Parsed template sequence (single record)
#[derive(Debug, Clone)]
pub struct TemplateData {
    pub name: String,
    pub sequence: Sequence,
}

/// Parse a single-record FASTA as template.
/// Returns an error if the input holds 0 or more than 1 record.
pub fn parse_template_fasta(text: &str) -> Result<TemplateData, PcrError> {
    let mut records = parse_fasta_records(text)?;

    if records.is_empty() {
        return Err(PcrError::FastaParse(
            "No valid sequence found in template input".to_string(),
        ));
    }
    if records.len() > 1 {
        return Err(PcrError::FastaParse(format!(
            "Template must contain exactly 1 sequence, found {}",
            records.len()
        )));
    }

    let (name, sequence) = records.remove(0);
    Ok(TemplateData { name, sequence })
}

/// Parse a multi-record FASTA into primers.
pub fn parse_primer_fasta(text: &str) -> Result<Vec<Primer>, PcrError> {
    let records = parse_fasta_records(text)?;
    if records.is_empty() {
        return Err(PcrError::FastaParse(
            "No valid primers found in primer input".to_string(),
        ));
    }
    Ok(records
        .into_iter()
        .map(|(name, sequence)| Primer::new(name, sequence))
        .collect())
}

/// Group primers into pairs: records 1+2, 3+4, ... as forward + reverse.
pub fn pair_primers(primers: Vec<Primer>) -> Result<Vec<PrimerPair>, PcrError> {
    if primers.len() % 2 != 0 {
        return Err(PcrError::FastaParse(format!(
            "Primer input must hold forward/reverse pairs, found {} primers",
            primers.len()
        )));
    }
    let mut pairs = Vec::with_capacity(primers.len() / 2);
    let mut iter = primers.into_iter();
    while let (Some(forward), Some(reverse)) = (iter.next(), iter.next()) {
        pairs.push(PrimerPair::new(forward, reverse));
    }
    Ok(pairs)
}

/// Core FASTA parsing: extract `(name, sequence)` records.
/// Whitespace and digits inside sequence lines are skipped; any other
/// non-IUPAC character is an error.
fn parse_fasta_records(text: &str) -> Result<Vec<(String, Sequence)>, PcrError> {
    let mut records = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            // Save previous record if exists
            flush_record(current_name.take(), &mut current_seq, &mut records)?;
            let name = header.split_whitespace().next().unwrap_or("").to_string();
            current_name = (!name.is_empty()).then_some(name);
        } else {
            current_seq.extend(
                line.bytes()
                    .filter(|b| !b.is_ascii_whitespace() && !b.is_ascii_digit()),
            );
        }
    }

    // Don't forget the last record
    flush_record(current_name, &mut current_seq, &mut records)?;

    Ok(records)
}

fn flush_record(
    name: Option<String>,
    seq: &mut Vec<u8>,
    records: &mut Vec<(String, Sequence)>,
) -> Result<(), PcrError> {
    if seq.is_empty() {
        return Ok(());
    }
    let name = name.unwrap_or_else(|| format!("Sequence_{}", records.len() + 1));
    let sequence = Sequence::new(&seq[..])
        .map_err(|e| PcrError::FastaParse(format!("{}: {}", name, e)))?;
    records.push((name, sequence));
    seq.clear();
    Ok(())
}
