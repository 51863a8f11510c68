//! PCR Sim - In-silico PCR Simulation
//!
//! Command line front end: reads a template FASTA and either one primer pair
//! or a FASTA of primer pairs, and prints the simulated products as JSON.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};
use mimalloc::MiMalloc;

use pcr_sim::{
    pair_primers, parse_primer_fasta, parse_template_fasta, screen_primer_pairs, PcrError,
    PcrParams, PcrSession, Primer, PrimerPair,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "pcr_sim", version, about = "Simulate PCR amplification on a DNA template")]
struct Cli {
    /// Template FASTA file (exactly one record)
    #[arg(short, long)]
    template: PathBuf,

    /// Forward primer sequence
    #[arg(short, long, requires = "reverse", conflicts_with = "primers")]
    forward: Option<String>,

    /// Reverse primer sequence
    #[arg(short, long, requires = "forward")]
    reverse: Option<String>,

    /// Name of the forward primer
    #[arg(long, default_value = "forward")]
    forward_name: String,

    /// Name of the reverse primer
    #[arg(long, default_value = "reverse")]
    reverse_name: String,

    /// FASTA of primer pairs (records 1+2, 3+4, ... are forward+reverse)
    #[arg(short, long, required_unless_present = "forward")]
    primers: Option<PathBuf>,

    /// JSON file with simulation parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Include the bisulfite-converted product sequence
    #[arg(long)]
    bisulfite: bool,

    /// Treat CpG cytosines as methylated during bisulfite conversion
    #[arg(long, requires = "bisulfite")]
    methylated: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PcrError> {
    let mut params = match &cli.params {
        Some(path) => serde_json::from_str::<PcrParams>(&fs::read_to_string(path)?)?,
        None => PcrParams::default(),
    };
    if cli.bisulfite {
        params.bisulfite = Some(cli.methylated);
    }

    let template = parse_template_fasta(&fs::read_to_string(&cli.template)?)?;
    info!("Template {}: {} bp", template.name, template.sequence.len());
    let sequence = Arc::new(template.sequence);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(path) = &cli.primers {
        let pairs = pair_primers(parse_primer_fasta(&fs::read_to_string(path)?)?)?;
        let results = screen_primer_pairs(&template.name, sequence, &pairs, &params)?;
        serde_json::to_writer_pretty(&mut out, &results)?;
    } else if let (Some(forward), Some(reverse)) = (&cli.forward, &cli.reverse) {
        let pair = PrimerPair::new(
            Primer::new(cli.forward_name.clone(), forward.parse()?),
            Primer::new(cli.reverse_name.clone(), reverse.parse()?),
        );
        let session = PcrSession::with_params(template.name.clone(), sequence, pair, params);
        let bisulfite = session.params().bisulfite;
        let reports = session
            .products()?
            .iter()
            .map(|product| product.report(bisulfite))
            .collect::<Vec<_>>();
        serde_json::to_writer_pretty(&mut out, &reports)?;
    }

    writeln!(out)?;
    Ok(())
}
