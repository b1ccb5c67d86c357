use anyhow::{anyhow, Result};
use clap::{ArgGroup, Parser};
use sirna_core::{align, derive_candidates, CandidateParams, EntrezClient};

#[derive(Parser)]
#[command(name = "sirna")]
#[command(about = "siRNA candidate design against a target gene")]
#[command(version)]
#[command(group(
    ArgGroup::new("target")
        .required(true)
        .args(["accession_number", "gene_sequence"])
))]
struct Cli {
    /// Gene accession number in the NCBI nucleotide DB
    #[arg(short = 'a', long)]
    accession_number: Option<String>,

    /// DNA sequence of the target gene
    #[arg(short = 's', long)]
    gene_sequence: Option<String>,

    /// Contact email forwarded to the NCBI E-utilities; NCBI will
    /// attempt to reach this address before blocking excessive usage
    #[arg(short = 'e', long)]
    entrez_email: Option<String>,

    /// Output file prefix path
    #[arg(short = 'o', long, default_value = "")]
    output_prefix: String,

    /// Candidate siRNA sequence to align against the gene (repeatable);
    /// when absent, candidates are derived as sliding windows
    #[arg(short = 'c', long = "candidate")]
    candidates: Vec<String>,

    /// Window length for derived candidates
    #[arg(short = 'l', long, default_value_t = 21)]
    length: usize,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let gene = resolve_gene(&cli)?;
    log::info!("Target gene resolved: {} nt", gene.len());

    if !cli.output_prefix.is_empty() {
        let gene_path = format!("{}gene.txt", cli.output_prefix);
        std::fs::write(&gene_path, format!("{}\n", gene))?;
        log::info!("Wrote {}", gene_path);
    }

    let candidates = resolve_candidates(&cli, &gene);
    if candidates.is_empty() {
        return Err(anyhow!(
            "No candidates to align: gene is shorter than the window length ({})",
            cli.length
        ));
    }
    log::info!("Aligning {} candidate(s) against the gene", candidates.len());

    let mut reports = String::new();
    for (label, sequence) in &candidates {
        let alignment = align(sequence, &gene)?;
        log::debug!("{}: {} mismatch(es)", label, alignment.mismatches);
        reports.push_str(&format!("# {}\n{}\n\n", label, alignment));
    }

    if cli.output_prefix.is_empty() {
        print!("{}", reports);
    } else {
        let report_path = format!("{}alignments.txt", cli.output_prefix);
        std::fs::write(&report_path, &reports)?;
        log::info!("Wrote {}", report_path);
    }

    Ok(())
}

/// Obtain the target gene, either directly or via Entrez.
fn resolve_gene(cli: &Cli) -> Result<String> {
    let gene = match (&cli.accession_number, &cli.gene_sequence) {
        (Some(accession), _) => {
            let client = EntrezClient::new(cli.entrez_email.clone())?;
            client.fetch_coding_sequence(accession)?
        }
        (None, Some(sequence)) => normalize(sequence),
        // clap's ArgGroup guarantees one of the two is present
        (None, None) => unreachable!(),
    };

    if gene.is_empty() {
        return Err(anyhow!("Target gene sequence is empty"));
    }
    Ok(gene)
}

/// Explicit candidates when given, sliding windows otherwise.
fn resolve_candidates(cli: &Cli, gene: &str) -> Vec<(String, String)> {
    if !cli.candidates.is_empty() {
        cli.candidates
            .iter()
            .enumerate()
            .map(|(i, seq)| (format!("candidate {}", i + 1), normalize(seq)))
            .collect()
    } else {
        let params = CandidateParams { length: cli.length };
        derive_candidates(gene, &params)
            .into_iter()
            .map(|c| (format!("window at offset {}", c.offset), c.sequence))
            .collect()
    }
}

fn normalize(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
