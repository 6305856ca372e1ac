//! # Wobble CLI
//!
//! Searches a coding sequence for restriction sites that can be introduced by
//! synonymous base substitutions.
//!
//! ## Usage
//!
//! ```bash
//! # Literal sequence, built-in tables and enzymes
//! wobble ATGAAAGGCTTCGAGCTGGATCCA
//!
//! # Sequence from a FASTA-style file, custom usage table, JSON output
//! wobble --sequence-file gene.fa --usage ecoli.txt --format json
//!
//! # Restrict the search to a few enzymes
//! wobble --enzyme EcoRI --enzyme BamHI ATGAAAGGC
//! ```

mod report;

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::util::SubscriberInitExt;

use wobble_core::{Annotated, Summarizable, WobbleError};
use wobble_seq::{rank_edits, RestrictionEnzyme, Sequence, TableLoader, WobbleCutDetector};

use crate::report::{EnzymeCuts, Report};

#[derive(Parser)]
#[command(name = "wobble")]
#[command(version, about = "Find silent codon edits that create restriction sites")]
struct Cli {
    /// Literal base sequence (IUPAC, case-insensitive)
    #[arg(required_unless_present = "sequence_file", conflicts_with = "sequence_file")]
    sequence: Option<String>,

    /// Read the sequence from a file (use - for stdin); `>` header lines and
    /// whitespace are ignored
    #[arg(short = 'i', long)]
    sequence_file: Option<PathBuf>,

    /// Amino encodings file (`<codon> <amino>` per line)
    #[arg(long)]
    encodings: Option<PathBuf>,

    /// Codon usage file (`<codon> <frequency>` per line)
    #[arg(short, long)]
    usage: Option<PathBuf>,

    /// Restriction enzyme file (`<name> <site>` per line)
    #[arg(long)]
    enzymes: Option<PathBuf>,

    /// Only check the named enzyme (repeatable)
    #[arg(short, long = "enzyme", value_name = "NAME")]
    enzyme: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Log filter (e.g. warn, info, wobble_seq=debug)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level)?;

    let mut loader = TableLoader::new();
    if let Some(path) = &cli.encodings {
        loader.load_encodings(path)?;
    }
    if let Some(path) = &cli.usage {
        loader.load_usage(path)?;
    }
    if let Some(path) = &cli.enzymes {
        loader.load_enzymes(path)?;
    }
    let (tables, enzymes) = loader.build();
    let enzymes = select_enzymes(enzymes, &cli.enzyme)?;

    let raw = match (&cli.sequence, &cli.sequence_file) {
        (Some(literal), _) => literal.clone(),
        (None, Some(path)) => read_sequence_file(path)?,
        (None, None) => return Err("no sequence given".into()),
    };
    let target = Sequence::new(strip_sequence_text(&raw))?.align();
    info!(sequence = %target.summary(), enzymes = enzymes.len(), "checking sequence");

    let detector = WobbleCutDetector::new(&tables);
    let cuts: Vec<EnzymeCuts> = enzymes
        .par_iter()
        .map(|enzyme| {
            let mut edits = detector.detect_cuts(&target, enzyme);
            rank_edits(&mut edits, &tables);
            debug!(enzyme = enzyme.name(), cuts = edits.len(), "ranked cuts");
            EnzymeCuts::new(enzyme, &edits, &tables)
        })
        .collect();

    let report = Report::new(&target, &tables, cuts);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match cli.format.as_str() {
        "json" => {
            serde_json::to_writer_pretty(&mut out, &report)?;
            writeln!(out)?;
        }
        _ => report.write_text(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
    Ok(())
}

fn read_sequence_file(path: &Path) -> Result<String, WobbleError> {
    let mut text = String::new();
    if path.as_os_str() == "-" {
        io::stdin().read_to_string(&mut text)?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
    }
    Ok(text)
}

/// Drop `>` header lines and all whitespace, concatenating what remains.
fn strip_sequence_text(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('>'))
        .flat_map(|line| line.chars().filter(|c| !c.is_whitespace()))
        .collect()
}

/// Keep the enzymes named in `names` (case-insensitive), in list order.
///
/// An empty filter keeps everything; an unknown name is an error.
fn select_enzymes(
    enzymes: Vec<RestrictionEnzyme>,
    names: &[String],
) -> Result<Vec<RestrictionEnzyme>, WobbleError> {
    if names.is_empty() {
        return Ok(enzymes);
    }
    if let Some(missing) = names
        .iter()
        .find(|name| !enzymes.iter().any(|e| e.name().eq_ignore_ascii_case(name)))
    {
        return Err(WobbleError::Parse(format!("unknown enzyme '{}'", missing)));
    }
    Ok(enzymes
        .into_iter()
        .filter(|e| names.iter().any(|name| e.name().eq_ignore_ascii_case(name)))
        .collect())
}
