//! Frozen lookup tables and their flat-file loaders.
//!
//! [`CodonTables`] bundles the amino table and the usage table. It is built
//! once, never mutated, and passed by reference into everything that
//! translates or scores codons. [`TableLoader`] reads the tables (plus the
//! enzyme list) from whitespace-separated text files:
//!
//! ```text
//! # encodings            # usage            # enzymes
//! AAA K                  AAA 2.44           EcoRI  GAATTC
//! TAA Ochre              AAC 1.91           HinfI  GANTC
//! ```
//!
//! Blank lines and `#` comments are ignored. Each table may be loaded at
//! most once per loader.

use std::path::Path;
use std::sync::OnceLock;

use tracing::{info, warn};
use wobble_core::{Result, WobbleError};

use crate::codon::{Amino, AminoTable};
use crate::restriction::{common_enzymes, RestrictionEnzyme};
use crate::usage::UsageTable;

/// Usage totals further than this from 100 are reported.
const USAGE_TOTAL_TOLERANCE: f64 = 0.005 * 64.0;

static INSTALLED: OnceLock<CodonTables> = OnceLock::new();

/// The amino and usage tables, frozen together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CodonTables {
    amino: AminoTable,
    usage: UsageTable,
}

impl CodonTables {
    pub fn new(amino: AminoTable, usage: UsageTable) -> Self {
        Self { amino, usage }
    }

    pub fn amino(&self) -> &AminoTable {
        &self.amino
    }

    pub fn usage(&self) -> &UsageTable {
        &self.usage
    }

    /// Store these tables as the process-wide set.
    ///
    /// Succeeds once; every later call fails with
    /// [`WobbleError::ConfigAlreadyLoaded`].
    pub fn install(self) -> Result<&'static CodonTables> {
        let already = || WobbleError::ConfigAlreadyLoaded("codon tables");
        INSTALLED.set(self).map_err(|_| already())?;
        INSTALLED.get().ok_or_else(already)
    }

    /// The process-wide tables, if [`CodonTables::install`] has run.
    pub fn installed() -> Option<&'static CodonTables> {
        INSTALLED.get()
    }
}

/// One-shot loader for the three flat-file tables.
///
/// Tables that are never loaded fall back to the built-in defaults when the
/// loader is finished with [`TableLoader::build`].
#[derive(Debug, Default)]
pub struct TableLoader {
    amino: Option<AminoTable>,
    usage: Option<UsageTable>,
    enzymes: Option<Vec<RestrictionEnzyme>>,
}

impl TableLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an amino table (`<codon> <amino>` per line).
    pub fn parse_encodings(&mut self, text: &str) -> Result<&mut Self> {
        guard(&self.amino, "amino encodings")?;
        let entries = parse_pairs(text)?
            .into_iter()
            .map(|(codon, amino)| Amino::parse(amino).map(|a| (codon, a)))
            .collect::<Result<Vec<_>>>()?;
        self.amino = Some(AminoTable::from_entries(entries)?);
        Ok(self)
    }

    /// Parse a usage table (`<codon> <frequency>` per line).
    pub fn parse_usage(&mut self, source: &str, text: &str) -> Result<&mut Self> {
        guard(&self.usage, "usage table")?;
        let entries = parse_pairs(text)?
            .into_iter()
            .map(|(codon, rate)| {
                rate.parse::<f64>()
                    .map(|r| (codon, r))
                    .map_err(|e| WobbleError::Parse(format!("usage for {}: {}", codon, e)))
            })
            .collect::<Result<Vec<_>>>()?;
        let usage = UsageTable::from_entries(source, entries)?;
        let total = usage.total();
        if (total - 100.0).abs() > USAGE_TOTAL_TOLERANCE {
            warn!(source, total, "usage table does not sum to 100");
        }
        self.usage = Some(usage);
        Ok(self)
    }

    /// Parse an enzyme list (`<name> <recognition site>` per line).
    pub fn parse_enzymes(&mut self, text: &str) -> Result<&mut Self> {
        guard(&self.enzymes, "enzyme list")?;
        let enzymes = parse_pairs(text)?
            .into_iter()
            .map(|(name, site)| RestrictionEnzyme::new(name, site))
            .collect::<Result<Vec<_>>>()?;
        self.enzymes = Some(enzymes);
        Ok(self)
    }

    pub fn load_encodings(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let text = read(path)?;
        self.parse_encodings(&text)?;
        info!(path = %path.display(), "loaded amino encodings");
        Ok(self)
    }

    /// Load a usage table; its source name is the file stem.
    pub fn load_usage(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let text = read(path)?;
        let source = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.parse_usage(&source, &text)?;
        info!(path = %path.display(), source = %source, "loaded usage table");
        Ok(self)
    }

    pub fn load_enzymes(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let text = read(path)?;
        self.parse_enzymes(&text)?;
        info!(
            path = %path.display(),
            count = self.enzymes.as_ref().map_or(0, Vec::len),
            "loaded enzyme list"
        );
        Ok(self)
    }

    /// Freeze the loaded tables, filling the rest with defaults.
    pub fn build(self) -> (CodonTables, Vec<RestrictionEnzyme>) {
        let tables = CodonTables::new(
            self.amino.unwrap_or_default(),
            self.usage.unwrap_or_default(),
        );
        (tables, self.enzymes.unwrap_or_else(common_enzymes))
    }
}

fn guard<T>(slot: &Option<T>, what: &'static str) -> Result<()> {
    match slot {
        Some(_) => Err(WobbleError::ConfigAlreadyLoaded(what)),
        None => Ok(()),
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        WobbleError::Io(std::io::Error::new(
            e.kind(),
            format!("{}: {}", path.display(), e),
        ))
    })
}

/// Split each non-blank, non-comment line into exactly two fields.
fn parse_pairs(text: &str) -> Result<Vec<(&str, &str)>> {
    let mut pairs = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(key), Some(value), None) => pairs.push((key, value)),
            _ => {
                return Err(WobbleError::Parse(format!(
                    "line {}: expected two fields, got '{}'",
                    line_no + 1,
                    line
                )))
            }
        }
    }
    Ok(pairs)
}
