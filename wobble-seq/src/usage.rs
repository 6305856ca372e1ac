//! Codon usage frequency tables.
//!
//! Frequencies are non-negative and nominally sum to about 100 (percent of
//! all codons in a reference genome). Codons missing from a loaded table
//! count as 0.

use wobble_core::{Result, WobbleError};

use crate::codon::{codon_index, index_to_codon};

/// Homo sapiens codon usage (percent), in the same codon order as the amino table.
const HUMAN: [f64; 64] = [
    2.44, 1.91, 3.19, 1.70, 1.51, 1.89, 0.61, 1.31, 1.22, 1.95, 1.20, 1.21,
    0.75, 2.08, 2.20, 1.60, 1.23, 1.51, 3.42, 1.09, 1.69, 1.98, 0.69, 1.75,
    0.62, 1.04, 1.14, 0.45, 0.72, 1.96, 3.96, 1.32, 2.90, 2.51, 3.96, 2.18,
    1.58, 2.77, 0.74, 1.84, 1.65, 2.22, 1.65, 1.08, 0.71, 1.45, 2.81, 1.10,
    0.10, 1.53, 0.08, 1.22, 1.22, 1.77, 0.44, 1.52, 0.16, 1.26, 1.32, 1.06,
    0.77, 2.03, 1.29, 1.76,
];

/// Usage frequency for each of the 64 primitive codons.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageTable {
    source: String,
    rates: [f64; 64],
}

impl UsageTable {
    /// The built-in human table.
    pub fn human() -> Self {
        Self {
            source: "human".to_string(),
            rates: HUMAN,
        }
    }

    /// Build a table from `(codon, frequency)` pairs.
    ///
    /// Codons must be primitive and listed at most once; frequencies must be
    /// finite and non-negative. Unlisted codons get 0.
    pub fn from_entries<'a, I>(source: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut rates = [0.0f64; 64];
        let mut seen = [false; 64];
        for (codon, rate) in entries {
            let idx = codon_index(codon.as_bytes()).ok_or_else(|| {
                WobbleError::Parse(format!("'{}' is not a primitive codon", codon))
            })?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(WobbleError::Parse(format!(
                    "usage for {} must be a non-negative number, got {}",
                    codon, rate
                )));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(WobbleError::Parse(format!("codon {} listed twice", codon)));
            }
            rates[idx] = rate;
        }
        Ok(Self {
            source: source.into(),
            rates,
        })
    }

    /// Where the table came from (e.g. "human" or a file stem).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn at(&self, idx: usize) -> f64 {
        self.rates[idx]
    }

    /// Frequency of a primitive codon; `None` for anything else.
    pub fn rate(&self, codon: &[u8]) -> Option<f64> {
        codon_index(codon).map(|idx| self.rates[idx])
    }

    /// Sum over all 64 codons.
    pub fn total(&self) -> f64 {
        self.rates.iter().sum()
    }

    /// Iterate over `(codon, frequency)` for all 64 primitive codons.
    pub fn entries(&self) -> impl Iterator<Item = ([u8; 3], f64)> + '_ {
        (0..64).map(move |i| (index_to_codon(i), self.rates[i]))
    }
}

impl Default for UsageTable {
    fn default() -> Self {
        Self::human()
    }
}
