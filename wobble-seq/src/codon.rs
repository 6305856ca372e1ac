//! Codons, amino symbols and the 64-entry amino table.
//!
//! Primitive codons are looked up directly in a fixed array. Codons holding
//! degenerate symbols are resolved by expanding every position to its
//! primitive set and requiring all combinations to agree.

use std::fmt;

use wobble_core::{Result, WobbleError};

use crate::alphabet::{self, IupacDna};
use crate::usage::UsageTable;

// ---------------------------------------------------------------------------
// Base encoding: A=0, C=1, G=2, T/U=3
// ---------------------------------------------------------------------------

fn base_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' | b'U' => Some(3),
        _ => None,
    }
}

/// Convert a 3-base primitive codon to an index in [0, 64).
pub(crate) fn codon_index(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let b1 = base_index(codon[0])?;
    let b2 = base_index(codon[1])?;
    let b3 = base_index(codon[2])?;
    Some(b1 * 16 + b2 * 4 + b3)
}

/// Convert an index in [0, 64) back to a codon.
pub(crate) fn index_to_codon(idx: usize) -> [u8; 3] {
    const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];
    [BASES[idx >> 4], BASES[(idx >> 2) & 3], BASES[idx & 3]]
}

// ---------------------------------------------------------------------------
// Amino symbols
// ---------------------------------------------------------------------------

/// The three stop codons of the standard code, kept apart on purpose:
/// two different stops never encode the "same amino".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stop {
    /// TAA
    Ochre,
    /// TAG
    Amber,
    /// TGA
    Opal,
}

impl Stop {
    pub fn name(self) -> &'static str {
        match self {
            Stop::Ochre => "Ochre",
            Stop::Amber => "Amber",
            Stop::Opal => "Opal",
        }
    }
}

/// What a codon encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Amino {
    /// One of the 20 standard amino acids, by one-letter code.
    Residue(u8),
    /// A stop signal.
    Stop(Stop),
    /// Ambiguous or gapped codon that cannot be resolved.
    Unknown,
}

impl Amino {
    /// The printed form of [`Amino::Unknown`].
    pub const UNKNOWN_SYMBOL: &'static str = "?";

    const RESIDUES: &'static [u8] = b"ACDEFGHIKLMNPQRSTVWY";

    /// Parse an amino symbol: a one-letter residue code or a stop name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim() {
            "Ochre" | "ochre" => Ok(Amino::Stop(Stop::Ochre)),
            "Amber" | "amber" => Ok(Amino::Stop(Stop::Amber)),
            "Opal" | "opal" => Ok(Amino::Stop(Stop::Opal)),
            t if t.len() == 1 => {
                let b = t.as_bytes()[0].to_ascii_uppercase();
                if Self::RESIDUES.contains(&b) {
                    Ok(Amino::Residue(b))
                } else {
                    Err(WobbleError::Parse(format!("unknown amino symbol '{}'", t)))
                }
            }
            t => Err(WobbleError::Parse(format!("unknown amino symbol '{}'", t))),
        }
    }

    pub fn is_stop(self) -> bool {
        matches!(self, Amino::Stop(_))
    }

    pub fn is_unknown(self) -> bool {
        self == Amino::Unknown
    }
}

impl fmt::Display for Amino {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amino::Residue(b) => write!(f, "{}", *b as char),
            Amino::Stop(stop) => f.write_str(stop.name()),
            Amino::Unknown => f.write_str(Self::UNKNOWN_SYMBOL),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Amino {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Amino table
// ---------------------------------------------------------------------------

// Codon order: AAA, AAC, AAG, AAT, ACA, ACC, ACG, ACT, AGA, AGC, AGG, AGT,
//              ATA, ATC, ATG, ATT, CAA, CAC, CAG, CAT, CCA, CCC, CCG, CCT,
//              CGA, CGC, CGG, CGT, CTA, CTC, CTG, CTT, GAA, GAC, GAG, GAT,
//              GCA, GCC, GCG, GCT, GGA, GGC, GGG, GGT, GTA, GTC, GTG, GTT,
//              TAA, TAC, TAG, TAT, TCA, TCC, TCG, TCT, TGA, TGC, TGG, TGT,
//              TTA, TTC, TTG, TTT

/// Standard genetic code (NCBI Table 1), stops marked `*`.
const TABLE1_AA: [u8; 64] = [
    b'K', b'N', b'K', b'N', b'T', b'T', b'T', b'T', b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I', b'Q', b'H', b'Q', b'H', b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R', b'L', b'L', b'L', b'L', b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A', b'G', b'G', b'G', b'G', b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y', b'S', b'S', b'S', b'S', b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

const STANDARD: [Amino; 64] = {
    let mut t = [Amino::Unknown; 64];
    let mut i = 0;
    while i < 64 {
        t[i] = match TABLE1_AA[i] {
            b'*' => match i {
                48 => Amino::Stop(Stop::Ochre),
                50 => Amino::Stop(Stop::Amber),
                _ => Amino::Stop(Stop::Opal),
            },
            aa => Amino::Residue(aa),
        };
        i += 1;
    }
    t
};

/// Mapping from the 64 primitive codons to the amino each encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AminoTable {
    table: [Amino; 64],
}

impl AminoTable {
    /// The standard genetic code, with distinct Ochre/Amber/Opal stops.
    pub fn standard() -> Self {
        Self { table: STANDARD }
    }

    /// Build a table from `(codon, amino)` pairs.
    ///
    /// Every one of the 64 primitive codons must be present exactly once.
    pub fn from_entries<'a, I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Amino)>,
    {
        let mut slots: [Option<Amino>; 64] = [None; 64];
        for (codon, amino) in entries {
            let idx = codon_index(codon.as_bytes()).ok_or_else(|| {
                WobbleError::Parse(format!("'{}' is not a primitive codon", codon))
            })?;
            if amino.is_unknown() {
                return Err(WobbleError::Parse(format!("codon {} maps to no amino", codon)));
            }
            if slots[idx].replace(amino).is_some() {
                return Err(WobbleError::Parse(format!("codon {} listed twice", codon)));
            }
        }
        let mut table = [Amino::Unknown; 64];
        for (idx, slot) in slots.iter().enumerate() {
            table[idx] = slot.ok_or_else(|| {
                let missing = index_to_codon(idx);
                WobbleError::Parse(format!(
                    "amino table is missing codon {}",
                    String::from_utf8_lossy(&missing)
                ))
            })?;
        }
        Ok(Self { table })
    }

    /// Resolve a codon, expanding degenerate positions.
    ///
    /// Returns [`Amino::Unknown`] when any expansion contains a gap or when
    /// expansions disagree.
    pub fn resolve(&self, codon: &Codon) -> Amino {
        let [b1, b2, b3] = codon.0;
        if let Some(idx) = codon_index(&codon.0) {
            return self.table[idx];
        }
        let mut resolved: Option<Amino> = None;
        for &p1 in alphabet::primitive_set(b1) {
            for &p2 in alphabet::primitive_set(b2) {
                for &p3 in alphabet::primitive_set(b3) {
                    let aa = match codon_index(&[p1, p2, p3]) {
                        Some(idx) => self.table[idx],
                        None => return Amino::Unknown,
                    };
                    match resolved {
                        Some(prev) if prev != aa => return Amino::Unknown,
                        _ => resolved = Some(aa),
                    }
                }
            }
        }
        resolved.unwrap_or(Amino::Unknown)
    }

    /// Iterate over `(codon, amino)` for all 64 primitive codons.
    pub fn entries(&self) -> impl Iterator<Item = ([u8; 3], Amino)> + '_ {
        (0..64).map(move |i| (index_to_codon(i), self.table[i]))
    }
}

impl Default for AminoTable {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Codon
// ---------------------------------------------------------------------------

/// Three base symbols, uppercase, IUPAC plus gap.
///
/// Equality is symbol-for-symbol; use [`Codon::encodes_same_amino`] for
/// translation equivalence.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codon([u8; 3]);

impl Codon {
    /// Create a codon from exactly three IUPAC symbols (case-insensitive).
    pub fn new(bases: impl AsRef<[u8]>) -> Result<Self> {
        let bases = bases.as_ref();
        if bases.len() != 3 {
            return Err(WobbleError::InvalidLength(format!(
                "codon must have 3 bases, got {}",
                bases.len()
            )));
        }
        let data = alphabet::normalize::<IupacDna>(bases)?;
        Ok(Self([data[0], data[1], data[2]]))
    }

    /// Wrap three already-normalized bytes.
    pub(crate) fn from_validated(bases: &[u8]) -> Self {
        Self([bases[0], bases[1], bases[2]])
    }

    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// Whether every position is a single primitive base (no gaps).
    pub fn is_primitive(&self) -> bool {
        codon_index(&self.0).is_some()
    }

    /// The amino this codon encodes under `table`.
    pub fn amino(&self, table: &AminoTable) -> Amino {
        table.resolve(self)
    }

    /// Usage frequency, or 0 when the codon has no defined usage.
    pub fn usage(&self, usage: &UsageTable) -> f64 {
        self.usage_rate(usage).unwrap_or(0.0)
    }

    /// Usage frequency for primitive codons; `None` for degenerate or gapped ones.
    pub fn usage_rate(&self, usage: &UsageTable) -> Option<f64> {
        codon_index(&self.0).map(|idx| usage.at(idx))
    }

    /// Whether two codons encode the same amino.
    ///
    /// When this codon resolves to [`Amino::Unknown`] only an identical codon
    /// matches: the gap symbol is never a wildcard.
    pub fn encodes_same_amino(&self, other: &Codon, table: &AminoTable) -> bool {
        match self.amino(table) {
            Amino::Unknown => self == other,
            amino => amino == other.amino(table),
        }
    }
}

impl fmt::Debug for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codon(\"{}\")", self)
    }
}

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
