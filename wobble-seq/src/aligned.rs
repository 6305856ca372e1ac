//! Codon-aligned sequences.
//!
//! An [`AlignedSequence`] is a [`Sequence`] whose length is a multiple of 3.
//! Codons are derived on demand from the underlying bytes rather than
//! stored separately.

use std::fmt;
use std::ops::Deref;

use wobble_core::{BaseSeq, Result, Summarizable, WobbleError};

use crate::codon::{AminoTable, Codon};
use crate::seq::Sequence;

/// Codons per printed line.
const CODONS_PER_LINE: usize = 10;

/// Codons (or aminos) per printed group.
const GROUP: usize = 5;

/// A sequence made of complete codons.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlignedSequence {
    seq: Sequence,
}

impl AlignedSequence {
    /// Create an aligned sequence; the length must be a multiple of 3.
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Self::from_sequence(Sequence::new(bytes)?)
    }

    /// Promote a sequence whose length is already a multiple of 3.
    ///
    /// Use [`Sequence::align`] to pad one that is not.
    pub fn from_sequence(seq: Sequence) -> Result<Self> {
        if seq.len() % 3 != 0 {
            return Err(WobbleError::InvalidLength(format!(
                "aligned sequence length must be a multiple of 3, got {}",
                seq.len()
            )));
        }
        Ok(Self { seq })
    }

    pub(crate) fn from_validated(data: Vec<u8>) -> Self {
        debug_assert!(data.len() % 3 == 0);
        Self {
            seq: Sequence::from_validated(data),
        }
    }

    pub fn as_sequence(&self) -> &Sequence {
        &self.seq
    }

    pub fn into_sequence(self) -> Sequence {
        self.seq
    }

    pub fn codon_count(&self) -> usize {
        self.seq.len() / 3
    }

    /// The codon at index `i` (not base position).
    pub fn codon(&self, i: usize) -> Option<Codon> {
        let start = i.checked_mul(3)?;
        let end = start.checked_add(3)?;
        self.seq.get(start..end).map(Codon::from_validated)
    }

    /// Iterate over codons in reading order.
    pub fn codons(&self) -> impl ExactSizeIterator<Item = Codon> + '_ {
        self.seq.chunks_exact(3).map(Codon::from_validated)
    }

    /// Concatenation of every codon's amino symbol.
    pub fn amino_string(&self, table: &AminoTable) -> String {
        self.codons().map(|c| c.amino(table).to_string()).collect()
    }

    /// Amino string in groups of five, separated by ` : `.
    pub fn grouped_amino_string(&self, table: &AminoTable) -> String {
        let aminos: Vec<String> = self.codons().map(|c| c.amino(table).to_string()).collect();
        aminos
            .chunks(GROUP)
            .map(|group| group.concat())
            .collect::<Vec<_>>()
            .join(" : ")
    }

    /// Whether both sequences translate to the same amino chain.
    pub fn encodes_same_aminos(&self, other: &AlignedSequence, table: &AminoTable) -> bool {
        self.codon_count() == other.codon_count()
            && self
                .codons()
                .zip(other.codons())
                .all(|(left, right)| left.encodes_same_amino(&right, table))
    }
}

impl Deref for AlignedSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.seq
    }
}

impl AsRef<[u8]> for AlignedSequence {
    fn as_ref(&self) -> &[u8] {
        self.seq.as_ref()
    }
}

impl BaseSeq for AlignedSequence {
    fn as_bytes(&self) -> &[u8] {
        self.seq.as_bytes()
    }
}

impl From<AlignedSequence> for Sequence {
    fn from(aligned: AlignedSequence) -> Self {
        aligned.seq
    }
}

impl Summarizable for AlignedSequence {
    fn summary(&self) -> String {
        format!("{} codons, {}", self.codon_count(), self.seq.summary())
    }
}

impl fmt::Debug for AlignedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlignedSequence(\"{}\")", self.seq)
    }
}

/// Ten codons per line, prefixed by the 1-based index of the line's first
/// base: `1\tAAA AAA AAA AAA AAA : AAA AAA AAA AAA AAA`.
impl fmt::Display for AlignedSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codons: Vec<String> = self.codons().map(|c| c.to_string()).collect();
        for (line_no, line) in codons.chunks(CODONS_PER_LINE).enumerate() {
            if line_no > 0 {
                f.write_str("\n")?;
            }
            let halves: Vec<String> = line.chunks(GROUP).map(|half| half.join(" ")).collect();
            write!(
                f,
                "{}\t{}",
                line_no * CODONS_PER_LINE * 3 + 1,
                halves.join(" : ")
            )?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AlignedSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.seq, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(s: &str) -> AlignedSequence {
        AlignedSequence::new(s).unwrap()
    }

    #[test]
    fn validates_length() {
        assert!(matches!(AlignedSequence::new("AA"), Err(WobbleError::InvalidLength(_))));
        assert!(matches!(AlignedSequence::new("AAAA"), Err(WobbleError::InvalidLength(_))));
        assert!(AlignedSequence::new("").is_ok());
    }

    #[test]
    fn decomposes_into_codons() {
        let seq = aligned("ACTGGC");
        let codons: Vec<Codon> = seq.codons().collect();
        assert_eq!(codons, vec![Codon::new("ACT").unwrap(), Codon::new("GGC").unwrap()]);
        assert_eq!(seq.codon(1), Some(Codon::new("GGC").unwrap()));
        assert_eq!(seq.codon(2), None);
        assert_eq!(seq.codon_count(), 2);
    }

    #[test]
    fn codon_index_past_end_is_none() {
        let seq = aligned("AAA");
        assert_eq!(seq.codon(usize::MAX / 2), None);
        assert_eq!(seq.codon(usize::MAX / 3), None);
        assert_eq!(seq.codon(usize::MAX), None);
    }

    #[test]
    fn summary_counts_codons() {
        assert_eq!(aligned("ATGAAA").summary(), "2 codons, sequence (6 bp): ATGAAA");
        assert_eq!(aligned("").summary(), "0 codons, sequence (0 bp): ");
    }

    #[test]
    fn display_groups_codons() {
        let long = aligned(&"A".repeat(99));
        let expected = "1\tAAA AAA AAA AAA AAA : AAA AAA AAA AAA AAA\n\
                        31\tAAA AAA AAA AAA AAA : AAA AAA AAA AAA AAA\n\
                        61\tAAA AAA AAA AAA AAA : AAA AAA AAA AAA AAA\n\
                        91\tAAA AAA AAA";
        assert_eq!(long.to_string(), expected);
    }

    #[test]
    fn amino_strings() {
        let table = AminoTable::standard();
        let seq = aligned(&format!("{}TT_", "ACTGGC".repeat(6)));
        assert_eq!(seq.amino_string(&table), "TGTGTGTGTGTG?");
        assert_eq!(seq.grouped_amino_string(&table), "TGTGT : GTGTG : TG?");
    }

    #[test]
    fn stop_names_in_amino_string() {
        let table = AminoTable::standard();
        assert_eq!(aligned("ATGTAA").amino_string(&table), "MOchre");
    }

    #[test]
    fn encodes_same_aminos() {
        let table = AminoTable::standard();
        let seq = aligned("ACTGGCTT_");
        assert!(seq.encodes_same_aminos(&aligned("ACGGGATT_"), &table));
        assert!(!seq.encodes_same_aminos(&aligned("AAAGGGCCC"), &table));
        assert!(!seq.encodes_same_aminos(&aligned("ACTGGC"), &table));
    }

    #[test]
    fn converts_back_to_sequence() {
        let seq = aligned("ACT");
        assert_eq!(seq.as_sequence(), &Sequence::new("ACT").unwrap());
        assert_eq!(Sequence::from(seq.clone()), seq.into_sequence());
    }
}
