//! Validated nucleotide sequence type.
//!
//! [`Sequence`] is a newtype over `Vec<u8>` holding uppercase IUPAC symbols
//! plus the gap symbol `_`. Construction uppercases, validates, and rewrites
//! `U` to `T`, so `Deref<Target=[u8]>` and `as_bytes()` are zero-cost and
//! safe to pass to downstream `&[u8]` APIs.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use wobble_core::{BaseSeq, Result, Summarizable};

use crate::aligned::AlignedSequence;
use crate::alphabet::{self, Alphabet, IupacDna, GAP};

/// An immutable string of base symbols, of any length.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence {
    data: Vec<u8>,
}

impl Sequence {
    /// Create a sequence from IUPAC symbols (case-insensitive, gaps allowed).
    pub fn new(bytes: impl AsRef<[u8]>) -> Result<Self> {
        Self::with_alphabet::<IupacDna>(bytes)
    }

    /// Create a sequence, validating against a stricter alphabet.
    pub fn with_alphabet<A: Alphabet>(bytes: impl AsRef<[u8]>) -> Result<Self> {
        let data = alphabet::normalize::<A>(bytes.as_ref())?;
        Ok(Self { data })
    }

    /// Create a sequence from pre-validated bytes, skipping validation.
    ///
    /// Caller must guarantee all bytes are normalized members of [`IupacDna`].
    pub(crate) fn from_validated(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Right-pad with gaps to the next multiple of 3.
    ///
    /// Never left-pads: the reading frame starts at the first base.
    pub fn align(&self) -> AlignedSequence {
        let mut data = self.data.clone();
        let padded = data.len().div_ceil(3) * 3;
        data.resize(padded, GAP);
        AlignedSequence::from_validated(data)
    }

    /// Return the reverse complement (opposite strand, read 5'->3').
    pub fn reverse_complement(&self) -> Sequence {
        let rc: Vec<u8> = self.data.iter().rev().map(|&b| alphabet::complement(b)).collect();
        Sequence::from_validated(rc)
    }

    /// Whether any symbol is a degenerate IUPAC code.
    pub fn is_degenerate(&self) -> bool {
        self.data.iter().any(|&b| !alphabet::is_primitive(b))
    }

    /// Number of concrete sequences this pattern stands for (saturating).
    pub fn primitive_expansion_count(&self) -> usize {
        self.data
            .iter()
            .map(|&b| alphabet::primitive_set(b).len())
            .fold(1usize, usize::saturating_mul)
    }

    /// Every concrete sequence matched by this pattern.
    ///
    /// Materializes the full Cartesian product of each position's primitive
    /// set, up to 4^n sequences for n degenerate positions. Order is
    /// lexicographic in A < C < G < T.
    pub fn primitive_expansions(&self) -> Vec<Sequence> {
        let mut expansions: Vec<Vec<u8>> = vec![Vec::with_capacity(self.data.len())];
        for &b in &self.data {
            let set = alphabet::primitive_set(b);
            if let [single] = set {
                for prefix in &mut expansions {
                    prefix.push(*single);
                }
                continue;
            }
            expansions = expansions
                .into_iter()
                .flat_map(|prefix| {
                    set.iter().map(move |&p| {
                        let mut next = prefix.clone();
                        next.push(p);
                        next
                    })
                })
                .collect();
        }
        expansions.into_iter().map(Sequence::from_validated).collect()
    }
}

impl Deref for Sequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl AsRef<[u8]> for Sequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl BaseSeq for Sequence {
    fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl FromStr for Sequence {
    type Err = wobble_core::WobbleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Summarizable for Sequence {
    fn summary(&self) -> String {
        let preview_len = self.data.len().min(20);
        let preview = String::from_utf8_lossy(&self.data[..preview_len]);
        if self.data.len() > 20 {
            format!("sequence ({} bp): {}...", self.data.len(), preview)
        } else {
            format!("sequence ({} bp): {}", self.data.len(), preview)
        }
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sequence(\"{}\")", self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Sequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let s = std::str::from_utf8(&self.data).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Sequence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::PrimitiveDna;
    use wobble_core::WobbleError;

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    #[test]
    fn stores_uppercase() {
        assert_eq!(seq("acgt").as_bytes(), b"ACGT");
        assert_eq!(seq("AGTC"), seq("agtc"));
    }

    #[test]
    fn u_is_a_t_synonym() {
        assert_eq!(seq("ACU"), seq("ACT"));
    }

    #[test]
    fn empty_sequence_ok() {
        let s = seq("");
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
    }

    #[test]
    fn rejects_invalid_bytes() {
        assert!(matches!(Sequence::new("XYZ"), Err(WobbleError::InvalidSymbol { .. })));
        assert!(Sequence::new("AC GT").is_err());
        assert!(Sequence::new("_ACTG").is_ok());
        assert!(Sequence::new("BBB").is_ok());
    }

    #[test]
    fn stricter_alphabet() {
        assert!(Sequence::with_alphabet::<PrimitiveDna>("BBB").is_err());
        assert!(Sequence::with_alphabet::<PrimitiveDna>("AC_T").is_ok());
    }

    #[test]
    fn equality_and_len() {
        assert_eq!(seq("ACT"), seq("ACT"));
        assert_ne!(seq("ACT"), seq("CAT"));
        assert_ne!(seq("AAA"), seq("AAAA"));
        assert_eq!(seq("CATG").len(), 4);
        assert_eq!(seq("ACT").to_string(), "ACT");
    }

    #[test]
    fn align_pads_missing_bases() {
        assert_eq!(seq("ACTA").align(), AlignedSequence::new("ACTA__").unwrap());
        assert_eq!(seq("ACT").align(), AlignedSequence::new("ACT").unwrap());
        assert!(seq("").align().is_empty());
    }

    #[test]
    fn revcomp_with_gap() {
        assert_eq!(seq("ACTG_").reverse_complement(), seq("_CAGT"));
    }

    #[test]
    fn revcomp_iupac_ambiguity() {
        let rc = seq("RYSWKMBDHVN").reverse_complement();
        assert_eq!(rc.as_bytes(), b"NBDHVKMWSRY");
    }

    #[test]
    fn revcomp_palindromic() {
        assert_eq!(seq("GAATTC").reverse_complement(), seq("GAATTC"));
        assert_ne!(seq("CTTG").reverse_complement(), seq("CTTG"));
    }

    #[test]
    fn degeneracy() {
        assert!(!seq("ACGT_").is_degenerate());
        assert!(seq("ACNT").is_degenerate());
    }

    #[test]
    fn expansions_of_plain_sequence() {
        let s = seq("GATC");
        assert_eq!(s.primitive_expansions(), vec![s.clone()]);
        assert_eq!(s.primitive_expansion_count(), 1);
    }

    #[test]
    fn expansions_of_degenerate_sequence() {
        let expansions = seq("GRN").primitive_expansions();
        assert_eq!(expansions.len(), 8);
        assert_eq!(seq("GRN").primitive_expansion_count(), 8);
        assert_eq!(expansions[0], seq("GAA"));
        assert_eq!(expansions[7], seq("GGT"));
        assert!(expansions.iter().all(|e| !e.is_degenerate()));
    }

    #[test]
    fn summary_truncates() {
        assert_eq!(seq("ACGT").summary(), "sequence (4 bp): ACGT");
        let long = seq(&"A".repeat(25));
        assert!(long.summary().ends_with("..."));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn iupac_seq(max_len: usize) -> impl Strategy<Value = Sequence> {
        proptest::collection::vec(proptest::sample::select(IupacDna::VALID_BYTES.to_vec()), 0..=max_len)
            .prop_map(|v| Sequence::new(v).unwrap())
    }

    proptest! {
        #[test]
        fn reverse_complement_is_involution(s in iupac_seq(60)) {
            prop_assert_eq!(s.reverse_complement().reverse_complement(), s);
        }

        #[test]
        fn expansions_match_count(s in iupac_seq(6)) {
            let expansions = s.primitive_expansions();
            prop_assert_eq!(expansions.len(), s.primitive_expansion_count());
            for e in &expansions {
                prop_assert_eq!(e.len(), s.len());
                prop_assert!(!e.is_degenerate());
            }
        }

        #[test]
        fn align_is_multiple_of_three(s in iupac_seq(40)) {
            let aligned = s.align();
            prop_assert_eq!(aligned.len() % 3, 0);
            prop_assert!(aligned.len() - s.len() < 3);
            prop_assert_eq!(&aligned.as_bytes()[..s.len()], s.as_bytes());
        }
    }
}
