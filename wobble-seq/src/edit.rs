//! Base-substitution edits on aligned sequences.
//!
//! A [`SequenceReplacementEdit`] overwrites a run of primitive bases onto a
//! copy of an aligned sequence. Its reported span is widened to whole codons
//! so that base and amino counts always describe complete codons.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Sum;
use std::ops::{Add, Range};
use std::sync::Arc;

use wobble_core::{BaseSeq, Result, WobbleError};

use crate::aligned::AlignedSequence;
use crate::alphabet::{self, Alphabet, PrimitiveDna};
use crate::codon::{AminoTable, Codon};
use crate::config::CodonTables;
use crate::seq::Sequence;

// ---------------------------------------------------------------------------
// Usage shift
// ---------------------------------------------------------------------------

/// Total absolute change in codon usage caused by an edit.
///
/// `Unbounded` marks edits whose cost cannot be measured (an amino changed,
/// or a gapped/degenerate codon was rewritten). It orders after every finite
/// shift, so such edits always rank last.
#[derive(Debug, Clone, Copy)]
pub enum UsageShift {
    Finite(f64),
    Unbounded,
}

impl UsageShift {
    pub const ZERO: UsageShift = UsageShift::Finite(0.0);

    /// The finite value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            UsageShift::Finite(v) => Some(v),
            UsageShift::Unbounded => None,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, UsageShift::Unbounded)
    }
}

impl Add for UsageShift {
    type Output = UsageShift;

    fn add(self, rhs: UsageShift) -> UsageShift {
        match (self, rhs) {
            (UsageShift::Finite(a), UsageShift::Finite(b)) => UsageShift::Finite(a + b),
            _ => UsageShift::Unbounded,
        }
    }
}

impl Sum for UsageShift {
    fn sum<I: Iterator<Item = UsageShift>>(iter: I) -> Self {
        iter.fold(UsageShift::ZERO, Add::add)
    }
}

impl Ord for UsageShift {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (UsageShift::Finite(a), UsageShift::Finite(b)) => a.total_cmp(b),
            (UsageShift::Finite(_), UsageShift::Unbounded) => Ordering::Less,
            (UsageShift::Unbounded, UsageShift::Finite(_)) => Ordering::Greater,
            (UsageShift::Unbounded, UsageShift::Unbounded) => Ordering::Equal,
        }
    }
}

impl PartialOrd for UsageShift {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for UsageShift {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for UsageShift {}

impl fmt::Display for UsageShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageShift::Finite(v) => write!(f, "{:.2}", v),
            UsageShift::Unbounded => f.write_str("inf"),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UsageShift {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            UsageShift::Finite(v) => serializer.serialize_f64(*v),
            UsageShift::Unbounded => serializer.serialize_str("inf"),
        }
    }
}

// ---------------------------------------------------------------------------
// SequenceReplacementEdit
// ---------------------------------------------------------------------------

/// A before/after pair of aligned sequences differing only inside one span.
///
/// Edits made against the same target share one copy of it.
#[derive(Clone)]
pub struct SequenceReplacementEdit {
    original: Arc<AlignedSequence>,
    edited: AlignedSequence,
    replacement: Sequence,
    offset: usize,
    span_start: usize,
    span_end: usize,
}

impl SequenceReplacementEdit {
    /// Overwrite `replacement` onto a copy of `target`, starting at base `offset`.
    ///
    /// The replacement must hold primitive bases only and fit inside the target.
    pub fn new(target: &AlignedSequence, replacement: &Sequence, offset: usize) -> Result<Self> {
        if let Some(pos) = replacement.iter().position(|&b| !alphabet::is_primitive(b)) {
            return Err(WobbleError::invalid_symbol(replacement[pos], pos, PrimitiveDna::NAME));
        }
        offset
            .checked_add(replacement.len())
            .filter(|&end| end <= target.len())
            .ok_or(WobbleError::EditOutOfBounds {
                offset,
                len: replacement.len(),
                target_len: target.len(),
            })?;
        Ok(Self::from_parts(&Arc::new(target.clone()), replacement, offset))
    }

    /// Build an edit from a replacement already known to be primitive and
    /// to fit inside `target` at `offset`.
    pub(crate) fn from_parts(
        target: &Arc<AlignedSequence>,
        replacement: &Sequence,
        offset: usize,
    ) -> Self {
        let end = offset + replacement.len();
        let mut data = target.as_bytes().to_vec();
        data[offset..end].copy_from_slice(replacement.as_bytes());

        Self {
            original: Arc::clone(target),
            edited: AlignedSequence::from_validated(data),
            replacement: replacement.clone(),
            offset,
            span_start: offset - offset % 3,
            span_end: end.div_ceil(3) * 3,
        }
    }

    pub fn original(&self) -> &AlignedSequence {
        &self.original
    }

    pub fn edited(&self) -> &AlignedSequence {
        &self.edited
    }

    /// The bases written onto the target.
    pub fn replacement(&self) -> &Sequence {
        &self.replacement
    }

    /// Zero-based base position the replacement was written at.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Edited base range, widened to codon boundaries.
    pub fn span(&self) -> Range<usize> {
        self.span_start..self.span_end
    }

    fn codon_pairs(&self) -> impl Iterator<Item = (Codon, Codon)> + '_ {
        let skip = self.span_start / 3;
        let take = (self.span_end - self.span_start) / 3;
        self.original
            .codons()
            .zip(self.edited.codons())
            .skip(skip)
            .take(take)
    }

    /// Number of bases that differ inside the span.
    pub fn bases_modified(&self) -> usize {
        let span = self.span();
        self.original[span.clone()]
            .iter()
            .zip(&self.edited[span])
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Number of codons inside the span whose amino changed.
    pub fn aminos_modified(&self, table: &AminoTable) -> usize {
        self.codon_pairs()
            .filter(|(before, after)| !before.encodes_same_amino(after, table))
            .count()
    }

    /// Whether the edit leaves the amino chain untouched.
    pub fn is_silent(&self, table: &AminoTable) -> bool {
        self.aminos_modified(table) == 0
    }

    /// Sum of `|usage(before) - usage(after)|` over rewritten codons.
    pub fn usage_shift(&self, tables: &CodonTables) -> UsageShift {
        self.codon_pairs()
            .filter(|(before, after)| before != after)
            .map(|(before, after)| {
                if !before.encodes_same_amino(&after, tables.amino()) {
                    return UsageShift::Unbounded;
                }
                match (before.usage_rate(tables.usage()), after.usage_rate(tables.usage())) {
                    (Some(b), Some(a)) => UsageShift::Finite((b - a).abs()),
                    _ => UsageShift::Unbounded,
                }
            })
            .sum()
    }

    /// Summarize the edit for printing or serialization.
    pub fn report(&self, tables: &CodonTables) -> EditReport {
        let span = self.span();
        let before = &self.original[span.clone()];
        let after = &self.edited[span.clone()];
        let marked: String = before
            .iter()
            .zip(after)
            .map(|(&b, &a)| {
                if a == b {
                    a as char
                } else {
                    a.to_ascii_lowercase() as char
                }
            })
            .collect();
        EditReport {
            index: span.start + 1,
            offset: self.offset,
            replacement: self.replacement.to_string(),
            before: String::from_utf8_lossy(before).into_owned(),
            after: marked,
            bases_changed: self.bases_modified(),
            aminos_changed: self.aminos_modified(tables.amino()),
            usage_shift: self.usage_shift(tables),
        }
    }
}

/// Whether writing `replacement` onto `target` at `offset` keeps every amino
/// in the codon-snapped span, checked without copying the target.
///
/// `replacement` must fit inside `target` at `offset`.
pub(crate) fn overwrite_is_silent(
    target: &AlignedSequence,
    replacement: &[u8],
    offset: usize,
    table: &AminoTable,
) -> bool {
    let end = offset + replacement.len();
    let span_start = offset - offset % 3;
    let span_end = end.div_ceil(3) * 3;
    (span_start..span_end).step_by(3).all(|pos| {
        let before = &target[pos..pos + 3];
        let mut after = [0u8; 3];
        for (i, base) in after.iter_mut().enumerate() {
            *base = match (pos + i).checked_sub(offset) {
                Some(k) if k < replacement.len() => replacement[k],
                _ => before[i],
            };
        }
        Codon::from_validated(before).encodes_same_amino(&Codon::from_validated(&after), table)
    })
}

impl PartialEq for SequenceReplacementEdit {
    fn eq(&self, other: &Self) -> bool {
        self.original == other.original && self.edited == other.edited
    }
}

impl Eq for SequenceReplacementEdit {}

impl Hash for SequenceReplacementEdit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.original.hash(state);
        self.edited.hash(state);
    }
}

impl fmt::Debug for SequenceReplacementEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceReplacementEdit")
            .field("offset", &self.offset)
            .field("replacement", &self.replacement)
            .field("span", &self.span())
            .field("edited", &self.edited)
            .finish()
    }
}

/// Printable summary of one edit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EditReport {
    /// 1-based position of the first base in the codon-snapped span.
    pub index: usize,
    /// 0-based position the replacement was written at.
    pub offset: usize,
    pub replacement: String,
    /// Original bases in the span.
    pub before: String,
    /// Edited bases in the span, changed ones lower-cased.
    pub after: String,
    pub bases_changed: usize,
    pub aminos_changed: usize,
    pub usage_shift: UsageShift,
}

impl fmt::Display for EditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "edit index: {}\t{} -> {}\tbases changed: {}\tabs usage shift: {}",
            self.index, self.before, self.after, self.bases_changed, self.usage_shift
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(s: &str) -> AlignedSequence {
        AlignedSequence::new(s).unwrap()
    }

    fn seq(s: &str) -> Sequence {
        Sequence::new(s).unwrap()
    }

    fn edit(target: &str, replacement: &str, offset: usize) -> SequenceReplacementEdit {
        SequenceReplacementEdit::new(&aligned(target), &seq(replacement), offset).unwrap()
    }

    #[test]
    fn rejects_override_past_end() {
        let result = SequenceReplacementEdit::new(&aligned("AAACCCGGGTTT"), &seq("AAAA"), 9);
        assert!(matches!(
            result,
            Err(WobbleError::EditOutOfBounds {
                offset: 9,
                len: 4,
                target_len: 12
            })
        ));
        assert!(SequenceReplacementEdit::new(&aligned("AAA"), &seq("A"), usize::MAX).is_err());
    }

    #[test]
    fn accepts_override_ending_at_target_end() {
        let e = edit("AAACCCGGGTTT", "AAA", 9);
        assert_eq!(e.edited(), &aligned("AAACCCGGGAAA"));
    }

    #[test]
    fn rejects_degenerate_override() {
        let result = SequenceReplacementEdit::new(&aligned("AAACCC"), &seq("AN"), 0);
        assert!(matches!(result, Err(WobbleError::InvalidSymbol { symbol: 'N', position: 1, .. })));
    }

    #[test]
    fn equality_compares_before_and_after() {
        assert_eq!(edit("ACT", "A", 2), edit("ACT", "A", 2));
        assert_ne!(edit("ACT", "A", 2), edit("ACT", "G", 2));
        // Same result through a different offset is the same edit.
        assert_eq!(edit("AAAAAA", "AA", 0), edit("AAAAAA", "AA", 3));
    }

    #[test]
    fn span_snaps_to_codons() {
        assert_eq!(edit("AAACCCGGGTTT", "AA", 5).span(), 3..9);
        assert_eq!(edit("AAACCCGGGTTT", "AAA", 3).span(), 3..6);
        assert_eq!(edit("AAACCCGGGTTT", "A", 0).span(), 0..3);
        assert_eq!(edit("AAACCCGGGTTT", "", 4).span(), 3..6);
    }

    #[test]
    fn counts_modified_bases_and_aminos() {
        let table = AminoTable::standard();
        let e = edit("AAACCCGGGTTT", "AA", 5);
        assert_eq!(e.bases_modified(), 2);
        // CCC and CCA both code P; GGG -> AGG changes G to R
        assert_eq!(e.aminos_modified(&table), 1);
        assert!(!e.is_silent(&table));
    }

    #[test]
    fn report_line() {
        let tables = CodonTables::default();
        let e = edit("AAACCCGGGTTT", "AA", 5);
        assert_eq!(
            e.report(&tables).to_string(),
            "edit index: 4\tCCCGGG -> CCaaGG\tbases changed: 2\tabs usage shift: inf"
        );
    }

    #[test]
    fn usage_shift_of_synonymous_edits() {
        let tables = CodonTables::default();
        assert_eq!(edit("AAT", "AAT", 0).usage_shift(&tables), UsageShift::ZERO);
        let one = edit("AAT", "AAC", 0).usage_shift(&tables).value().unwrap();
        assert!((one - 0.21).abs() < 1e-9);
        let back = edit("AAC", "AAT", 0).usage_shift(&tables).value().unwrap();
        assert!((back - 0.21).abs() < 1e-9);
        let two = edit("AACAAT", "AATAAC", 0).usage_shift(&tables).value().unwrap();
        assert!((two - 0.42).abs() < 1e-9);
    }

    #[test]
    fn usage_shift_unbounded_for_gapped_codons() {
        let tables = CodonTables::default();
        // TC_ -> TCA leaves an unknown codon rewritten
        assert!(edit("TC_", "A", 2).usage_shift(&tables).is_unbounded());
        // an untouched gapped codon costs nothing
        assert_eq!(edit("AATTC_", "AAC", 0).usage_shift(&tables).value().map(|v| v > 0.0), Some(true));
    }

    #[test]
    fn usage_shift_ordering() {
        let mut shifts = vec![
            UsageShift::Unbounded,
            UsageShift::Finite(0.5),
            UsageShift::ZERO,
            UsageShift::Finite(0.1),
        ];
        shifts.sort();
        assert_eq!(
            shifts,
            vec![
                UsageShift::ZERO,
                UsageShift::Finite(0.1),
                UsageShift::Finite(0.5),
                UsageShift::Unbounded
            ]
        );
        assert!(UsageShift::Finite(f64::MAX) < UsageShift::Unbounded);
        assert_eq!(UsageShift::Finite(1.0) + UsageShift::Unbounded, UsageShift::Unbounded);
    }

    #[test]
    fn report_fields() {
        let tables = CodonTables::default();
        let report = edit("AAAGGGTTT", "GGG", 2).report(&tables);
        assert_eq!(report.index, 1);
        assert_eq!(report.offset, 2);
        assert_eq!(report.replacement, "GGG");
        assert_eq!(report.before, "AAAGGG");
        assert_eq!(report.after, "AAgGGG");
        assert_eq!(report.bases_changed, 1);
        assert_eq!(report.aminos_changed, 0);
    }

    #[test]
    fn overwrite_silence_matches_built_edit() {
        let table = AminoTable::standard();
        let cases = [
            ("AAACCCGGGTTT", "AA", 5),
            ("AAAGGGTTT", "GGG", 2),
            ("AAAGGGTTT", "GGG", 4),
            ("AGCGGCTTT", "GGG", 3),
            ("TC_", "A", 2),
            ("TC_", "", 1),
            ("AAATTT", "AT", 2),
        ];
        for (target, replacement, offset) in cases {
            let target = aligned(target);
            let built = SequenceReplacementEdit::new(&target, &seq(replacement), offset).unwrap();
            assert_eq!(
                overwrite_is_silent(&target, replacement.as_bytes(), offset, &table),
                built.is_silent(&table),
                "{:?}",
                built
            );
        }
    }

    #[test]
    fn edits_share_their_target() {
        let target = Arc::new(aligned("AAAGGGTTT"));
        let first = SequenceReplacementEdit::from_parts(&target, &seq("GGG"), 2);
        let second = SequenceReplacementEdit::from_parts(&target, &seq("GGG"), 3);
        assert!(std::ptr::eq(first.original(), second.original()));
        assert_eq!(first.edited(), &aligned("AAGGGGTTT"));
        assert_eq!(first, edit("AAAGGGTTT", "GGG", 2));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn report_serializes_unbounded_shift_as_string() {
        let tables = CodonTables::default();
        let json = serde_json::to_value(edit("AAACCCGGGTTT", "AA", 5).report(&tables)).unwrap();
        assert_eq!(json["usage_shift"], "inf");
        assert_eq!(json["index"], 4);
    }
}
