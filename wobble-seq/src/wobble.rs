//! Silent ("wobble") edits that create restriction sites.
//!
//! For an enzyme, every concrete variant of its recognition site and every
//! variant's reverse complement is written at every offset of the target.
//! An edit is kept when it leaves the amino chain untouched.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;
use wobble_core::{Annotated, BaseSeq};

use crate::aligned::AlignedSequence;
use crate::config::CodonTables;
use crate::edit::{overwrite_is_silent, SequenceReplacementEdit};
use crate::restriction::RestrictionEnzyme;
use crate::seq::Sequence;

/// Finds silent edits that let an enzyme cut a coding sequence.
#[derive(Debug, Clone, Copy)]
pub struct WobbleCutDetector<'a> {
    tables: &'a CodonTables,
}

impl<'a> WobbleCutDetector<'a> {
    pub fn new(tables: &'a CodonTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'a CodonTables {
        self.tables
    }

    /// Every silent edit that writes a site for `enzyme` into `target`.
    ///
    /// Includes matches of the reverse complement and sites already present
    /// (zero-base edits). Symmetric sites are scanned once. The result is
    /// ordered by candidate site, then offset; use [`rank_edits`] to order by
    /// cost. An empty result means no cut is reachable.
    pub fn detect_cuts(
        &self,
        target: &AlignedSequence,
        enzyme: &RestrictionEnzyme,
    ) -> Vec<SequenceReplacementEdit> {
        let candidates = candidate_sites(enzyme);
        let shared = Arc::new(target.clone());
        let mut edits = Vec::new();
        for candidate in &candidates {
            self.detect_one_way(&shared, candidate, &mut edits);
        }
        debug!(
            enzyme = enzyme.name(),
            candidates = candidates.len(),
            edits = edits.len(),
            "scanned for silent cut sites"
        );
        edits
    }

    fn detect_one_way(
        &self,
        target: &Arc<AlignedSequence>,
        site: &Sequence,
        edits: &mut Vec<SequenceReplacementEdit>,
    ) {
        let Some(last) = target.len().checked_sub(site.len()) else {
            return;
        };
        for offset in 0..=last {
            if overwrite_is_silent(target, site, offset, self.tables.amino()) {
                edits.push(SequenceReplacementEdit::from_parts(target, site, offset));
            }
        }
    }
}

/// Concrete sites to scan for: each primitive variant of the recognition
/// site and its reverse complement, deduplicated.
pub fn candidate_sites(enzyme: &RestrictionEnzyme) -> BTreeSet<Sequence> {
    let mut candidates = BTreeSet::new();
    for variant in enzyme.recognition_site().primitive_expansions() {
        candidates.insert(variant.reverse_complement());
        candidates.insert(variant);
    }
    candidates
}

/// Order edits by bases changed, then by usage shift (unbounded last).
pub fn rank_edits(edits: &mut [SequenceReplacementEdit], tables: &CodonTables) {
    edits.sort_by_cached_key(|edit| (edit.bases_modified(), edit.usage_shift(tables)));
}
