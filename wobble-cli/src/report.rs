//! Text and JSON rendering of a cut search.

use std::io::{self, Write};

use serde::Serialize;
use wobble_core::Annotated;
use wobble_seq::{AlignedSequence, CodonTables, EditReport, RestrictionEnzyme, SequenceReplacementEdit};

/// Ranked cuts for one enzyme.
#[derive(Debug, Serialize)]
pub struct EnzymeCuts {
    pub name: String,
    pub site: String,
    pub cuts: Vec<EditReport>,
}

impl EnzymeCuts {
    pub fn new(
        enzyme: &RestrictionEnzyme,
        edits: &[SequenceReplacementEdit],
        tables: &CodonTables,
    ) -> Self {
        Self {
            name: enzyme.name().to_string(),
            site: enzyme.recognition_site().to_string(),
            cuts: edits.iter().map(|e| e.report(tables)).collect(),
        }
    }
}

/// Everything printed for one target sequence.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub sequence: &'a AlignedSequence,
    pub amino_chain: String,
    #[serde(skip)]
    amino_groups: String,
    pub usage_table: String,
    pub enzymes: Vec<EnzymeCuts>,
}

impl<'a> Report<'a> {
    pub fn new(target: &'a AlignedSequence, tables: &CodonTables, enzymes: Vec<EnzymeCuts>) -> Self {
        Self {
            sequence: target,
            amino_chain: target.amino_string(tables.amino()),
            amino_groups: target.grouped_amino_string(tables.amino()),
            usage_table: tables.usage().source().to_string(),
            enzymes,
        }
    }

    /// Human-readable report; enzymes without cuts are left out.
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Original base sequence:\n{}", self.sequence)?;
        writeln!(out)?;
        writeln!(out, "Original amino chain:\n\t{}", self.amino_groups)?;
        writeln!(out)?;
        writeln!(out, "Checking sequence for potential cuts (leaving aminos unchanged)...")?;
        writeln!(out, "(usage table: {})", self.usage_table)?;
        writeln!(out)?;
        for enzyme in self.enzymes.iter().filter(|e| !e.cuts.is_empty()) {
            writeln!(out, "possible cuts for {}:", enzyme.name)?;
            for cut in &enzyme.cuts {
                writeln!(out, "  {}", cut)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}
