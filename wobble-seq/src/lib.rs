//! Codon-level sequence editing for the wobble cut finder.
//!
//! Finds synonymous ("wobble") base substitutions that introduce a
//! restriction-enzyme recognition site into a coding sequence without changing
//! the protein it encodes:
//!
//! - **Alphabets** — [`IupacDna`], [`PrimitiveDna`], [`RecognitionSite`]
//! - **Sequences** — [`Sequence`] and the codon-framed [`AlignedSequence`]
//! - **Codons** — [`Codon`], [`Amino`], the [`AminoTable`] and [`UsageTable`]
//! - **Edits** — [`SequenceReplacementEdit`] with its [`UsageShift`] cost
//! - **Enzymes** — [`RestrictionEnzyme`] and the built-in [`common_enzymes`]
//! - **Detection** — [`WobbleCutDetector`] and [`rank_edits`]
//! - **Configuration** — [`CodonTables`] and the flat-file [`TableLoader`]
//!
//! # Example
//!
//! ```
//! use wobble_seq::{CodonTables, RestrictionEnzyme, Sequence, WobbleCutDetector};
//!
//! let tables = CodonTables::default();
//! let target = Sequence::new("aaagggttt").unwrap().align();
//! let enzyme = RestrictionEnzyme::new("SmaI-half", "GGG").unwrap();
//!
//! let cuts = WobbleCutDetector::new(&tables).detect_cuts(&target, &enzyme);
//! let offsets: Vec<usize> = cuts.iter().map(|e| e.offset()).collect();
//! assert_eq!(offsets, vec![2, 3]);
//! assert!(cuts.iter().all(|e| e.is_silent(tables.amino())));
//! ```

pub mod aligned;
pub mod alphabet;
pub mod codon;
pub mod config;
pub mod edit;
pub mod restriction;
pub mod seq;
pub mod usage;
pub mod wobble;

pub use aligned::AlignedSequence;
pub use alphabet::{Alphabet, IupacDna, PrimitiveDna, RecognitionSite, GAP};
pub use codon::{Amino, AminoTable, Codon, Stop};
pub use config::{CodonTables, TableLoader};
pub use edit::{EditReport, SequenceReplacementEdit, UsageShift};
pub use restriction::{common_enzymes, RestrictionEnzyme};
pub use seq::Sequence;
pub use usage::UsageTable;
pub use wobble::{candidate_sites, rank_edits, WobbleCutDetector};
