//! Restriction enzymes and their recognition sites.
//!
//! Provides the built-in enzyme list and IUPAC-aware site matching.

use wobble_core::{Annotated, BaseSeq, Result, WobbleError};

use crate::alphabet::{self, RecognitionSite};
use crate::seq::Sequence;

/// A restriction enzyme: a name plus an IUPAC recognition pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RestrictionEnzyme {
    name: String,
    site: Sequence,
}

impl RestrictionEnzyme {
    /// Create an enzyme, validating the recognition site.
    ///
    /// The site must be non-empty and use IUPAC symbols only (no gaps).
    pub fn new(name: impl Into<String>, site: impl AsRef<[u8]>) -> Result<Self> {
        let site = Sequence::with_alphabet::<RecognitionSite>(site)?;
        let name = name.into();
        if site.is_empty() {
            return Err(WobbleError::InvalidLength(format!(
                "recognition site of {} is empty",
                name
            )));
        }
        Ok(Self { name, site })
    }

    /// Recognition site (uppercase IUPAC).
    pub fn recognition_site(&self) -> &Sequence {
        &self.site
    }

    /// Length of the recognition site.
    pub fn len(&self) -> usize {
        self.site.len()
    }

    /// Always false: empty sites are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.site.is_empty()
    }

    /// Whether the site is its own reverse complement (e.g. `GGTACC`).
    pub fn is_symmetric(&self) -> bool {
        self.site == self.site.reverse_complement()
    }

    /// Whether the site matches `seq` starting at `pos`, honoring degenerate
    /// codes in the site. Gaps in `seq` never match.
    pub fn recognizes_at(&self, seq: &[u8], pos: usize) -> bool {
        let Some(window) = pos
            .checked_add(self.len())
            .and_then(|end| seq.get(pos..end))
        else {
            return false;
        };
        self.site
            .iter()
            .zip(window)
            .all(|(&code, &base)| iupac_matches(code, base))
    }

    /// Every position where the site (or its reverse complement) already occurs.
    pub fn find_sites(&self, seq: &[u8]) -> Vec<usize> {
        let rc = RestrictionEnzyme {
            name: self.name.clone(),
            site: self.site.reverse_complement(),
        };
        (0..seq.len())
            .filter(|&pos| self.recognizes_at(seq, pos) || rc.recognizes_at(seq, pos))
            .collect()
    }
}

impl Annotated for RestrictionEnzyme {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Check if a single base is one of the primitives an IUPAC code stands for.
fn iupac_matches(code: u8, base: u8) -> bool {
    let base = base.to_ascii_uppercase();
    base != alphabet::GAP && alphabet::primitive_set(code).contains(&base)
}

/// The built-in list of common enzymes.
pub fn common_enzymes() -> Vec<RestrictionEnzyme> {
    const ENZYMES: [(&str, &str); 22] = [
        ("AciI", "CCGC"),
        ("AluI", "AGCT"),
        ("BamHI", "GGATCC"),
        ("EcoRI", "GAATTC"),
        ("EcoRV", "GATATC"),
        ("HaeIII", "GGCC"),
        ("HgaI", "GACGC"),
        ("HindIII", "AAGCTT"),
        ("KpnI", "GGTACC"),
        ("NotI", "GCGGCCGC"),
        ("PstI", "CTGCAG"),
        ("PvuII", "CAGCTG"),
        ("SacI", "GAGCTC"),
        ("SalI", "GTCGAC"),
        ("Sau3AI", "GATC"),
        ("ScaI", "AGTACT"),
        ("SmaI", "CCCGGG"),
        ("SpeI", "ACTAGT"),
        ("SphI", "GCATGC"),
        ("StuI", "AGGCCT"),
        ("TaqI", "TCGA"),
        ("XbaI", "TCTAGA"),
    ];
    ENZYMES
        .iter()
        .map(|&(name, site)| RestrictionEnzyme {
            name: name.to_string(),
            site: Sequence::from_validated(site.as_bytes().to_vec()),
        })
        .collect()
}
