//! Base alphabets, primitive expansions and the complement table.
//!
//! Each alphabet is a zero-sized marker type that implements [`Alphabet`],
//! defining the set of valid bytes (uppercase) for one call site. All of
//! them accept `U` as input; [`normalize`] rewrites it to `T`.

use wobble_core::{Result, WobbleError};

/// The gap symbol: a missing or unaligned base. Matches only itself.
pub const GAP: u8 = b'_';

/// Trait for nucleotide alphabets.
///
/// Implementors define a fixed set of valid uppercase bytes. Constructors
/// uppercase input first, then validate against the alphabet.
pub trait Alphabet: Clone + 'static {
    /// Human-readable name (e.g. "IUPAC DNA").
    const NAME: &'static str;

    /// The set of valid uppercase bytes.
    const VALID_BYTES: &'static [u8];

    /// Check whether a byte (assumed already uppercased) is valid.
    fn is_valid(b: u8) -> bool {
        Self::VALID_BYTES.contains(&b)
    }
}

/// Full IUPAC DNA alphabet plus the gap symbol: `ACGTUNRYSWKMBDHV_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IupacDna;

impl Alphabet for IupacDna {
    const NAME: &'static str = "IUPAC DNA";
    const VALID_BYTES: &'static [u8] = b"ACGTUNRYSWKMBDHV_";
}

/// Non-degenerate bases plus the gap symbol: `ACGTU_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveDna;

impl Alphabet for PrimitiveDna {
    const NAME: &'static str = "primitive DNA";
    const VALID_BYTES: &'static [u8] = b"ACGTU_";
}

/// Recognition-site alphabet: IUPAC DNA without the gap symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecognitionSite;

impl Alphabet for RecognitionSite {
    const NAME: &'static str = "recognition site";
    const VALID_BYTES: &'static [u8] = b"ACGTUNRYSWKMBDHV";
}

/// Uppercase `bytes`, validate them against `A`, and rewrite `U` to `T`.
pub fn normalize<A: Alphabet>(bytes: &[u8]) -> Result<Vec<u8>> {
    bytes
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            let upper = b.to_ascii_uppercase();
            if !A::is_valid(upper) {
                return Err(WobbleError::invalid_symbol(b, i, A::NAME));
            }
            Ok(if upper == b'U' { b'T' } else { upper })
        })
        .collect()
}

/// Primitive expansion of a symbol, or an empty slice for unknown bytes.
pub(crate) fn primitive_set(symbol: u8) -> &'static [u8] {
    match symbol.to_ascii_uppercase() {
        b'A' => b"A",
        b'C' => b"C",
        b'G' => b"G",
        b'T' | b'U' => b"T",
        GAP => b"_",
        b'R' => b"AG",
        b'Y' => b"CT",
        b'S' => b"CG",
        b'W' => b"AT",
        b'K' => b"GT",
        b'M' => b"AC",
        b'B' => b"CGT",
        b'D' => b"AGT",
        b'H' => b"ACT",
        b'V' => b"ACG",
        b'N' => b"ACGT",
        _ => b"",
    }
}

/// All primitive symbols (`A`, `C`, `G`, `T` or `_`) a symbol can stand for.
///
/// Input is case-insensitive; `U` expands to `T`.
pub fn primitives(symbol: u8) -> Result<&'static [u8]> {
    match primitive_set(symbol) {
        [] => Err(WobbleError::invalid_symbol(symbol, 0, IupacDna::NAME)),
        set => Ok(set),
    }
}

/// Whether an (uppercase) symbol denotes exactly one primitive.
pub fn is_primitive(symbol: u8) -> bool {
    matches!(symbol, b'A' | b'C' | b'G' | b'T' | b'U' | GAP)
}

// ---------------------------------------------------------------------------
// Complement table (full IUPAC, involutive)
// ---------------------------------------------------------------------------

const COMPLEMENT: [u8; 256] = {
    let mut t = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        t[i] = i as u8;
        i += 1;
    }
    t[b'A' as usize] = b'T';
    t[b'T' as usize] = b'A';
    t[b'C' as usize] = b'G';
    t[b'G' as usize] = b'C';
    t[b'R' as usize] = b'Y'; // A|G -> T|C
    t[b'Y' as usize] = b'R';
    t[b'K' as usize] = b'M'; // G|T -> C|A
    t[b'M' as usize] = b'K';
    t[b'B' as usize] = b'V'; // C|G|T -> G|C|A
    t[b'V' as usize] = b'B';
    t[b'D' as usize] = b'H'; // A|G|T -> T|C|A
    t[b'H' as usize] = b'D';
    // S, W, N and _ map to themselves.
    t
};

/// Watson-Crick complement of a normalized symbol.
pub fn complement(symbol: u8) -> u8 {
    COMPLEMENT[symbol as usize]
}
