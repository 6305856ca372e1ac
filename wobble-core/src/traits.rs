//! Core trait definitions shared across the wobble crates.

/// A string of nucleotide symbols (plain or codon-aligned).
pub trait BaseSeq {
    /// The raw, upper-case byte representation.
    fn as_bytes(&self) -> &[u8];

    /// Length in bases.
    fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Whether the sequence is empty.
    fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// A type that carries a name, such as a restriction enzyme.
pub trait Annotated {
    /// A human-readable name or identifier.
    fn name(&self) -> &str;
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
