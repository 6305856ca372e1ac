//! Structured error types for the wobble workspace.

use thiserror::Error;

/// Unified error type for all wobble operations.
///
/// Every variant is raised eagerly, at construction or load time. Later
/// operations assume their inputs already passed validation.
#[derive(Debug, Error)]
pub enum WobbleError {
    /// I/O error while reading a table or sequence file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in a flat-file table.
    #[error("parse error: {0}")]
    Parse(String),

    /// Character outside the alphabet accepted at this call site.
    #[error("invalid {alphabet} symbol '{symbol}' at position {position}")]
    InvalidSymbol {
        symbol: char,
        position: usize,
        alphabet: &'static str,
    },

    /// Codon not of length 3, or aligned sequence not a multiple of 3.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Override does not fit inside the target at the requested offset.
    #[error("edit of {len} bases at offset {offset} exceeds target length {target_len}")]
    EditOutOfBounds {
        offset: usize,
        len: usize,
        target_len: usize,
    },

    /// A frozen table was loaded a second time.
    #[error("{0} already loaded")]
    ConfigAlreadyLoaded(&'static str),
}

impl WobbleError {
    /// Build an [`WobbleError::InvalidSymbol`] from a raw byte.
    pub fn invalid_symbol(byte: u8, position: usize, alphabet: &'static str) -> Self {
        WobbleError::InvalidSymbol {
            symbol: byte as char,
            position,
            alphabet,
        }
    }
}

/// Convenience alias used throughout the wobble workspace.
pub type Result<T> = std::result::Result<T, WobbleError>;
