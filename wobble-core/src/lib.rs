//! Shared primitives for the wobble workspace.
//!
//! `wobble-core` provides the foundation the other wobble crates build on:
//!
//! - **Error types** — [`WobbleError`] and [`Result`] for structured error handling
//! - **Traits** — [`BaseSeq`], [`Annotated`], [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{Result, WobbleError};
pub use traits::*;
