//! Core value types shared by the folding and topology modules.
//!
//! - [`SequenceRecord`]: a named nucleotide sequence
//! - [`Structure`]: a balanced, properly nested dot-bracket structure
//! - [`BasePair`]: an `(i, j)` pair of bound positions
//! - [`RiskLevel`]: knot-risk tier assigned to an analyzed window
//!
//! ## Dot-bracket notation
//!
//! | Character | Meaning |
//! |-----------|---------|
//! | `(`       | paired with a later `)` |
//! | `)`       | paired with an earlier `(` |
//! | `.`       | unpaired |
//!
//! `GGGGCCCC` folds to `(((())))`: four nested pairs.

pub mod sequence;
pub mod structure;
pub mod types;

pub use sequence::SequenceRecord;
pub use structure::{Motifs, Structure, StructureError};
pub use types::{BasePair, RiskLevel};
