//! Nucleotide composition statistics.
//!
//! Whole-sequence statistics ([`SequenceStats`]) are reported alongside each
//! prediction; window-level metrics are aggregated into a
//! [`CompositionReport`] during a scan.

pub mod composition;

pub use composition::{CodonCount, CompositionReport, SequenceStats, WindowComposition};
