//! Sequence validation and normalization applied before analysis.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::config::ValidationConfig;
use crate::core::sequence::{is_nucleotide, SequenceRecord};
use crate::topology::scoring::count_to_f64;

/// Maximum number of records accepted from a single file
pub const MAX_RECORDS: usize = 100_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Reasons a sequence is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Sequence too short: {length} < {min_length}")]
    TooShort { length: usize, min_length: usize },

    #[error("Invalid nucleotides: {0}")]
    InvalidNucleotides(String),

    #[error("Too many unknown nucleotides: {n_fraction:.3} N exceeds {max_n_fraction:.3}")]
    TooManyUnknown { n_fraction: f64, max_n_fraction: f64 },
}

/// Validate a sequence against the length, alphabet and `N` rules
///
/// # Errors
///
/// Returns `ValidationError::TooShort`, `ValidationError::InvalidNucleotides`
/// (listing the offending characters in sorted order) or
/// `ValidationError::TooManyUnknown`, checked in that order.
pub fn validate_sequence(sequence: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    let length = sequence.len();
    if length < config.min_length {
        return Err(ValidationError::TooShort {
            length,
            min_length: config.min_length,
        });
    }

    let invalid: BTreeSet<char> = sequence
        .chars()
        .filter(|c| !c.is_ascii() || !is_nucleotide(*c as u8))
        .collect();
    if !invalid.is_empty() {
        let listed: Vec<String> = invalid.iter().map(char::to_string).collect();
        return Err(ValidationError::InvalidNucleotides(listed.join(", ")));
    }

    if length > 0 {
        let n_count = sequence.bytes().filter(|&b| b == b'N').count();
        let n_fraction = count_to_f64(n_count) / count_to_f64(length);
        if n_fraction > config.max_n_fraction {
            return Err(ValidationError::TooManyUnknown {
                n_fraction,
                max_n_fraction: config.max_n_fraction,
            });
        }
    }

    Ok(())
}

/// Uppercase a sequence and drop characters outside the nucleotide alphabet
#[must_use]
pub fn normalize_sequence(sequence: &str) -> String {
    sequence
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii() && is_nucleotide(*c as u8))
        .collect()
}

/// Keep valid records (normalized), logging the rejected ones
#[must_use]
pub fn filter_sequences(records: Vec<SequenceRecord>, config: &ValidationConfig) -> Vec<SequenceRecord> {
    let total = records.len();
    let kept: Vec<SequenceRecord> = records
        .into_iter()
        .filter_map(|record| match validate_sequence(&record.sequence, config) {
            Ok(()) => Some(SequenceRecord::new(
                record.id,
                normalize_sequence(&record.sequence),
            )),
            Err(e) => {
                warn!("Skipping sequence '{}': {e}", record.id);
                None
            }
        })
        .collect();

    debug!("Kept {} of {total} sequences after validation", kept.len());
    kept
}
