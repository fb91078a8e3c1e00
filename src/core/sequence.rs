use serde::{Deserialize, Serialize};

/// Nucleotides accepted in input sequences
pub const NUCLEOTIDES: [u8; 6] = [b'A', b'T', b'G', b'C', b'U', b'N'];

/// Check if a byte is one of the accepted (uppercase) nucleotides
#[must_use]
pub fn is_nucleotide(base: u8) -> bool {
    NUCLEOTIDES.contains(&base)
}

/// A named nucleotide sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Identifier from the FASTA header (up to the first whitespace)
    pub id: String,

    /// Uppercase sequence over A, T, G, C, U, N
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Insert a record, replacing the sequence of an earlier record with the same id.
///
/// The replaced record keeps its original position.
pub fn upsert_record(records: &mut Vec<SequenceRecord>, record: SequenceRecord) {
    if let Some(existing) = records.iter_mut().find(|r| r.id == record.id) {
        existing.sequence = record.sequence;
    } else {
        records.push(record);
    }
}
