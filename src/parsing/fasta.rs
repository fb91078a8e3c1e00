//! Parser for FASTA files using noodles.
//!
//! Supports both uncompressed and gzip/bgzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)
//! - `.fa.bgz`, `.fasta.bgz`, `.fna.bgz` (bgzip compressed)

use std::ffi::OsStr;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use noodles::fasta;
use thiserror::Error;
use tracing::debug;

use crate::core::sequence::{upsert_record, SequenceRecord};
use crate::utils::validation::{check_record_limit, MAX_RECORDS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("Too many records: {0} exceeds maximum allowed ({MAX_RECORDS})")]
    TooManyRecords(usize),
}

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
        || path_str.ends_with(".fa.bgz")
        || path_str.ends_with(".fasta.bgz")
        || path_str.ends_with(".fna.bgz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Parse a FASTA file into uppercase sequence records.
///
/// Record ids are the header name up to the first whitespace. When an id
/// repeats, the later sequence replaces the earlier one in its original
/// position.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles` if
/// parsing fails, `ParseError::InvalidFormat` if no records are found, or
/// `ParseError::TooManyRecords` if the limit is exceeded.
pub fn parse_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, ParseError> {
    let file = std::fs::File::open(path)?;
    let records = if is_gzipped(path) {
        let mut reader = fasta::io::Reader::new(BufReader::new(GzDecoder::new(file)));
        parse_fasta_reader(&mut reader)?
    } else {
        let mut reader = fasta::io::Reader::new(BufReader::new(file));
        parse_fasta_reader(&mut reader)?
    };

    debug!(
        "Parsed {} sequences from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse FASTA text held in memory
///
/// # Errors
///
/// Same as [`parse_fasta_file`], minus file I/O.
pub fn parse_fasta_text(text: &str) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut reader = fasta::io::Reader::new(BufReader::new(text.as_bytes()));
    parse_fasta_reader(&mut reader)
}

/// Parse from a noodles FASTA reader
fn parse_fasta_reader<R: BufRead>(
    reader: &mut fasta::io::Reader<R>,
) -> Result<Vec<SequenceRecord>, ParseError> {
    let mut records: Vec<SequenceRecord> = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("Failed to parse FASTA record: {e}")))?;

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        let id = String::from_utf8_lossy(record.name()).to_string();
        let sequence: String = record
            .sequence()
            .as_ref()
            .iter()
            .map(|&b| char::from(b.to_ascii_uppercase()))
            .collect();

        upsert_record(&mut records, SequenceRecord::new(id, sequence));
    }

    if records.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No sequences found in FASTA file".to_string(),
        ));
    }

    Ok(records)
}
