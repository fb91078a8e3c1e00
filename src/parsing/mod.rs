//! Input parsers.
//!
//! - **FASTA files**: plain or gzip/bgzip compressed, read with noodles
//!
//! ## Example
//!
//! ```rust,no_run
//! use knotfold::parsing::fasta::parse_fasta_file;
//! use std::path::Path;
//!
//! let records = parse_fasta_file(Path::new("sequences.fa")).unwrap();
//! for record in &records {
//!     println!("{}: {} bp", record.id, record.len());
//! }
//! ```

pub mod fasta;
