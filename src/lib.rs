//! # knotfold
//!
//! A library for predicting nucleic-acid secondary structure and flagging
//! regions at risk of topological entanglement.
//!
//! Structures are predicted by maximizing the number of complementary base
//! pairs (Nussinov-style dynamic programming, no energy model). Long sequences
//! are scanned in fixed-size windows; each window's structure is scored for
//! writhe, crossing count, linking number and nesting complexity, and the
//! weighted composite is mapped to a risk tier.
//!
//! ## Features
//!
//! - **Maximum pairing**: O(n³) matrix fill with a deterministic traceback
//! - **Window scanning**: configurable window size and stride
//! - **Knot-risk scoring**: composite complexity score and LOW..CRITICAL tiers
//! - **Aggregation**: risk distribution and high-risk regions across windows
//! - **Composition**: GC, melting temperature, homopolymers, codon usage
//!
//! ## Example
//!
//! ```rust
//! use knotfold::{AnalysisConfig, Pipeline, RiskLevel, SequenceRecord};
//!
//! let pipeline = Pipeline::new(AnalysisConfig {
//!     window_size: 8,
//!     stride: 8,
//!     ..AnalysisConfig::default()
//! })
//! .unwrap();
//!
//! let records = vec![SequenceRecord::new("seq1", "GGGGCCCCAAAAAAAAT")];
//! let report = pipeline.scan(&records).unwrap();
//!
//! assert_eq!(report.summary.total_windows_analyzed, 2);
//! assert_eq!(report.records[0].risk_level(), RiskLevel::Medium);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Base pairs, dot-bracket structures, risk levels, sequence records
//! - [`folding`]: Pairing engine and window scanner
//! - [`topology`]: Knot metrics, complexity scoring and aggregation
//! - [`analysis`]: Nucleotide composition statistics
//! - [`config`]: Every tunable parameter, loadable from JSON
//! - [`pipeline`]: Parallel end-to-end analysis over many sequences
//! - [`parsing`]: FASTA input
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod folding;
pub mod parsing;
pub mod pipeline;
pub mod topology;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AnalysisConfig;
pub use core::types::*;
pub use core::{SequenceRecord, Structure};
pub use folding::{PairingEngine, Prediction, WindowScanner};
pub use pipeline::{Pipeline, PipelineError, ScanReport};
pub use topology::{KnotRecord, Summary, TopologyAnalyzer, WindowAggregator};
