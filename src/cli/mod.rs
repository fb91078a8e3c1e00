//! Command-line interface for knotfold.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **fold**: Fold a single sequence given on the command line
//! - **predict**: Predict a structure for every sequence in a FASTA file
//! - **scan**: Slide a window along each sequence and score knot risk
//!
//! ## Usage
//!
//! ```text
//! # Fold one sequence and show the score matrix
//! knotfold fold GGGGCCCC --matrix
//!
//! # Whole-sequence structures as JSON
//! knotfold predict transcripts.fa --format json
//!
//! # Knot scan with custom windows, writing reports to a directory
//! knotfold scan transcripts.fa.gz --window-size 40 --stride 10 --output-dir results/
//! ```

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::AnalysisConfig;
use crate::core::sequence::SequenceRecord;
use crate::parsing::fasta::{is_fasta_file, parse_fasta_file};

pub mod fold;
pub mod predict;
pub mod scan;

#[derive(Parser)]
#[command(name = "knotfold")]
#[command(version)]
#[command(about = "Predict nucleic-acid secondary structure and flag knot-prone regions")]
#[command(
    long_about = "knotfold predicts secondary structure by maximizing the number of complementary base pairs, then slides a window along each sequence to score topological complexity.\n\nEach window is classified into a risk tier (LOW, MEDIUM, HIGH, CRITICAL) from its writhe, crossing count, linking number and nesting complexity."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fold a single sequence
    Fold(fold::FoldArgs),

    /// Predict whole-sequence structures for a FASTA file
    Predict(predict::PredictArgs),

    /// Scan sequences in windows and score knot risk
    Scan(scan::ScanArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load the configuration file if one was given, otherwise the defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

/// Read every record of a FASTA file
fn read_records(path: &Path) -> anyhow::Result<Vec<SequenceRecord>> {
    if !is_fasta_file(path) {
        tracing::warn!(
            "{} does not have a FASTA extension, parsing as FASTA anyway",
            path.display()
        );
    }
    parse_fasta_file(path).with_context(|| format!("Failed to read {}", path.display()))
}
