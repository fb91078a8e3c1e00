//! Predict command - whole-sequence structures for every record of a FASTA file.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_config, read_records, OutputFormat};
use crate::pipeline::{Pipeline, SequencePrediction};

/// Arguments for the predict command
#[derive(Args)]
pub struct PredictArgs {
    /// Input FASTA file (plain or gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// JSON configuration file; unspecified fields keep their defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Minimum sequence length; shorter sequences are skipped
    #[arg(long)]
    pub min_length: Option<usize>,
}

/// Execute the predict command
///
/// # Errors
///
/// Returns an error if the configuration or FASTA file cannot be loaded, or
/// if no sequence passes validation.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(min_length) = args.min_length {
        config.validation.min_length = min_length;
    }
    let pipeline = Pipeline::new(config)?;

    let records = read_records(&args.input)?;
    let parsed = records.len();
    let records = pipeline.prepare(records)?;

    if verbose {
        eprintln!(
            "Loaded {} sequences from {} ({} passed validation)",
            parsed,
            args.input.display(),
            records.len()
        );
    }

    let predictions = pipeline.predict_all(&records);

    match format {
        OutputFormat::Text => print_text(&predictions),
        OutputFormat::Json => print_json(&predictions)?,
        OutputFormat::Tsv => print_tsv(&predictions),
    }

    Ok(())
}

fn print_text(predictions: &[SequencePrediction]) {
    for (index, result) in predictions.iter().enumerate() {
        if index > 0 {
            println!();
        }
        println!(">{}", result.id);
        println!(
            "   Length: {}  GC: {:.1}%  MD5: {}",
            result.stats.length,
            result.stats.gc_content * 100.0,
            result.stats.md5
        );
        match &result.prediction {
            Some(prediction) => {
                println!("   {}", prediction.sequence);
                println!("   {}", prediction.structure);
                println!("   Base pairs: {}", prediction.base_pairs);
            }
            None => println!("   Structure: skipped (too long to fold as a whole)"),
        }
    }
}

fn print_json(predictions: &[SequencePrediction]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(predictions)?);
    Ok(())
}

fn print_tsv(predictions: &[SequencePrediction]) {
    println!("id\tlength\tgc_content\tmd5\tbase_pairs\tstructure");
    for result in predictions {
        let (base_pairs, structure) = match &result.prediction {
            Some(prediction) => (
                prediction.base_pairs.to_string(),
                prediction.structure.to_string(),
            ),
            None => ("NA".to_string(), "NA".to_string()),
        };
        println!(
            "{}\t{}\t{:.4}\t{}\t{}\t{}",
            result.id, result.stats.length, result.stats.gc_content, result.stats.md5, base_pairs, structure
        );
    }
}
