//! Fold command - predict the structure of one sequence given on the command line.

use clap::Args;

use crate::analysis::composition::SequenceStats;
use crate::cli::OutputFormat;
use crate::config::DEFAULT_MAX_FOLD_LENGTH;
use crate::folding::engine::{PairingEngine, Prediction};
use crate::folding::matrix::ScoreMatrix;

/// Arguments for the fold command
#[derive(Args)]
pub struct FoldArgs {
    /// Nucleotide sequence (A, C, G, T, U; any other character never pairs)
    #[arg(required = true)]
    pub sequence: String,

    /// Also print the maximum-pairing score matrix
    #[arg(long)]
    pub matrix: bool,
}

/// Execute the fold command
///
/// # Errors
///
/// Returns an error if the sequence is too long to fold directly.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: FoldArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let sequence = args.sequence.trim().to_ascii_uppercase();
    if sequence.len() > DEFAULT_MAX_FOLD_LENGTH {
        anyhow::bail!(
            "Sequence length {} exceeds {DEFAULT_MAX_FOLD_LENGTH}; use `knotfold scan` for long sequences",
            sequence.len()
        );
    }

    let (prediction, matrix) = PairingEngine::new().fold(&sequence);

    if verbose {
        let stats = SequenceStats::compute(&sequence);
        eprintln!(
            "Folded {} bases ({:.1}% GC)",
            stats.length,
            stats.gc_content * 100.0
        );
    }

    let matrix = args.matrix.then_some(&matrix);
    match format {
        OutputFormat::Text => print_text(&prediction, matrix),
        OutputFormat::Json => print_json(&prediction, matrix)?,
        OutputFormat::Tsv => print_tsv(&prediction, matrix),
    }

    Ok(())
}

fn print_text(prediction: &Prediction, matrix: Option<&ScoreMatrix>) {
    println!("Sequence:   {}", prediction.sequence);
    println!("Structure:  {}", prediction.structure);
    println!("Base pairs: {}", prediction.base_pairs);

    let motifs = prediction.structure.motifs();
    if !motifs.stems.is_empty() {
        println!(
            "Motifs:     {} stems, {} loops, {} hairpins",
            motifs.stems.len(),
            motifs.loops.len(),
            motifs.hairpins.len()
        );
    }

    if let Some(matrix) = matrix {
        println!("\nScore matrix:");
        print_matrix_rows(matrix);
    }
}

fn print_json(prediction: &Prediction, matrix: Option<&ScoreMatrix>) -> anyhow::Result<()> {
    let mut output = serde_json::json!({
        "sequence": prediction.sequence,
        "structure": prediction.structure,
        "base_pairs": prediction.base_pairs,
        "pairs": prediction
            .structure
            .base_pairs()
            .iter()
            .map(|pair| [pair.i, pair.j])
            .collect::<Vec<_>>(),
        "motifs": prediction.structure.motifs(),
    });

    if let Some(matrix) = matrix {
        let rows: Vec<&[u32]> = (0..matrix.len()).map(|i| matrix.row(i)).collect();
        output["matrix"] = serde_json::json!(rows);
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(prediction: &Prediction, matrix: Option<&ScoreMatrix>) {
    println!("sequence\tstructure\tbase_pairs");
    println!(
        "{}\t{}\t{}",
        prediction.sequence, prediction.structure, prediction.base_pairs
    );

    if let Some(matrix) = matrix {
        println!();
        print_matrix_rows(matrix);
    }
}

fn print_matrix_rows(matrix: &ScoreMatrix) {
    for i in 0..matrix.len() {
        let row: Vec<String> = matrix.row(i).iter().map(u32::to_string).collect();
        println!("{}", row.join("\t"));
    }
}
