//! Scan command - sliding-window knot-risk analysis of a FASTA file.
//!
//! Every window is folded independently and scored for topological
//! complexity. The summary lists the highest-risk regions; `--output-dir`
//! additionally writes the full reports as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{load_config, read_records, OutputFormat};
use crate::config::AnalysisConfig;
use crate::pipeline::{Pipeline, ScanReport};

/// Summary and statistics report
pub const RESULTS_FILE: &str = "results.json";

/// Every per-window knot record
pub const DETAILS_FILE: &str = "knot_details.json";

/// Arguments for the scan command
#[derive(Args)]
pub struct ScanArgs {
    /// Input FASTA file (plain or gzip-compressed)
    #[arg(required = true)]
    pub input: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Window length
    #[arg(long)]
    pub window_size: Option<usize>,

    /// Offset between window starts
    #[arg(long)]
    pub stride: Option<usize>,

    /// |writhe| at or above this marks a window knot-prone
    #[arg(long)]
    pub writhe_threshold: Option<f64>,

    /// Crossing count at or above this marks a window knot-prone
    #[arg(long)]
    pub crossing_threshold: Option<usize>,

    /// Minimum sequence length; shorter sequences are skipped
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Number of high-risk regions to report
    #[arg(long, default_value = "10")]
    pub top: usize,

    /// Directory for results.json and knot_details.json
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl ScanArgs {
    fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(stride) = self.stride {
            config.stride = stride;
        }
        if let Some(threshold) = self.writhe_threshold {
            config.knot.writhe_threshold = threshold;
        }
        if let Some(threshold) = self.crossing_threshold {
            config.knot.crossing_threshold = threshold;
        }
        if let Some(min_length) = self.min_length {
            config.validation.min_length = min_length;
        }
    }
}

/// Execute the scan command
///
/// # Errors
///
/// Returns an error if inputs cannot be loaded, no sequence yields a window,
/// or the reports cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScanArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    let pipeline = Pipeline::new(config)?;

    let records = read_records(&args.input)?;
    let records = pipeline.prepare(records)?;

    if verbose {
        eprintln!(
            "Scanning {} sequences (window {}, stride {})",
            records.len(),
            pipeline.config().window_size,
            pipeline.config().stride
        );
    }

    let report = pipeline.scan(&records)?;

    if let Some(dir) = &args.output_dir {
        write_reports(dir, &report, pipeline.config(), args.top)?;
        if verbose {
            eprintln!("Wrote {RESULTS_FILE} and {DETAILS_FILE} to {}", dir.display());
        }
    }

    match format {
        OutputFormat::Text => print_text(&args.input, &report, pipeline.config(), args.top),
        OutputFormat::Json => print_json(&report, args.top)?,
        OutputFormat::Tsv => print_tsv(&report),
    }

    Ok(())
}

fn results_json(report: &ScanReport, config: &AnalysisConfig, top: usize) -> serde_json::Value {
    serde_json::json!({
        "created_at": report.created_at,
        "parameters": config,
        "sequences": report.sequences,
        "summary": {
            "total_windows_analyzed": report.summary.total_windows_analyzed,
            "high_risk_windows": report.summary.high_risk_windows,
            "average_complexity": report.summary.average_complexity,
            "max_complexity": report.summary.max_complexity,
            "risk_distribution": report.summary.risk_distribution,
            "high_risk_regions": report.summary.high_risk_regions,
        },
        "top_regions": report.summary.top_regions(top),
        "composition": report.composition,
    })
}

fn write_reports(
    dir: &Path,
    report: &ScanReport,
    config: &AnalysisConfig,
    top: usize,
) -> anyhow::Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let results = serde_json::to_string_pretty(&results_json(report, config, top))?;
    fs::write(dir.join(RESULTS_FILE), results)?;

    let details = serde_json::to_string_pretty(&report.records)?;
    fs::write(dir.join(DETAILS_FILE), details)?;

    Ok(())
}

fn print_text(input: &Path, report: &ScanReport, config: &AnalysisConfig, top: usize) {
    let summary = &report.summary;

    println!("\nKnot scan: {}", input.display());
    println!(
        "\n   Windows analyzed: {} (size {}, stride {}) across {} sequences",
        summary.total_windows_analyzed,
        config.window_size,
        config.stride,
        report.sequences.len()
    );
    println!("   High-risk windows: {}", summary.high_risk_windows);
    println!("   Average complexity: {:.4}", summary.average_complexity);
    println!("   Max complexity: {:.4}", summary.max_complexity);
    println!("   Risk distribution: {}", summary.risk_distribution);

    let regions = summary.top_regions(top);
    if regions.is_empty() {
        println!("\n   No high-risk regions found");
    } else {
        println!("\n   Top high-risk regions:");
        for (rank, region) in regions.iter().enumerate() {
            println!(
                "   {:>3}. {}:{}-{}  {:.4}  {}  (writhe {:.1}, {} crossings)",
                rank + 1,
                region.sequence_id,
                region.window_start,
                region.window_end,
                region.complexity_score(),
                region.risk_level(),
                region.metrics.writhe,
                region.metrics.crossing_count,
            );
        }
    }

    let composition = &report.composition;
    println!(
        "\n   GC: {:.1}% ± {:.1}   Tm: {:.1} ± {:.1}   Homopolymer runs >= 5: {:.1}% of windows",
        composition.gc_mean,
        composition.gc_std,
        composition.tm_mean,
        composition.tm_std,
        composition.homopolymer_problem_pct,
    );
}

fn print_json(report: &ScanReport, top: usize) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "summary": {
            "total_windows_analyzed": report.summary.total_windows_analyzed,
            "high_risk_windows": report.summary.high_risk_windows,
            "average_complexity": report.summary.average_complexity,
            "max_complexity": report.summary.max_complexity,
            "risk_distribution": report.summary.risk_distribution,
            "high_risk_regions": report.summary.high_risk_regions,
        },
        "top_regions": report.summary.top_regions(top),
        "composition": report.composition,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(report: &ScanReport) {
    println!(
        "sequence_id\twindow_start\twindow_end\twrithe\tcrossing_count\tlinking_number\tknot_prone\tcomplexity_score\trisk_level"
    );
    for record in &report.records {
        println!(
            "{}\t{}\t{}\t{:.1}\t{}\t{:.1}\t{}\t{:.4}\t{}",
            record.sequence_id,
            record.window_start,
            record.window_end,
            record.metrics.writhe,
            record.metrics.crossing_count,
            record.metrics.linking_number,
            record.metrics.knot_prone,
            record.complexity_score(),
            record.risk_level(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskThresholds;
    use crate::core::sequence::SequenceRecord;
    use tempfile::TempDir;

    fn args() -> ScanArgs {
        ScanArgs {
            input: PathBuf::from("in.fa"),
            config: None,
            window_size: Some(8),
            stride: Some(8),
            writhe_threshold: Some(4.0),
            crossing_threshold: None,
            min_length: Some(5),
            top: 10,
            output_dir: None,
        }
    }

    #[test]
    fn test_overrides() {
        let mut config = AnalysisConfig::default();
        args().apply_overrides(&mut config);
        assert_eq!(config.window_size, 8);
        assert_eq!(config.stride, 8);
        assert!((config.knot.writhe_threshold - 4.0).abs() < f64::EPSILON);
        assert_eq!(config.knot.crossing_threshold, 2);
        assert_eq!(config.validation.min_length, 5);
    }

    #[test]
    fn test_write_reports() {
        let mut config = AnalysisConfig::default();
        args().apply_overrides(&mut config);
        let pipeline = Pipeline::new(config).unwrap();
        let records = vec![SequenceRecord::new("s1", "GGGGCCCCAAAAAAAAT")];
        let report = pipeline.scan(&records).unwrap();

        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested");
        write_reports(&out, &report, pipeline.config(), 10).unwrap();

        let results: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(RESULTS_FILE)).unwrap()).unwrap();
        assert_eq!(results["summary"]["total_windows_analyzed"], 2);
        assert_eq!(results["summary"]["risk_distribution"]["MEDIUM"], 1);
        assert_eq!(results["parameters"]["window_size"], 8);
        assert_eq!(results["sequences"][0]["id"], "s1");

        let details: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join(DETAILS_FILE)).unwrap()).unwrap();
        assert_eq!(details.as_array().unwrap().len(), 2);
        assert_eq!(details[0]["risk_level"], "MEDIUM");
        assert_eq!(details[1]["window_start"], 8);
    }

    #[test]
    fn test_results_keep_every_high_risk_region() {
        let mut config = AnalysisConfig::default();
        args().apply_overrides(&mut config);
        config.knot.risk = RiskThresholds {
            medium: 0.0,
            high: 0.0,
            critical: 0.5,
        };
        let pipeline = Pipeline::new(config).unwrap();
        let records = vec![SequenceRecord::new("s1", "GGGGCCCCAAAAAAAAT")];
        let report = pipeline.scan(&records).unwrap();

        let results = results_json(&report, pipeline.config(), 1);
        assert_eq!(results["summary"]["high_risk_windows"], 2);
        assert_eq!(results["summary"]["high_risk_regions"].as_array().unwrap().len(), 2);
        assert_eq!(results["top_regions"].as_array().unwrap().len(), 1);
        assert_eq!(results["summary"]["high_risk_regions"][1]["window_start"], 8);
    }
}
