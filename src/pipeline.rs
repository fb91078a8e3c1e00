//! End-to-end analysis over many sequences.
//!
//! Sequences and windows are independent, so folding runs on rayon's thread
//! pool. Results are collected in input order, which keeps every report
//! deterministic regardless of scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analysis::composition::{CompositionReport, SequenceStats};
use crate::config::{AnalysisConfig, ConfigError};
use crate::core::sequence::SequenceRecord;
use crate::folding::engine::Prediction;
use crate::folding::window::{Window, WindowPrediction, WindowScanner};
use crate::topology::analyzer::TopologyAnalyzer;
use crate::topology::scoring::KnotRecord;
use crate::topology::summary::{Summary, SummaryError, WindowAggregator};
use crate::utils::validation::filter_sequences;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("No valid sequences to analyze")]
    NoSequences,

    #[error("{0} (are all sequences shorter than the window size?)")]
    Summary(#[from] SummaryError),
}

/// Whole-sequence result for one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencePrediction {
    pub id: String,
    pub stats: SequenceStats,
    /// `None` when the sequence exceeds `max_fold_length`
    pub prediction: Option<Prediction>,
}

/// Composition statistics for one scanned sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub id: String,
    #[serde(flatten)]
    pub stats: SequenceStats,
}

/// Everything produced by a window scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub created_at: String,
    pub sequences: Vec<SequenceSummary>,
    pub windows: Vec<WindowPrediction>,
    pub records: Vec<KnotRecord>,
    pub summary: Summary,
    pub composition: CompositionReport,
}

/// Configured prediction and knot-scanning pipeline
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnalysisConfig,
    scanner: WindowScanner,
    analyzer: TopologyAnalyzer,
    aggregator: WindowAggregator,
}

impl Pipeline {
    /// Build a pipeline from a configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration does not validate.
    pub fn new(config: AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scanner: WindowScanner::from_config(&config)?,
            analyzer: TopologyAnalyzer::new(config.knot.clone()),
            aggregator: WindowAggregator::new(),
            config,
        })
    }

    #[must_use]
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Drop records that fail validation and normalize the rest
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NoSequences` if nothing survives.
    pub fn prepare(&self, records: Vec<SequenceRecord>) -> Result<Vec<SequenceRecord>, PipelineError> {
        let kept = filter_sequences(records, &self.config.validation);
        if kept.is_empty() {
            return Err(PipelineError::NoSequences);
        }
        Ok(kept)
    }

    /// Predict one structure per record
    #[must_use]
    pub fn predict_all(&self, records: &[SequenceRecord]) -> Vec<SequencePrediction> {
        records
            .par_iter()
            .map(|record| self.predict_record(record))
            .collect()
    }

    fn predict_record(&self, record: &SequenceRecord) -> SequencePrediction {
        let stats = SequenceStats::compute(&record.sequence);
        let prediction = if record.len() > self.config.max_fold_length {
            warn!(
                "Skipping whole-sequence fold of '{}': length {} exceeds {}",
                record.id,
                record.len(),
                self.config.max_fold_length
            );
            None
        } else {
            let prediction = self.scanner.engine().predict(&record.sequence);
            debug!("Folded '{}': {} base pairs", record.id, prediction.base_pairs);
            Some(prediction)
        };

        SequencePrediction {
            id: record.id.clone(),
            stats,
            prediction,
        }
    }

    /// Fold every window of every record, in record then offset order
    #[must_use]
    pub fn fold_windows(&self, records: &[SequenceRecord]) -> Vec<WindowPrediction> {
        let windows: Vec<Window<'_>> = records
            .iter()
            .flat_map(|record| self.scanner.windows(&record.id, &record.sequence))
            .collect();
        debug!(
            "Folding {} windows (size {}, stride {})",
            windows.len(),
            self.scanner.window_size(),
            self.scanner.stride()
        );

        let engine = self.scanner.engine();
        windows.par_iter().map(|window| window.fold(engine)).collect()
    }

    /// Scan all records for knot-prone windows
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::NoSequences` for an empty record set and
    /// `PipelineError::Summary` when no sequence is long enough to yield a
    /// window.
    pub fn scan(&self, records: &[SequenceRecord]) -> Result<ScanReport, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::NoSequences);
        }

        let sequences: Vec<SequenceSummary> = records
            .iter()
            .map(|record| SequenceSummary {
                id: record.id.clone(),
                stats: SequenceStats::compute(&record.sequence),
            })
            .collect();

        let windows = self.fold_windows(records);
        let knot_records: Vec<KnotRecord> = windows
            .par_iter()
            .map(|window| self.analyzer.analyze_window(window))
            .collect();
        let summary = self.aggregator.summarize(&knot_records)?;
        let composition = CompositionReport::from_windows(&windows);

        info!(
            "Analyzed {} windows across {} sequences: {} high-risk",
            summary.total_windows_analyzed,
            records.len(),
            summary.high_risk_windows
        );

        Ok(ScanReport {
            created_at: chrono::Utc::now().to_rfc3339(),
            sequences,
            windows,
            records: knot_records,
            summary,
            composition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(window_size: usize, stride: usize) -> Pipeline {
        Pipeline::new(AnalysisConfig {
            window_size,
            stride,
            ..AnalysisConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AnalysisConfig {
            stride: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(Pipeline::new(config), Err(ConfigError::ZeroStride)));
    }

    #[test]
    fn test_predict_all_keeps_input_order() {
        let records = vec![
            SequenceRecord::new("b", "GGGAAACCC"),
            SequenceRecord::new("a", "GGGGCCCC"),
        ];
        let predictions = pipeline(30, 15).predict_all(&records);

        assert_eq!(predictions[0].id, "b");
        assert_eq!(
            predictions[0].prediction.as_ref().unwrap().structure.as_str(),
            "(((...)))"
        );
        assert_eq!(predictions[1].id, "a");
        assert_eq!(predictions[1].prediction.as_ref().unwrap().base_pairs, 4);
        assert_eq!(predictions[1].stats.length, 8);
    }

    #[test]
    fn test_predict_skips_long_sequences() {
        let pipeline = Pipeline::new(AnalysisConfig {
            max_fold_length: 4,
            ..AnalysisConfig::default()
        })
        .unwrap();
        let predictions = pipeline.predict_all(&[SequenceRecord::new("long", "GGGGCCCC")]);
        assert!(predictions[0].prediction.is_none());
        assert_eq!(predictions[0].stats.length, 8);
    }

    #[test]
    fn test_scan() {
        let records = vec![
            SequenceRecord::new("s1", "GGGGCCCCAAAAAAAAT"),
            SequenceRecord::new("s2", "ACGT"),
        ];
        let report = pipeline(8, 8).scan(&records).unwrap();

        assert_eq!(report.windows.len(), 2);
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.sequences.len(), 2);
        assert_eq!(report.summary.total_windows_analyzed, 2);
        assert_eq!(report.records[0].sequence_id, "s1");
        assert_eq!(report.records[1].window_start, 8);
        // "(((())))" scores 0.168, "........" scores 0
        assert!((report.summary.max_complexity - 0.168).abs() < 1e-12);
        assert_eq!(report.summary.risk_distribution.medium, 1);
        assert_eq!(report.summary.risk_distribution.low, 1);
    }

    #[test]
    fn test_scan_without_windows() {
        let records = vec![SequenceRecord::new("short", "GGGGCCCC")];
        let err = pipeline(30, 15).scan(&records).unwrap_err();
        assert!(matches!(err, PipelineError::Summary(SummaryError::Empty)));

        assert!(matches!(
            pipeline(30, 15).scan(&[]),
            Err(PipelineError::NoSequences)
        ));
    }

    #[test]
    fn test_prepare_filters_and_normalizes() {
        let records = vec![
            SequenceRecord::new("ok", "GGGGAAAACCCCAAAATTTT"),
            SequenceRecord::new("short", "GGCC"),
        ];
        let kept = pipeline(30, 15).prepare(records).unwrap();
        assert_eq!(kept.len(), 1);

        let err = pipeline(30, 15)
            .prepare(vec![SequenceRecord::new("short", "GGCC")])
            .unwrap_err();
        assert!(matches!(err, PipelineError::NoSequences));
    }

    #[test]
    fn test_fold_windows_matches_sequential_scan() {
        let records = vec![SequenceRecord::new("s", "GCGCAUAUGGGAAACCCUUAGCAUGCAUGC")];
        let pipeline = pipeline(10, 3);
        let parallel = pipeline.fold_windows(&records);
        let sequential: Vec<WindowPrediction> = WindowScanner::new(10, 3)
            .unwrap()
            .scan("s", &records[0].sequence)
            .collect();
        assert_eq!(parallel, sequential);
    }
}
