use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::RiskLevel;
use crate::topology::scoring::{count_to_f64, KnotRecord};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SummaryError {
    #[error("No knot records to summarize")]
    Empty,
}

/// Number of windows in each risk tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    #[serde(rename = "LOW")]
    pub low: usize,
    #[serde(rename = "MEDIUM")]
    pub medium: usize,
    #[serde(rename = "HIGH")]
    pub high: usize,
    #[serde(rename = "CRITICAL")]
    pub critical: usize,
}

impl RiskDistribution {
    pub fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Medium => self.medium += 1,
            RiskLevel::High => self.high += 1,
            RiskLevel::Critical => self.critical += 1,
        }
    }

    #[must_use]
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }
}

impl std::fmt::Display for RiskDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, level) in RiskLevel::ALL.into_iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{level}: {}", self.count(level))?;
        }
        Ok(())
    }
}

/// Knot-risk summary over all analyzed windows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_windows_analyzed: usize,
    pub high_risk_windows: usize,
    pub average_complexity: f64,
    pub max_complexity: f64,
    /// HIGH and CRITICAL records, in input order
    pub high_risk_regions: Vec<KnotRecord>,
    pub risk_distribution: RiskDistribution,
}

impl Summary {
    /// The first `limit` high-risk regions
    #[must_use]
    pub fn top_regions(&self, limit: usize) -> &[KnotRecord] {
        &self.high_risk_regions[..limit.min(self.high_risk_regions.len())]
    }
}

/// Reduces per-window knot records into a [`Summary`]
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowAggregator;

impl WindowAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Summarize knot records.
    ///
    /// Counts, averages and maxima do not depend on record order.
    ///
    /// # Errors
    ///
    /// Returns `SummaryError::Empty` when there are no records, since the
    /// average is undefined.
    pub fn summarize(&self, records: &[KnotRecord]) -> Result<Summary, SummaryError> {
        if records.is_empty() {
            return Err(SummaryError::Empty);
        }

        let mut risk_distribution = RiskDistribution::default();
        let mut total_complexity = 0.0;
        let mut max_complexity = f64::MIN;

        for record in records {
            risk_distribution.record(record.risk_level());
            total_complexity += record.complexity_score();
            max_complexity = max_complexity.max(record.complexity_score());
        }

        let high_risk_regions: Vec<KnotRecord> = records
            .iter()
            .filter(|r| r.risk_level().is_high_risk())
            .cloned()
            .collect();

        Ok(Summary {
            total_windows_analyzed: records.len(),
            high_risk_windows: high_risk_regions.len(),
            average_complexity: total_complexity / count_to_f64(records.len()),
            max_complexity,
            high_risk_regions,
            risk_distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::scoring::KnotMetrics;

    fn record(start: usize, score: f64, level: RiskLevel) -> KnotRecord {
        KnotRecord {
            metrics: KnotMetrics {
                writhe: 0.0,
                crossing_count: 0,
                crossing_positions: Vec::new(),
                linking_number: 0.0,
                knot_prone: false,
                complexity_score: score,
                risk_level: level,
            },
            window_start: start,
            window_end: start + 30,
            sequence_id: "seq".to_string(),
        }
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert_eq!(WindowAggregator::new().summarize(&[]), Err(SummaryError::Empty));
    }

    #[test]
    fn test_tally_matches_manual_count() {
        let records = vec![
            record(0, 0.05, RiskLevel::Low),
            record(15, 0.15, RiskLevel::Medium),
            record(30, 0.25, RiskLevel::High),
            record(45, 0.12, RiskLevel::Medium),
            record(60, 0.35, RiskLevel::Critical),
            record(75, 0.08, RiskLevel::Low),
            record(90, 0.22, RiskLevel::High),
        ];
        let summary = WindowAggregator::new().summarize(&records).unwrap();

        assert_eq!(summary.total_windows_analyzed, 7);
        assert_eq!(summary.risk_distribution.low, 2);
        assert_eq!(summary.risk_distribution.medium, 2);
        assert_eq!(summary.risk_distribution.high, 2);
        assert_eq!(summary.risk_distribution.critical, 1);
        assert_eq!(summary.risk_distribution.total(), 7);
        assert_eq!(summary.high_risk_windows, 3);

        let starts: Vec<usize> = summary.high_risk_regions.iter().map(|r| r.window_start).collect();
        assert_eq!(starts, vec![30, 60, 90]);

        let mean = (0.05 + 0.15 + 0.25 + 0.12 + 0.35 + 0.08 + 0.22) / 7.0;
        assert!((summary.average_complexity - mean).abs() < 1e-12);
        assert!((summary.max_complexity - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_independent_statistics() {
        let mut records = vec![
            record(0, 0.31, RiskLevel::Critical),
            record(15, 0.02, RiskLevel::Low),
            record(30, 0.11, RiskLevel::Medium),
        ];
        let forward = WindowAggregator::new().summarize(&records).unwrap();
        records.reverse();
        let reverse = WindowAggregator::new().summarize(&records).unwrap();

        assert_eq!(forward.risk_distribution, reverse.risk_distribution);
        assert_eq!(forward.high_risk_windows, reverse.high_risk_windows);
        assert!((forward.average_complexity - reverse.average_complexity).abs() < 1e-12);
        assert!((forward.max_complexity - reverse.max_complexity).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_regions() {
        let records = vec![
            record(0, 0.25, RiskLevel::High),
            record(15, 0.26, RiskLevel::High),
        ];
        let summary = WindowAggregator::new().summarize(&records).unwrap();
        assert_eq!(summary.top_regions(1).len(), 1);
        assert_eq!(summary.top_regions(10).len(), 2);
    }

    #[test]
    fn test_distribution_display_lists_every_tier() {
        let mut distribution = RiskDistribution::default();
        distribution.record(RiskLevel::Medium);
        distribution.record(RiskLevel::Critical);
        distribution.record(RiskLevel::Critical);
        assert_eq!(
            distribution.to_string(),
            "LOW: 0, MEDIUM: 1, HIGH: 0, CRITICAL: 2"
        );
        let counted: usize = RiskLevel::ALL.iter().map(|&l| distribution.count(l)).sum();
        assert_eq!(counted, distribution.total());
    }

    #[test]
    fn test_distribution_serializes_with_tier_names() {
        let mut distribution = RiskDistribution::default();
        distribution.record(RiskLevel::High);
        let json = serde_json::to_value(distribution).unwrap();
        assert_eq!(json["HIGH"], 1);
        assert_eq!(json["LOW"], 0);
    }
}
