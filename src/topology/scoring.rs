use serde::{Deserialize, Serialize};

use crate::config::{ComplexityScales, ComplexityWeights, RiskThresholds};
use crate::core::types::RiskLevel;

/// Topology signals for one structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotMetrics {
    pub writhe: f64,
    pub crossing_count: usize,
    /// `(min(i1, i2), max(i1, i2))` for every crossing pair of pairs
    pub crossing_positions: Vec<(usize, usize)>,
    pub linking_number: f64,
    pub knot_prone: bool,
    /// Weighted composite in `[0, 1]`
    pub complexity_score: f64,
    pub risk_level: RiskLevel,
}

/// Knot analysis of one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnotRecord {
    #[serde(flatten)]
    pub metrics: KnotMetrics,
    pub window_start: usize,
    pub window_end: usize,
    pub sequence_id: String,
}

impl KnotRecord {
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        self.metrics.risk_level
    }

    #[must_use]
    pub fn complexity_score(&self) -> f64 {
        self.metrics.complexity_score
    }
}

/// Raw inputs of the complexity score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexityTerms {
    pub writhe: f64,
    pub crossing_count: usize,
    pub linking_number: f64,
    pub nesting_complexity: f64,
}

/// Combine the four terms into a score clamped to `[0, 1]`.
///
/// Writhe, crossing count and linking number are each divided by their scale
/// and capped at 1 before weighting; nesting complexity is already in `[0, 1]`.
#[must_use]
pub fn complexity_score(
    terms: &ComplexityTerms,
    weights: &ComplexityWeights,
    scales: &ComplexityScales,
) -> f64 {
    let writhe = saturate(terms.writhe.abs(), scales.writhe);
    let crossings = saturate(count_to_f64(terms.crossing_count), scales.crossings);
    let linking = saturate(terms.linking_number.abs(), scales.linking);

    let score = writhe * weights.writhe
        + crossings * weights.crossings
        + linking * weights.linking
        + terms.nesting_complexity * weights.nesting;

    score.clamp(0.0, 1.0)
}

impl RiskThresholds {
    /// Map a complexity score to its tier.
    ///
    /// Each bound is exclusive for the lower tier: a score equal to a bound
    /// falls into the next tier up.
    #[must_use]
    pub fn classify(&self, score: f64) -> RiskLevel {
        if score < self.medium {
            RiskLevel::Low
        } else if score < self.high {
            RiskLevel::Medium
        } else if score < self.critical {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

fn saturate(value: f64, scale: f64) -> f64 {
    (value / scale).min(1.0)
}

/// Convert a count to f64 for ratio calculations
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(writhe: f64, crossing_count: usize, linking: f64, nesting: f64) -> ComplexityTerms {
        ComplexityTerms {
            writhe,
            crossing_count,
            linking_number: linking,
            nesting_complexity: nesting,
        }
    }

    #[test]
    fn test_risk_boundaries_fall_into_next_tier() {
        let risk = RiskThresholds::default();
        assert_eq!(risk.classify(0.0), RiskLevel::Low);
        assert_eq!(risk.classify(0.099), RiskLevel::Low);
        assert_eq!(risk.classify(0.1), RiskLevel::Medium);
        assert_eq!(risk.classify(0.2), RiskLevel::High);
        assert_eq!(risk.classify(0.3), RiskLevel::Critical);
        assert_eq!(risk.classify(1.0), RiskLevel::Critical);
    }

    #[test]
    fn test_custom_thresholds() {
        let risk = RiskThresholds {
            medium: 0.5,
            high: 0.6,
            critical: 0.9,
        };
        assert_eq!(risk.classify(0.3), RiskLevel::Low);
        assert_eq!(risk.classify(0.6), RiskLevel::High);
    }

    #[test]
    fn test_complexity_weights() {
        let weights = ComplexityWeights::default();
        let scales = ComplexityScales::default();

        assert!(complexity_score(&terms(0.0, 0, 0.0, 0.0), &weights, &scales).abs() < 1e-12);

        // writhe 1 -> 0.5 * 0.3; one crossing -> 1/3 * 0.3; linking 2 -> 0.4 * 0.2
        let score = complexity_score(&terms(-1.0, 1, 2.0, 0.5), &weights, &scales);
        let expected = 0.15 + 0.1 + 0.08 + 0.1;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_complexity_saturates_and_clamps() {
        let weights = ComplexityWeights::default();
        let scales = ComplexityScales::default();
        let score = complexity_score(&terms(100.0, 100, 100.0, 1.0), &weights, &scales);
        assert!((score - 1.0).abs() < 1e-12);

        let heavy = ComplexityWeights {
            writhe: 2.0,
            ..ComplexityWeights::default()
        };
        assert!((complexity_score(&terms(100.0, 0, 0.0, 0.0), &heavy, &scales) - 1.0).abs() < 1e-12);
    }
}
