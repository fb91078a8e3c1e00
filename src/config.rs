//! Analysis configuration.
//!
//! Every tunable lives in one immutable [`AnalysisConfig`] value that is passed
//! to the components that need it. Defaults reproduce the reference constants;
//! a JSON file may override any subset of them.
//!
//! ```json
//! { "window_size": 40, "knot": { "writhe_threshold": 6.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default window length for the sliding scan
pub const DEFAULT_WINDOW_SIZE: usize = 30;

/// Default offset between consecutive windows
pub const DEFAULT_STRIDE: usize = 15;

/// Default minimum stem length (accepted but not used by the pairing score)
pub const DEFAULT_MIN_STEM_LENGTH: usize = 4;

/// Whole-sequence folds above this length are skipped (O(n³) time, O(n²) space)
pub const DEFAULT_MAX_FOLD_LENGTH: usize = 5000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Window size must be positive")]
    ZeroWindowSize,

    #[error("Stride must be positive")]
    ZeroStride,

    #[error("Invalid value for {name}: {value} (must be finite and non-negative)")]
    InvalidValue { name: &'static str, value: f64 },

    #[error("Risk thresholds must be ascending: medium {medium} <= high {high} <= critical {critical}")]
    UnorderedRiskThresholds { medium: f64, high: f64, critical: f64 },
}

/// Top-level configuration for prediction and knot scanning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of each scanned window
    pub window_size: usize,

    /// Offset between consecutive window starts
    pub stride: usize,

    /// Minimum stem length.
    ///
    /// Accepted for compatibility; the pair-count maximization does not
    /// currently enforce it.
    pub min_stem_length: usize,

    /// Longest sequence folded as a whole; longer ones are only scanned
    pub max_fold_length: usize,

    pub knot: KnotConfig,

    pub validation: ValidationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            stride: DEFAULT_STRIDE,
            min_stem_length: DEFAULT_MIN_STEM_LENGTH,
            max_fold_length: DEFAULT_MAX_FOLD_LENGTH,
            knot: KnotConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file, filling unspecified fields with defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read,
    /// `ConfigError::ParseError` for invalid JSON, or a validation error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a configuration from a JSON string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` for invalid JSON or a validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        self.knot.validate()?;
        self.validation.validate()
    }
}

/// Thresholds and weights for knot detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnotConfig {
    /// `|writhe|` at or above this marks a window knot-prone
    pub writhe_threshold: f64,

    /// Crossing count at or above this marks a window knot-prone
    pub crossing_threshold: usize,

    pub weights: ComplexityWeights,

    pub scales: ComplexityScales,

    pub nesting: NestingWeights,

    pub risk: RiskThresholds,
}

impl Default for KnotConfig {
    fn default() -> Self {
        Self {
            writhe_threshold: 8.0,
            crossing_threshold: 2,
            weights: ComplexityWeights::default(),
            scales: ComplexityScales::default(),
            nesting: NestingWeights::default(),
            risk: RiskThresholds::default(),
        }
    }
}

impl KnotConfig {
    /// Knot-prone if either the writhe or the crossing count reaches its threshold
    #[must_use]
    pub fn is_knot_prone(&self, writhe: f64, crossing_count: usize) -> bool {
        writhe.abs() >= self.writhe_threshold || crossing_count >= self.crossing_threshold
    }

    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("knot.writhe_threshold", self.writhe_threshold)?;
        self.weights.validate()?;
        self.scales.validate()?;
        self.nesting.validate()?;
        self.risk.validate()
    }
}

/// Weights of the four terms of the complexity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityWeights {
    pub writhe: f64,
    pub crossings: f64,
    pub linking: f64,
    pub nesting: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        Self {
            writhe: 0.3,
            crossings: 0.3,
            linking: 0.2,
            nesting: 0.2,
        }
    }
}

impl ComplexityWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("knot.weights.writhe", self.writhe)?;
        check_non_negative("knot.weights.crossings", self.crossings)?;
        check_non_negative("knot.weights.linking", self.linking)?;
        check_non_negative("knot.weights.nesting", self.nesting)
    }
}

/// Saturation points: each raw term is divided by its scale and capped at 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityScales {
    pub writhe: f64,
    pub crossings: f64,
    pub linking: f64,
}

impl Default for ComplexityScales {
    fn default() -> Self {
        Self {
            writhe: 2.0,
            crossings: 3.0,
            linking: 5.0,
        }
    }
}

impl ComplexityScales {
    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("knot.scales.writhe", self.writhe)?;
        check_positive("knot.scales.crossings", self.crossings)?;
        check_positive("knot.scales.linking", self.linking)
    }
}

/// Parameters of the nesting-complexity sub-score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestingWeights {
    /// Depth at which the depth term saturates
    pub depth_scale: f64,
    pub depth: f64,
    pub transitions: f64,
}

impl Default for NestingWeights {
    fn default() -> Self {
        Self {
            depth_scale: 10.0,
            depth: 0.6,
            transitions: 0.4,
        }
    }
}

impl NestingWeights {
    fn validate(&self) -> Result<(), ConfigError> {
        check_positive("knot.nesting.depth_scale", self.depth_scale)?;
        check_non_negative("knot.nesting.depth", self.depth)?;
        check_non_negative("knot.nesting.transitions", self.transitions)
    }
}

/// Exclusive upper bounds of the LOW, MEDIUM and HIGH tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub medium: f64,
    pub high: f64,
    pub critical: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            medium: 0.1,
            high: 0.2,
            critical: 0.3,
        }
    }
}

impl RiskThresholds {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("knot.risk.medium", self.medium)?;
        check_non_negative("knot.risk.high", self.high)?;
        check_non_negative("knot.risk.critical", self.critical)?;
        if self.medium <= self.high && self.high <= self.critical {
            Ok(())
        } else {
            Err(ConfigError::UnorderedRiskThresholds {
                medium: self.medium,
                high: self.high,
                critical: self.critical,
            })
        }
    }
}

/// Rules applied to input sequences before analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Shorter sequences are rejected
    pub min_length: usize,

    /// Sequences with a larger fraction of `N` are rejected
    pub max_n_fraction: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_length: 20,
            max_n_fraction: 0.1,
        }
    }
}

impl ValidationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("validation.max_n_fraction", self.max_n_fraction)
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.window_size, 30);
        assert_eq!(config.stride, 15);
        assert_eq!(config.min_stem_length, 4);
        assert!((config.knot.writhe_threshold - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.knot.crossing_threshold, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            AnalysisConfig::from_json(r#"{"window_size": 40, "knot": {"crossing_threshold": 5}}"#)
                .unwrap();
        assert_eq!(config.window_size, 40);
        assert_eq!(config.stride, DEFAULT_STRIDE);
        assert_eq!(config.knot.crossing_threshold, 5);
        assert_eq!(config.knot.weights, ComplexityWeights::default());
    }

    #[test]
    fn test_rejects_zero_stride() {
        let err = AnalysisConfig::from_json(r#"{"stride": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroStride));

        let err = AnalysisConfig::from_json(r#"{"window_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroWindowSize));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let err =
            AnalysisConfig::from_json(r#"{"knot": {"weights": {"writhe": -1.0}}}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "knot.weights.writhe",
                ..
            }
        ));

        let err = AnalysisConfig::from_json(r#"{"knot": {"risk": {"medium": 0.5}}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnorderedRiskThresholds { .. }));
    }

    #[test]
    fn test_knot_prone() {
        let knot = KnotConfig::default();
        assert!(knot.is_knot_prone(8.0, 0));
        assert!(knot.is_knot_prone(-8.0, 0));
        assert!(knot.is_knot_prone(0.0, 2));
        assert!(!knot.is_knot_prone(7.9, 1));
    }

    #[test]
    fn test_load_from_file() {
        let mut temp = NamedTempFile::with_suffix(".json").unwrap();
        temp.write_all(br#"{"stride": 5}"#).unwrap();
        temp.flush().unwrap();

        let config = AnalysisConfig::load_from_file(temp.path()).unwrap();
        assert_eq!(config.stride, 5);

        assert!(matches!(
            AnalysisConfig::load_from_file(Path::new("/nonexistent/config.json")),
            Err(ConfigError::ReadError(_))
        ));
    }
}
