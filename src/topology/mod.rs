//! Knot-risk heuristics over dot-bracket structures.
//!
//! - [`TopologyAnalyzer`]: writhe, crossing patterns, nesting complexity and a
//!   composite risk score/tier for one structure
//! - [`WindowAggregator`]: reduces per-window [`KnotRecord`]s into a [`Summary`]
//!
//! All signals are 1D proxies computed from bracket structure, not geometric
//! quantities from 3D coordinates.
//!
//! ## Scoring
//!
//! | Term | Raw value | Saturates at | Weight |
//! |------|-----------|--------------|--------|
//! | writhe | `\|writhe\|` | 2 | 0.3 |
//! | crossings | crossing count | 3 | 0.3 |
//! | linking | `\|nesting + writhe\|` | 5 | 0.2 |
//! | nesting | nesting complexity | 1 | 0.2 |
//!
//! Tiers: below 0.1 LOW, below 0.2 MEDIUM, below 0.3 HIGH, otherwise CRITICAL.
//! Every constant is overridable through [`crate::config::KnotConfig`].

pub mod analyzer;
pub mod scoring;
pub mod summary;

pub use analyzer::{compute_writhe, identify_crossings, nesting_indicator, TopologyAnalyzer};
pub use scoring::{complexity_score, ComplexityTerms, KnotMetrics, KnotRecord};
pub use summary::{RiskDistribution, Summary, SummaryError, WindowAggregator};
