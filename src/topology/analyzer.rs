use crate::config::KnotConfig;
use crate::core::structure::{Structure, CLOSE, OPEN};
use crate::core::types::BasePair;
use crate::folding::window::WindowPrediction;
use crate::topology::scoring::{complexity_score, count_to_f64, ComplexityTerms, KnotMetrics, KnotRecord};

/// Signed twist proxy from bracket closure order.
///
/// Each `(` pushes the stack length at the moment it opens. Each `)` pops the
/// most recent rank `r` and adds `sign((len_before_pop - 1) - r)`. Unmatched
/// `)` are ignored.
#[must_use]
pub fn compute_writhe(structure: &Structure) -> f64 {
    let mut writhe = 0.0;
    let mut stack: Vec<usize> = Vec::new();

    for c in structure.as_str().chars() {
        match c {
            OPEN => stack.push(stack.len()),
            CLOSE => {
                let depth = stack.len();
                if let Some(rank) = stack.pop() {
                    writhe += signum(depth - 1, rank);
                }
            }
            _ => {}
        }
    }

    writhe
}

/// Find every interleaving pair of base pairs.
///
/// Works on any pair set, including merged sets from several structures. Each
/// crossing is reported as `(min(i1, i2), max(i1, i2))`, in input order.
#[must_use]
pub fn identify_crossings(pairs: &[BasePair]) -> Vec<(usize, usize)> {
    let mut crossings = Vec::new();
    for (index, first) in pairs.iter().enumerate() {
        for second in &pairs[index + 1..] {
            if first.crosses(second) {
                crossings.push((first.i.min(second.i), first.i.max(second.i)));
            }
        }
    }
    crossings
}

/// 1 if any pair encloses at least one position, otherwise 0
#[must_use]
pub fn nesting_indicator(pairs: &[BasePair]) -> f64 {
    if pairs.iter().any(BasePair::encloses_position) {
        1.0
    } else {
        0.0
    }
}

fn signum(a: usize, b: usize) -> f64 {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => -1.0,
        std::cmp::Ordering::Equal => 0.0,
        std::cmp::Ordering::Greater => 1.0,
    }
}

/// Scores structures for knot risk
#[derive(Debug, Clone, Default)]
pub struct TopologyAnalyzer {
    config: KnotConfig,
}

impl TopologyAnalyzer {
    #[must_use]
    pub fn new(config: KnotConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &KnotConfig {
        &self.config
    }

    /// Nesting complexity in `[0, 1]`.
    ///
    /// Combines the maximum bracket depth (saturating at `depth_scale`) with the
    /// fraction of positions where the depth changes from the previous one.
    #[must_use]
    pub fn nesting_complexity(&self, structure: &Structure) -> f64 {
        if structure.is_empty() {
            return 0.0;
        }

        let mut depth: i64 = 0;
        let mut max_depth: i64 = 0;
        let mut previous: i64 = 0;
        let mut transitions = 0usize;

        for c in structure.as_str().chars() {
            match c {
                OPEN => depth += 1,
                CLOSE => depth -= 1,
                _ => {}
            }
            max_depth = max_depth.max(depth);
            if depth != previous {
                transitions += 1;
            }
            previous = depth;
        }

        let weights = &self.config.nesting;
        #[allow(clippy::cast_precision_loss)]
        let depth_term = (max_depth as f64 / weights.depth_scale).min(1.0);
        let transition_term = (count_to_f64(transitions) / count_to_f64(structure.len())).min(1.0);

        depth_term * weights.depth + transition_term * weights.transitions
    }

    /// Compute every topology signal for one structure
    #[must_use]
    pub fn detect_knots(&self, structure: &Structure) -> KnotMetrics {
        let pairs = structure.base_pairs();

        let writhe = compute_writhe(structure);
        let crossing_positions = identify_crossings(&pairs);
        let crossing_count = crossing_positions.len();
        let linking_number = nesting_indicator(&pairs) + writhe;

        let terms = ComplexityTerms {
            writhe,
            crossing_count,
            linking_number,
            nesting_complexity: self.nesting_complexity(structure),
        };
        let complexity_score = complexity_score(&terms, &self.config.weights, &self.config.scales);

        KnotMetrics {
            writhe,
            crossing_count,
            crossing_positions,
            linking_number,
            knot_prone: self.config.is_knot_prone(writhe, crossing_count),
            complexity_score,
            risk_level: self.config.risk.classify(complexity_score),
        }
    }

    /// Analyze one folded window
    #[must_use]
    pub fn analyze_window(&self, window: &WindowPrediction) -> KnotRecord {
        KnotRecord {
            metrics: self.detect_knots(&window.prediction.structure),
            window_start: window.window_start,
            window_end: window.window_end,
            sequence_id: window.sequence_id.clone(),
        }
    }

    /// Analyze folded windows in order
    #[must_use]
    pub fn analyze_windows(&self, windows: &[WindowPrediction]) -> Vec<KnotRecord> {
        windows.iter().map(|w| self.analyze_window(w)).collect()
    }
}
