use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::structure::Structure;
use crate::core::types::BasePair;
use crate::folding::complement::can_pair;
use crate::folding::matrix::ScoreMatrix;

/// Predicted structure for one sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub sequence: String,
    pub structure: Structure,
    /// Number of base pairs (equal to the matrix score of the full range)
    pub base_pairs: usize,
}

impl Prediction {
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Maximum base-pairing predictor.
///
/// Fills an O(n²) score matrix in O(n³) time and traces back one optimal,
/// properly nested structure. No energy terms are modelled; only the pair
/// count is maximized.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairingEngine;

impl PairingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fill the score matrix.
    ///
    /// For each range `i..=j`, either `j` stays unpaired (`m[i][j-1]`) or `i`
    /// pairs with a complementary `k` in `i..=j`, scoring
    /// `1 + m[i+1][k-1] + m[k+1][j]`. There is no minimum hairpin loop, so
    /// adjacent bases may pair. Bases outside the pairing table never pair.
    #[must_use]
    pub fn compute_max_pairing(&self, sequence: &[u8]) -> ScoreMatrix {
        let n = sequence.len();
        let mut matrix = ScoreMatrix::new(n);

        for length in 2..=n {
            for i in 0..=(n - length) {
                let j = i + length - 1;
                let mut best = matrix.get(i, j - 1);

                for k in i..=j {
                    if can_pair(sequence[i], sequence[k]) {
                        let score = 1 + matrix.enclosed(i, k) + matrix.trailing(k, j);
                        best = best.max(score);
                    }
                }

                matrix.set(i, j, best);
            }
        }

        matrix
    }

    /// Trace back one optimal structure from a filled matrix.
    ///
    /// Tie-break rules, applied to every range `i..=j`:
    /// 1. If `m[i][j] == m[i][j-1]`, `j` is left unpaired. This is checked
    ///    before any partner search, so a tie between skipping `j` and pairing
    ///    always skips.
    /// 2. Otherwise the first `k` in ascending order whose pair score equals
    ///    `m[i][j]` is taken, and `i+1..=k-1` and `k+1..=j` are resolved
    ///    independently.
    ///
    /// Pending ranges are kept on an explicit stack, so long sequences do not
    /// recurse.
    #[must_use]
    pub fn reconstruct_optimal(&self, sequence: &[u8], matrix: &ScoreMatrix) -> Structure {
        let n = sequence.len();
        let mut pairs = Vec::with_capacity(matrix.total() as usize);
        let mut pending: Vec<(usize, usize)> = Vec::new();
        if n > 0 {
            pending.push((0, n - 1));
        }

        while let Some((i, mut j)) = pending.pop() {
            while i < j {
                if matrix.get(i, j) == matrix.get(i, j - 1) {
                    j -= 1;
                    continue;
                }

                if let Some(k) = first_partner(sequence, matrix, i, j) {
                    pairs.push(BasePair::new(i, k));
                    if k > i + 1 {
                        pending.push((i + 1, k - 1));
                    }
                    if k < j {
                        pending.push((k + 1, j));
                    }
                }
                break;
            }
        }

        Structure::from_pairs(n, &pairs)
    }

    /// Fold a sequence, keeping the score matrix for inspection
    #[must_use]
    pub fn fold(&self, sequence: &str) -> (Prediction, ScoreMatrix) {
        let bases = sequence.as_bytes();
        let matrix = self.compute_max_pairing(bases);
        let structure = self.reconstruct_optimal(bases, &matrix);
        let base_pairs = matrix.total() as usize;

        trace!(length = bases.len(), base_pairs, "folded sequence");

        let prediction = Prediction {
            sequence: sequence.to_string(),
            structure,
            base_pairs,
        };
        (prediction, matrix)
    }

    /// Fold a sequence, discarding the score matrix
    #[must_use]
    pub fn predict(&self, sequence: &str) -> Prediction {
        self.fold(sequence).0
    }
}

/// First `k` (ascending) whose pairing with `i` reproduces `m[i][j]`
fn first_partner(sequence: &[u8], matrix: &ScoreMatrix, i: usize, j: usize) -> Option<usize> {
    let target = matrix.get(i, j);
    (i..=j).find(|&k| {
        can_pair(sequence[i], sequence[k])
            && 1 + matrix.enclosed(i, k) + matrix.trailing(k, j) == target
    })
}
