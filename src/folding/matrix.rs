/// Maximum pair counts for every subsequence `i..=j` of one sequence.
///
/// Only the upper triangle is populated. Reads of an empty range (`i > j`)
/// return 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatrix {
    n: usize,
    cells: Vec<u32>,
}

impl ScoreMatrix {
    /// A zeroed `n × n` matrix
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    /// Side length (the sequence length)
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Score of the range `i..=j`, 0 for empty or out-of-bounds ranges
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> u32 {
        if i > j || j >= self.n {
            0
        } else {
            self.cells[i * self.n + j]
        }
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: u32) {
        self.cells[i * self.n + j] = value;
    }

    /// Score of the range `i+1..=k-1` enclosed by a pair `(i, k)`
    #[must_use]
    pub fn enclosed(&self, i: usize, k: usize) -> u32 {
        if k > i + 1 {
            self.get(i + 1, k - 1)
        } else {
            0
        }
    }

    /// Score of the range `k+1..=j` following a pair closing at `k`
    #[must_use]
    pub fn trailing(&self, k: usize, j: usize) -> u32 {
        if k < j {
            self.get(k + 1, j)
        } else {
            0
        }
    }

    /// Maximum pair count for the whole sequence
    #[must_use]
    pub fn total(&self) -> u32 {
        if self.n == 0 {
            0
        } else {
            self.get(0, self.n - 1)
        }
    }

    /// Row `i` of the matrix (all `n` columns, lower triangle zero)
    #[must_use]
    pub fn row(&self, i: usize) -> &[u32] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }
}
