use serde::{Deserialize, Serialize};

/// A pair of bound positions `(i, j)` with `i < j`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BasePair {
    pub i: usize,
    pub j: usize,
}

impl BasePair {
    /// Create a pair, ordering the two positions so that `i < j`
    #[must_use]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }

    /// True if at least one position lies strictly between the two ends
    #[must_use]
    pub fn encloses_position(&self) -> bool {
        self.j > self.i + 1
    }

    /// True if the two pairs interleave (`i1 < i2 < j1 < j2` or the mirror case)
    #[must_use]
    pub fn crosses(&self, other: &BasePair) -> bool {
        (self.i < other.i && other.i < self.j && self.j < other.j)
            || (other.i < self.i && self.i < other.j && other.j < self.j)
    }
}

impl From<(usize, usize)> for BasePair {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

impl std::fmt::Display for BasePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Knot-risk tier for a single analyzed window
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// All tiers in ascending order of severity
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    /// HIGH and CRITICAL windows are reported as high-risk regions
    #[must_use]
    pub fn is_high_risk(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}
