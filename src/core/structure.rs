use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::BasePair;

pub const OPEN: char = '(';
pub const CLOSE: char = ')';
pub const UNPAIRED: char = '.';

#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureError {
    #[error("Invalid dot-bracket character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Unmatched ')' at position {0}")]
    UnmatchedClose(usize),

    #[error("Unmatched '(' at position {0}")]
    UnmatchedOpen(usize),
}

/// A secondary structure in dot-bracket notation.
///
/// Structures built by this crate are always balanced and properly nested;
/// [`Structure::parse`] enforces the same for externally supplied strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Structure(String);

impl Structure {
    /// An all-unpaired structure of the given length
    #[must_use]
    pub fn unpaired(length: usize) -> Self {
        Self(UNPAIRED.to_string().repeat(length))
    }

    /// Render a set of non-crossing pairs over `length` positions.
    ///
    /// Pairs referencing positions outside `0..length` are ignored.
    #[must_use]
    pub fn from_pairs(length: usize, pairs: &[BasePair]) -> Self {
        let mut chars = vec![UNPAIRED; length];
        for pair in pairs {
            if pair.j < length {
                chars[pair.i] = OPEN;
                chars[pair.j] = CLOSE;
            }
        }
        Self(chars.into_iter().collect())
    }

    /// Parse and validate a dot-bracket string
    ///
    /// # Errors
    ///
    /// Returns `StructureError::InvalidCharacter` for anything other than `(`, `)`
    /// or `.`, and `StructureError::UnmatchedClose`/`UnmatchedOpen` when brackets
    /// do not balance.
    pub fn parse(s: &str) -> Result<Self, StructureError> {
        let mut open: Vec<usize> = Vec::new();
        for (position, character) in s.chars().enumerate() {
            match character {
                OPEN => open.push(position),
                CLOSE => {
                    if open.pop().is_none() {
                        return Err(StructureError::UnmatchedClose(position));
                    }
                }
                UNPAIRED => {}
                _ => {
                    return Err(StructureError::InvalidCharacter {
                        character,
                        position,
                    })
                }
            }
        }
        if let Some(&position) = open.last() {
            return Err(StructureError::UnmatchedOpen(position));
        }
        Ok(Self(s.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of `(` characters, equal to the number of base pairs
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.0.chars().filter(|&c| c == OPEN).count()
    }

    /// Extract base pairs with a stack parse, sorted by opening position.
    ///
    /// A `)` with no open partner is skipped.
    #[must_use]
    pub fn base_pairs(&self) -> Vec<BasePair> {
        let mut pairs = Vec::with_capacity(self.pair_count());
        let mut stack = Vec::new();
        for (position, c) in self.0.chars().enumerate() {
            match c {
                OPEN => stack.push(position),
                CLOSE => {
                    if let Some(open) = stack.pop() {
                        pairs.push(BasePair::new(open, position));
                    }
                }
                _ => {}
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Locate stems, loops and hairpin loops
    #[must_use]
    pub fn motifs(&self) -> Motifs {
        let chars: Vec<char> = self.0.chars().collect();
        let mut motifs = Motifs::default();

        let mut pos = 0;
        while pos < chars.len() {
            let c = chars[pos];
            if c != OPEN && c != UNPAIRED {
                pos += 1;
                continue;
            }

            let start = pos;
            while pos < chars.len() && chars[pos] == c {
                pos += 1;
            }
            let span = (start, pos - 1);

            if c == OPEN {
                motifs.stems.push(span);
            } else {
                motifs.loops.push(span);
                let closed_by_pair = start > 0
                    && chars[start - 1] == OPEN
                    && chars.get(pos).is_some_and(|&next| next == CLOSE);
                if closed_by_pair {
                    motifs.hairpins.push(span);
                }
            }
        }

        motifs
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Structure {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Structural motifs as inclusive `(start, end)` spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Motifs {
    /// Maximal runs of `(`
    pub stems: Vec<(usize, usize)>,
    /// Maximal runs of `.`
    pub loops: Vec<(usize, usize)>,
    /// Unpaired runs closed directly by a pair, `(...)`
    pub hairpins: Vec<(usize, usize)>,
}
