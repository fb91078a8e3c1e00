use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ConfigError};
use crate::folding::engine::{PairingEngine, Prediction};

/// Half-open `[start, end)` offsets of one window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpan {
    pub start: usize,
    pub end: usize,
}

/// Lazy iterator over window offsets `0, stride, 2·stride, …`.
///
/// A window is produced only while `start + window_size < length`, so a window
/// ending exactly at the sequence end is never emitted, and a sequence no
/// longer than the window produces nothing.
#[derive(Debug, Clone)]
pub struct SlidingWindows {
    next_start: usize,
    window_size: usize,
    stride: usize,
    length: usize,
}

impl SlidingWindows {
    fn remaining(&self) -> usize {
        let slack = self
            .next_start
            .checked_add(self.window_size)
            .and_then(|end| self.length.checked_sub(end));
        match slack {
            Some(slack) if slack > 0 => (slack - 1) / self.stride + 1,
            _ => 0,
        }
    }
}

impl Iterator for SlidingWindows {
    type Item = WindowSpan;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_start;
        let end = start.checked_add(self.window_size)?;
        if end >= self.length {
            return None;
        }
        self.next_start = start.saturating_add(self.stride);
        Some(WindowSpan { start, end })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlidingWindows {}

/// One window of a named sequence, not yet folded
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub sequence_id: &'a str,
    pub span: WindowSpan,
    pub bases: &'a [u8],
}

impl Window<'_> {
    /// Fold this window on its own
    #[must_use]
    pub fn fold(&self, engine: &PairingEngine) -> WindowPrediction {
        let bases = String::from_utf8_lossy(self.bases);
        WindowPrediction {
            sequence_id: self.sequence_id.to_string(),
            window_start: self.span.start,
            window_end: self.span.end,
            prediction: engine.predict(&bases),
        }
    }
}

/// Structure predicted for one window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPrediction {
    pub sequence_id: String,
    pub window_start: usize,
    pub window_end: usize,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// Applies the pairing engine to fixed-size windows of a longer sequence
#[derive(Debug, Clone)]
pub struct WindowScanner {
    window_size: usize,
    stride: usize,
    engine: PairingEngine,
}

impl WindowScanner {
    /// Create a scanner
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindowSize` or `ConfigError::ZeroStride`.
    pub fn new(window_size: usize, stride: usize) -> Result<Self, ConfigError> {
        if window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        Ok(Self {
            window_size,
            stride,
            engine: PairingEngine::new(),
        })
    }

    /// Create a scanner from the window settings of a configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ZeroWindowSize` or `ConfigError::ZeroStride`.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        Self::new(config.window_size, config.stride)
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn engine(&self) -> &PairingEngine {
        &self.engine
    }

    /// Window offsets for a sequence of the given length
    #[must_use]
    pub fn spans(&self, length: usize) -> SlidingWindows {
        SlidingWindows {
            next_start: 0,
            window_size: self.window_size,
            stride: self.stride,
            length,
        }
    }

    /// Unfolded windows of one sequence
    pub fn windows<'a>(
        &self,
        sequence_id: &'a str,
        sequence: &'a str,
    ) -> impl Iterator<Item = Window<'a>> + Clone {
        let bases = sequence.as_bytes();
        self.spans(bases.len()).map(move |span| Window {
            sequence_id,
            span,
            bases: &bases[span.start..span.end],
        })
    }

    /// Lazily fold every window of one sequence
    pub fn scan<'a>(
        &'a self,
        sequence_id: &'a str,
        sequence: &'a str,
    ) -> impl Iterator<Item = WindowPrediction> + 'a {
        self.windows(sequence_id, sequence)
            .map(move |window| window.fold(&self.engine))
    }
}
