//! Secondary structure prediction by base-pair maximization.
//!
//! - [`PairingEngine`]: fills the maximum-pairing [`ScoreMatrix`] for one
//!   sequence and traces back a single optimal, properly nested structure
//! - [`WindowScanner`]: applies the engine to fixed-size windows across a
//!   longer sequence
//!
//! ## Example
//!
//! ```rust
//! use knotfold::folding::{PairingEngine, WindowScanner};
//!
//! let engine = PairingEngine::new();
//! let prediction = engine.predict("GGGGCCCC");
//! assert_eq!(prediction.structure.as_str(), "(((())))");
//! assert_eq!(prediction.base_pairs, 4);
//!
//! let scanner = WindowScanner::new(8, 4).unwrap();
//! let windows: Vec<_> = scanner.scan("seq1", "GGGGCCCCGGGGCCCCA").collect();
//! assert_eq!(windows.len(), 3);
//! ```

pub mod complement;
pub mod engine;
pub mod matrix;
pub mod window;

pub use engine::{PairingEngine, Prediction};
pub use matrix::ScoreMatrix;
pub use window::{SlidingWindows, Window, WindowPrediction, WindowScanner, WindowSpan};
