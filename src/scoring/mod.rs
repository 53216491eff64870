//! Probability-of-default scoring.
//!
//! - `engine`: the `ScoringEngine` and risk-tier classification
//! - `breakdown`: per-feature contributions behind a score

pub mod breakdown;
pub mod engine;

pub use breakdown::*;
pub use engine::*;
