//! Mathematical utilities: standardization and the logistic link.

pub mod logistic;

pub use logistic::*;
