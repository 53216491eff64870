//! Logistic-regression model parameters.
//!
//! `model` holds the validated in-memory form; `model_file` the JSON schema the
//! training job writes.

pub mod model;
pub mod model_file;

pub use model::*;
pub use model_file::*;
