//! `credit-risk-scoring` library crate.
//!
//! The binary (`crs`) is a thin wrapper around this library so that:
//!
//! - the scoring core is testable without spawning processes
//! - a record store or service can embed `scoring::ScoringEngine` directly
//! - storage (CSV/JSON) stays separate from the pure scoring computation

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod report;
pub mod scoring;
