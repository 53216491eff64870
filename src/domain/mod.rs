//! Domain types used throughout the tool.
//!
//! This module defines:
//!
//! - applicant categories (`WorkExperience`, `HomeOwnership`)
//! - applicant records (`Applicant`, `RawApplicant`)
//! - scoring outputs (`ScoreResult`, `RiskCategory`, `ScoredApplicant`)

pub mod types;

pub use types::*;
