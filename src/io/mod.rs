//! Input/output helpers.
//!
//! - applicant CSV ingest + validation (`applicants`)
//! - result and applicant CSV exports (`export`)
//! - model JSON read/write (`model_json`)
//!
//! Storage lives here, outside the scoring core: the engine returns values and
//! these functions decide how they are persisted.

pub mod applicants;
pub mod export;
pub mod model_json;

pub use applicants::*;
pub use export::*;
pub use model_json::*;
