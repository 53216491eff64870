//! Error types.
//!
//! Two layers:
//! - [`ScoringError`]: typed failures raised by the scoring core (bad categories,
//!   bad applicant values, malformed model parameters)
//! - [`AppError`]: what the `crs` binary reports, carrying a process exit code

use thiserror::Error;

/// Exit code for input, configuration, and I/O problems.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for applicant data the model cannot score.
pub const EXIT_DATA: u8 = 3;
/// Exit code for internal or numeric failures.
pub const EXIT_INTERNAL: u8 = 4;

/// Failures raised by the scoring core.
///
/// Every variant names the field or feature involved so a caller can tell which
/// part of the record or model file is at fault.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A categorical applicant field holds a value outside its enumeration.
    #[error("invalid {field} category '{value}'")]
    InvalidCategory { field: &'static str, value: String },

    /// A numeric applicant field is unusable (negative, NaN, infinite).
    #[error("invalid applicant {field}: {reason}")]
    InvalidApplicant { field: &'static str, reason: String },

    /// A model term evaluated to a non-finite value for this applicant.
    #[error("non-finite {quantity} for '{feature}': {value}")]
    NumericOverflow {
        feature: &'static str,
        quantity: &'static str,
        value: f64,
    },

    /// The model parameters are malformed (missing term, zero std, ...).
    #[error("invalid model parameter '{feature}': {reason}")]
    InvalidModelParameter { feature: String, reason: String },
}

impl ScoringError {
    pub(crate) fn model(feature: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidModelParameter {
            feature: feature.into(),
            reason: reason.into(),
        }
    }

    /// Exit code the binary uses when this error aborts a run.
    pub fn exit_code(&self) -> u8 {
        match self {
            ScoringError::InvalidCategory { .. } | ScoringError::InvalidApplicant { .. } => EXIT_DATA,
            ScoringError::InvalidModelParameter { .. } => EXIT_INPUT,
            ScoringError::NumericOverflow { .. } => EXIT_INTERNAL,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
