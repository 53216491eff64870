//! Numeric primitives of the logistic model.
//!
//! - `standardize`: `(x - mean) / std`, the scaling used at training time
//! - `sigmoid`: `1 / (1 + e^-z)`, evaluated in a form that cannot overflow
//! - `to_integer_score`: probability to a 0..=100 integer score
//!
//! Numerical notes:
//! - The naive `1 / (1 + exp(-z))` overflows `exp` for `z` below about -709.
//!   For `z < 0` we evaluate `e^z / (1 + e^z)` instead, where `e^z <= 1`.
//! - Results saturate to exactly 0.0 / 1.0 only when `|z|` is past the range
//!   an `f64` can distinguish from the limit.

use crate::error::ScoringError;

/// Standardize a raw feature value.
///
/// `feature` is only used to name the offending term in the error.
pub fn standardize(feature: &str, raw: f64, mean: f64, std: f64) -> Result<f64, ScoringError> {
    if !(std.is_finite() && std != 0.0) {
        return Err(ScoringError::model(feature, format!("std must be finite and non-zero, got {std}")));
    }
    Ok((raw - mean) / std)
}

/// Numerically stable logistic function.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Convert a probability to an integer score in `[0, 100]`.
///
/// `f64::round` rounds half away from zero, so `0.125` maps to 13.
pub fn to_integer_score(probability: f64) -> u8 {
    (probability * 100.0).round().clamp(0.0, 100.0) as u8
}
