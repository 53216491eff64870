//! The scoring engine.
//!
//! Pipeline for one applicant:
//!
//! ```text
//! validate -> encode categories -> standardize -> z = b0 + Σ b_i x_i
//!          -> p = sigmoid(z) -> score = round(100 p) -> tier
//! ```
//!
//! The engine owns a validated [`ModelParameters`] and nothing else, so it is
//! `Send + Sync` and a single instance can serve any number of threads.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{Applicant, RawApplicant, RiskCategory, ScoreResult};
use crate::error::ScoringError;
use crate::math::{sigmoid, standardize, to_integer_score};
use crate::models::{Feature, ModelParameters};
use crate::scoring::breakdown::{FeatureContribution, ScoreBreakdown};

/// Scores below this are LOW risk.
pub const MEDIUM_RISK_FLOOR: u8 = 30;
/// Scores at or above this are HIGH risk.
pub const HIGH_RISK_FLOOR: u8 = 70;

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    params: ModelParameters,
}

impl ScoringEngine {
    /// Parameters are validated when `ModelParameters` is built, so an engine
    /// can never hold a malformed model.
    pub fn new(params: ModelParameters) -> Self {
        Self { params }
    }

    /// Engine over the shipped reference coefficients.
    pub fn reference() -> Self {
        Self::new(ModelParameters::reference())
    }

    pub fn params(&self) -> &ModelParameters {
        &self.params
    }

    /// Score one applicant.
    pub fn score(&self, applicant: &Applicant) -> Result<ScoreResult, ScoringError> {
        self.explain(applicant).map(|b| b.result)
    }

    /// Score a record-store row, rejecting unknown categories before any
    /// numeric work.
    pub fn score_raw(&self, raw: &RawApplicant) -> Result<ScoreResult, ScoringError> {
        let applicant = Applicant::try_from(raw)?;
        self.score(&applicant)
    }

    /// Score one applicant and keep every intermediate term.
    pub fn explain(&self, applicant: &Applicant) -> Result<ScoreBreakdown, ScoringError> {
        applicant.validate()?;

        let intercept = self.params.intercept();
        let mut z = intercept;
        let mut contributions = Vec::with_capacity(Feature::PREDICTORS.len());
        for (feature, raw) in encode(applicant) {
            let p = self.params.get(feature);
            let standardized = ensure_finite(
                feature.name(),
                "standardized value",
                standardize(feature.name(), raw, p.mean, p.std)?,
            )?;
            let contribution = ensure_finite(feature.name(), "contribution", p.coefficient * standardized)?;
            z += contribution;
            contributions.push(FeatureContribution {
                feature,
                raw,
                standardized,
                coefficient: p.coefficient,
                contribution,
            });
        }

        let z = ensure_finite("z", "linear score", z)?;
        let probability_of_default = sigmoid(z);
        let credit_score = to_integer_score(probability_of_default);
        let result = ScoreResult {
            probability_of_default,
            credit_score,
            risk_category: classify_risk(credit_score),
        };

        debug!(
            applicant = applicant.display_id(),
            z,
            pd = probability_of_default,
            score = credit_score,
            tier = %result.risk_category,
            "scored applicant"
        );

        Ok(ScoreBreakdown {
            intercept,
            contributions,
            z,
            result,
        })
    }

    /// Score many applicants independently, in parallel.
    ///
    /// Output order matches input order; one bad record does not affect the
    /// others.
    pub fn score_batch(&self, applicants: &[Applicant]) -> Vec<Result<ScoreResult, ScoringError>> {
        applicants.par_iter().map(|a| self.score(a)).collect()
    }
}

/// Map a credit score onto its risk tier.
///
/// Bands are closed below and open above: 30 is MEDIUM, 70 is HIGH.
pub fn classify_risk(score: u8) -> RiskCategory {
    match score {
        s if s < MEDIUM_RISK_FLOOR => RiskCategory::Low,
        s if s < HIGH_RISK_FLOOR => RiskCategory::Medium,
        _ => RiskCategory::High,
    }
}

/// A validated model can still overflow on extreme inputs; never let that
/// reach the sigmoid as NaN or infinity.
fn ensure_finite(feature: &'static str, quantity: &'static str, value: f64) -> Result<f64, ScoringError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NumericOverflow {
            feature,
            quantity,
            value,
        })
    }
}

/// Raw (unscaled) value of each predictor, in evaluation order.
fn encode(applicant: &Applicant) -> [(Feature, f64); 5] {
    [
        (Feature::Income, applicant.income),
        (Feature::LoanAmount, applicant.loan_amount),
        (Feature::CreditHistory, applicant.credit_history),
        (Feature::WorkExperience, f64::from(applicant.work_experience.ordinal())),
        (Feature::HomeOwnership, f64::from(applicant.home_ownership.ordinal())),
    ]
}
