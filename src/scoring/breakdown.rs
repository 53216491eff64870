//! Per-feature view of a score.
//!
//! A breakdown carries every intermediate value of the linear model so reports
//! can show which inputs pushed the probability of default up or down.

use serde::Serialize;

use crate::domain::ScoreResult;
use crate::models::Feature;

/// One predictor's share of the linear score `z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureContribution {
    pub feature: Feature,
    /// Input value before scaling (categories as their ordinal).
    pub raw: f64,
    pub standardized: f64,
    pub coefficient: f64,
    /// `coefficient * standardized`.
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub intercept: f64,
    /// Predictors in evaluation order.
    pub contributions: Vec<FeatureContribution>,
    /// Linear score (log-odds of default).
    pub z: f64,
    pub result: ScoreResult,
}

impl ScoreBreakdown {
    /// Predictors sorted by absolute contribution, largest first.
    pub fn top_drivers(&self) -> Vec<FeatureContribution> {
        let mut sorted = self.contributions.clone();
        sorted.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sorted
    }
}
