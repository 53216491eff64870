//! Reporting utilities: batch summaries and formatted terminal output.

pub mod format;

pub use format::*;

use std::collections::BTreeMap;

use crate::domain::{RiskCategory, ScoredApplicant};

/// Aggregate view of a scored batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub n_scored: usize,
    /// Rows rejected at ingest or by the engine.
    pub n_rejected: usize,
    pub by_tier: BTreeMap<RiskCategory, usize>,
    pub mean_pd: f64,
    pub mean_score: f64,
}

/// Summarize scored applicants.
///
/// Means are `NaN` when nothing was scored.
pub fn summarize(scored: &[ScoredApplicant], n_rejected: usize) -> BatchSummary {
    let mut by_tier: BTreeMap<RiskCategory, usize> = RiskCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    let mut sum_pd = 0.0;
    let mut sum_score = 0.0;
    for s in scored {
        *by_tier.entry(s.result.risk_category).or_insert(0) += 1;
        sum_pd += s.result.probability_of_default;
        sum_score += f64::from(s.result.credit_score);
    }
    let n = scored.len() as f64;
    BatchSummary {
        n_scored: scored.len(),
        n_rejected,
        by_tier,
        mean_pd: sum_pd / n,
        mean_score: sum_score / n,
    }
}
