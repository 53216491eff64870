//! Formatted terminal output.
//!
//! Formatting lives in one place so the scoring code stays free of
//! presentation concerns.

use crate::domain::Applicant;
use crate::io::RowError;
use crate::models::ModelParameters;
use crate::report::BatchSummary;
use crate::scoring::ScoreBreakdown;

/// Format a single-applicant score with its per-feature drivers.
pub fn format_score(applicant: &Applicant, breakdown: &ScoreBreakdown) -> String {
    let mut out = String::new();
    let r = &breakdown.result;

    out.push_str("=== crs - Credit Risk Score ===\n");
    out.push_str(&format!("Applicant: {}\n", applicant.display_id()));
    out.push_str(&format!(
        "Income: {:.2} | Loan: {:.2} | Credit history: {}y\n",
        applicant.income, applicant.loan_amount, applicant.credit_history
    ));
    out.push_str(&format!(
        "Work experience: {} | Home ownership: {}\n",
        applicant.work_experience, applicant.home_ownership
    ));

    out.push_str("\nContributions:\n");
    out.push_str(&format!(
        "  {:<15} {:>14} {:>10} {:>10} {:>10}\n",
        "feature", "raw", "scaled", "coef", "contrib"
    ));
    out.push_str(&format!(
        "  {:<15} {:>14} {:>10} {:>10} {:>+10.4}\n",
        "Intercept", "-", "-", "-", breakdown.intercept
    ));
    for c in &breakdown.contributions {
        out.push_str(&format!(
            "  {:<15} {:>14.4} {:>10.4} {:>10.6} {:>+10.4}\n",
            c.feature.name(),
            c.raw,
            c.standardized,
            c.coefficient,
            c.contribution
        ));
    }
    out.push_str(&format!("  {:<15} {:>58.4}\n", "z (log-odds)", breakdown.z));

    out.push_str(&format!("\nProbability of default: {:.6}\n", r.probability_of_default));
    out.push_str(&format!("Credit score: {}\n", r.credit_score));
    out.push_str(&format!("Risk category: {}\n", r.risk_category));

    out
}

/// Format a batch summary, including the first few rejected rows.
pub fn format_batch_summary(summary: &BatchSummary, row_errors: &[RowError], max_errors: usize) -> String {
    let mut out = String::new();

    out.push_str("=== crs - Batch Scoring ===\n");
    out.push_str(&format!(
        "Scored: {} | Rejected: {}\n",
        summary.n_scored, summary.n_rejected
    ));
    if summary.n_scored > 0 {
        out.push_str(&format!(
            "Mean PD: {:.6} | Mean score: {:.2}\n",
            summary.mean_pd, summary.mean_score
        ));
    }

    out.push_str("\nRisk tiers:\n");
    for (tier, n) in &summary.by_tier {
        let pct = if summary.n_scored > 0 {
            100.0 * *n as f64 / summary.n_scored as f64
        } else {
            0.0
        };
        out.push_str(&format!("  {:<7} {:>7} ({:>5.1}%)\n", tier.as_str(), n, pct));
    }

    if !row_errors.is_empty() {
        out.push_str("\nRejected rows:\n");
        for e in row_errors.iter().take(max_errors) {
            out.push_str(&format!(
                "  line {:>5} [{}]: {}\n",
                e.line,
                e.id.as_deref().unwrap_or("-"),
                e.message
            ));
        }
        if row_errors.len() > max_errors {
            out.push_str(&format!("  ... and {} more\n", row_errors.len() - max_errors));
        }
    }

    out
}

/// Format the model's terms as a table.
pub fn format_model(params: &ModelParameters) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<15} {:>12} {:>16} {:>16}\n",
        "feature", "coefficient", "mean", "std"
    ));
    for (feature, p) in params.iter() {
        out.push_str(&format!(
            "{:<15} {:>12.6} {:>16.6} {:>16.6}\n",
            feature.name(),
            p.coefficient,
            p.mean,
            p.std
        ));
    }
    out
}
