//! Shared scoring workflow used by the CLI commands.
//!
//! model resolution -> ingest -> score -> summarize
//!
//! Commands then focus on presentation and exports.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::domain::ScoredApplicant;
use crate::error::AppError;
use crate::io::{IngestedApplicants, RowError, read_model_json};
use crate::models::ModelParameters;
use crate::report::{BatchSummary, summarize};
use crate::scoring::ScoringEngine;

/// Where the model parameters of a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelOrigin {
    Flag(PathBuf),
    Env(PathBuf),
    Reference,
}

/// Pick the model file: explicit flag, then the environment value, then the
/// built-in reference parameters.
pub fn resolve_model_origin(flag: Option<&Path>, env_value: Option<String>) -> ModelOrigin {
    if let Some(path) = flag {
        return ModelOrigin::Flag(path.to_path_buf());
    }
    match env_value {
        Some(v) if !v.trim().is_empty() => ModelOrigin::Env(PathBuf::from(v.trim())),
        _ => ModelOrigin::Reference,
    }
}

/// Load the parameters named by `origin`.
pub fn load_model(origin: &ModelOrigin) -> Result<ModelParameters, AppError> {
    match origin {
        ModelOrigin::Flag(path) | ModelOrigin::Env(path) => read_model_json(path),
        ModelOrigin::Reference => {
            info!("using built-in reference model");
            Ok(ModelParameters::reference())
        }
    }
}

/// All computed outputs of a batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub scored: Vec<ScoredApplicant>,
    /// Ingest rejections followed by engine rejections.
    pub row_errors: Vec<RowError>,
    pub summary: BatchSummary,
}

/// Score every ingested applicant.
///
/// Applicants the engine rejects are reported alongside ingest row errors.
/// Engine rejections carry no line number (`line = 0`) since ingest has
/// already dropped the source position.
pub fn score_ingested(engine: &ScoringEngine, ingested: IngestedApplicants) -> BatchOutput {
    let scored_at = Utc::now();
    let results = engine.score_batch(&ingested.applicants);

    let mut scored = Vec::with_capacity(results.len());
    let mut row_errors = ingested.row_errors;
    for (applicant, result) in ingested.applicants.into_iter().zip(results) {
        match result {
            Ok(result) => scored.push(ScoredApplicant {
                applicant,
                result,
                scored_at,
            }),
            Err(e) => {
                warn!(applicant = applicant.display_id(), error = %e, "applicant rejected by engine");
                row_errors.push(RowError {
                    line: 0,
                    id: applicant.id,
                    message: e.to_string(),
                });
            }
        }
    }

    let summary = summarize(&scored, row_errors.len());
    info!(
        scored = summary.n_scored,
        rejected = summary.n_rejected,
        "batch scoring complete"
    );

    BatchOutput {
        scored,
        row_errors,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskCategory;
    use crate::io::read_applicants;
    use crate::models::{Feature, FeatureParams};

    #[test]
    fn model_origin_precedence() {
        let flag = PathBuf::from("flag.json");
        assert_eq!(
            resolve_model_origin(Some(&flag), Some("env.json".to_string())),
            ModelOrigin::Flag(flag)
        );
        assert_eq!(
            resolve_model_origin(None, Some(" env.json ".to_string())),
            ModelOrigin::Env(PathBuf::from("env.json"))
        );
        assert_eq!(resolve_model_origin(None, Some("  ".to_string())), ModelOrigin::Reference);
        assert_eq!(resolve_model_origin(None, None), ModelOrigin::Reference);
    }

    #[test]
    fn missing_model_file_is_an_error() {
        let origin = ModelOrigin::Flag(PathBuf::from("/nonexistent/crs-model.json"));
        assert_eq!(load_model(&origin).unwrap_err().exit_code(), crate::error::EXIT_INPUT);
        assert_eq!(load_model(&ModelOrigin::Reference).unwrap(), ModelParameters::reference());
    }

    #[test]
    fn batch_scores_valid_rows_and_keeps_row_errors() {
        let csv = "\
id,income,loan_amount,credit_history,work_experience,home_ownership
A1,75000,150000,10.5,5+ years,Mortgage
A2,120000,50000,25,5+ years,Own
A3,1,1,1,Retired,Own
";
        let ingested = read_applicants(csv.as_bytes()).unwrap();
        let out = score_ingested(&ScoringEngine::reference(), ingested);

        assert_eq!(out.scored.len(), 2);
        assert_eq!(out.scored[0].applicant.id.as_deref(), Some("A1"));
        assert_eq!(out.scored[0].result.risk_category, RiskCategory::High);
        assert_eq!(out.scored[1].result.risk_category, RiskCategory::Low);
        assert_eq!(out.row_errors.len(), 1);
        assert_eq!(out.row_errors[0].line, 4);
        assert_eq!(out.summary.n_scored, 2);
        assert_eq!(out.summary.n_rejected, 1);
    }

    #[test]
    fn engine_rejections_are_counted_with_row_errors() {
        let csv = "\
id,income,loan_amount,credit_history,work_experience,home_ownership
A1,75000,150000,10.5,5+ years,Mortgage
BIG,1e10,150000,10.5,5+ years,Mortgage
A3,1,1,1,Retired,Own
";
        let entries: Vec<_> = ModelParameters::reference()
            .iter()
            .map(|(f, p)| match f {
                Feature::Income => (f, FeatureParams::new(-1.0, 0.0, 1e-300)),
                _ => (f, *p),
            })
            .collect();
        let engine = ScoringEngine::new(ModelParameters::new(entries).unwrap());

        let ingested = read_applicants(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_used(), 2);
        let out = score_ingested(&engine, ingested);

        assert_eq!(out.scored.len(), 1);
        assert_eq!(out.scored[0].applicant.id.as_deref(), Some("A1"));
        assert_eq!(out.row_errors.len(), 2);
        // Ingest rejections come first, then engine rejections without a line.
        assert_eq!(out.row_errors[0].line, 4);
        let rejected = &out.row_errors[1];
        assert_eq!(rejected.line, 0);
        assert_eq!(rejected.id.as_deref(), Some("BIG"));
        assert!(rejected.message.contains("Income"), "{}", rejected.message);
        assert_eq!(out.summary.n_scored, 1);
        assert_eq!(out.summary.n_rejected, 2);
    }
}
