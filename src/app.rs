//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs logging
//! - resolves the model parameters
//! - dispatches to the scoring / sampling / model commands

use clap::Parser;
use tracing::info;

use crate::cli::{BatchArgs, Command, MODEL_PATH_ENV, ModelArgs, ModelSource, SampleArgs, ScoreArgs};
use crate::domain::Applicant;
use crate::error::{AppError, EXIT_INTERNAL};
use crate::models::ModelParameters;
use crate::scoring::ScoringEngine;

pub mod pipeline;

/// Entry point for the `crs` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    crate::logging::init(cli.verbosity());

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Batch(args) => handle_batch(args),
        Command::Sample(args) => handle_sample(args),
        Command::Model(args) => handle_model(args),
    }
}

fn load_params(source: &ModelSource) -> Result<ModelParameters, AppError> {
    let origin = pipeline::resolve_model_origin(source.model.as_deref(), std::env::var(MODEL_PATH_ENV).ok());
    pipeline::load_model(&origin)
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::new(load_params(&args.source)?);
    let applicant = Applicant {
        id: args.id,
        income: args.income,
        loan_amount: args.loan_amount,
        credit_history: args.credit_history,
        work_experience: args.work_experience,
        home_ownership: args.home_ownership,
    };

    let breakdown = engine.explain(&applicant)?;
    if args.json {
        let json = serde_json::to_string_pretty(&breakdown)
            .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Failed to encode result JSON: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", crate::report::format_score(&applicant, &breakdown));
    }
    Ok(())
}

fn handle_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = ScoringEngine::new(load_params(&args.source)?);
    let ingested = crate::io::load_applicants(&args.input)?;
    let run = pipeline::score_ingested(&engine, ingested);

    println!(
        "{}",
        crate::report::format_batch_summary(&run.summary, &run.row_errors, args.max_errors)
    );

    if let Some(path) = &args.output {
        crate::io::write_results_csv(path, &run.scored)?;
        info!(path = %path.display(), rows = run.scored.len(), "wrote results");
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let applicants = crate::data::generate_applicants(args.count, args.seed)?;
    crate::io::write_applicants_csv(&args.output, &applicants)?;
    info!(
        path = %args.output.display(),
        count = applicants.len(),
        seed = args.seed,
        "wrote synthetic applicants"
    );
    Ok(())
}

fn handle_model(args: ModelArgs) -> Result<(), AppError> {
    let params = load_params(&args.source)?;
    println!("{}", crate::report::format_model(&params));
    if let Some(path) = &args.export {
        crate::io::write_model_json(path, &params)?;
        info!(path = %path.display(), "wrote model parameters");
    }
    Ok(())
}
