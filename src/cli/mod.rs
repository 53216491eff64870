//! Command-line parsing for the credit risk scorer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{HomeOwnership, WorkExperience};

/// Environment variable naming a model JSON file.
pub const MODEL_PATH_ENV: &str = "CRS_MODEL_PATH";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "crs", version, about = "Credit risk scoring (logistic probability of default)")]
pub struct Cli {
    /// More log output (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Less log output (repeatable).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Net verbosity: `-v` count minus `-q` count.
    pub fn verbosity(&self) -> i8 {
        let v = i8::try_from(self.verbose).unwrap_or(i8::MAX);
        let q = i8::try_from(self.quiet).unwrap_or(i8::MAX);
        v.saturating_sub(q)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Score a single applicant given on the command line.
    Score(ScoreArgs),
    /// Score every applicant in a CSV file.
    Batch(BatchArgs),
    /// Generate synthetic applicants (training-like distributions).
    Sample(SampleArgs),
    /// Show or export the model parameters.
    Model(ModelArgs),
}

/// Where to load model parameters from.
#[derive(Debug, Args, Clone, Default)]
pub struct ModelSource {
    /// Model JSON file (defaults to $CRS_MODEL_PATH, then the built-in reference model).
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Annual income (>= 0).
    #[arg(long)]
    pub income: f64,

    /// Requested loan amount (>= 0).
    #[arg(long)]
    pub loan_amount: f64,

    /// Length of credit history in years.
    #[arg(long)]
    pub credit_history: f64,

    /// One of "0-2 years", "2-5 years", "5+ years".
    #[arg(long)]
    pub work_experience: WorkExperience,

    /// One of "Rent", "Mortgage", "Own".
    #[arg(long)]
    pub home_ownership: HomeOwnership,

    /// Optional applicant identifier (shown in output).
    #[arg(long)]
    pub id: Option<String>,

    /// Print the result as JSON instead of a text report.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Applicant CSV file.
    #[arg(short = 'i', long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write scored results to this CSV file.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: Option<PathBuf>,

    /// Show at most this many rejected rows in the summary.
    #[arg(long, default_value_t = 10)]
    pub max_errors: usize,

    #[command(flatten)]
    pub source: ModelSource,
}

#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Number of applicants to generate.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output CSV file.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct ModelArgs {
    /// Write the parameters to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub source: ModelSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_score_command_with_category_labels() {
        let cli = Cli::try_parse_from([
            "crs",
            "score",
            "--income",
            "75000",
            "--loan-amount",
            "150000",
            "--credit-history",
            "10.5",
            "--work-experience",
            "5+ years",
            "--home-ownership",
            "Mortgage",
        ])
        .unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score command");
        };
        assert_eq!(args.work_experience, WorkExperience::FivePlus);
        assert_eq!(args.home_ownership, HomeOwnership::Mortgage);
        assert_eq!(args.source.model, None);
        assert!(!args.json);
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let res = Cli::try_parse_from([
            "crs",
            "score",
            "--income",
            "1",
            "--loan-amount",
            "1",
            "--credit-history",
            "1",
            "--work-experience",
            "10+ years",
            "--home-ownership",
            "Own",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn verbosity_combines_flags() {
        let cli = Cli::try_parse_from(["crs", "-vv", "sample", "-o", "x.csv"]).unwrap();
        assert_eq!(cli.verbosity(), 2);
        let cli = Cli::try_parse_from(["crs", "model", "-q"]).unwrap();
        assert_eq!(cli.verbosity(), -1);
    }

    #[test]
    fn batch_defaults() {
        let cli = Cli::try_parse_from(["crs", "batch", "-i", "in.csv", "--model", "m.json"]).unwrap();
        let Command::Batch(args) = cli.command else {
            panic!("expected batch command");
        };
        assert_eq!(args.max_errors, 10);
        assert_eq!(args.output, None);
        assert_eq!(args.source.model, Some(PathBuf::from("m.json")));
    }
}
