//! CSV exports.
//!
//! - scored results (one row per applicant, inputs + outputs + timestamp)
//! - plain applicant lists (used for generated samples)
//!
//! The layouts are meant to be easy to load into a record store or spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::domain::{Applicant, ScoredApplicant};
use crate::error::{AppError, EXIT_INPUT};

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    id: &'a str,
    income: f64,
    loan_amount: f64,
    credit_history: f64,
    work_experience: &'static str,
    home_ownership: &'static str,
    probability_of_default: String,
    credit_score: u8,
    risk_category: &'static str,
    scored_at: String,
}

#[derive(Debug, Serialize)]
struct ApplicantRow<'a> {
    id: &'a str,
    income: String,
    loan_amount: String,
    credit_history: String,
    work_experience: &'static str,
    home_ownership: &'static str,
}

/// Write scored applicants to a CSV file.
pub fn write_results_csv(path: &Path, scored: &[ScoredApplicant]) -> Result<(), AppError> {
    let file = create(path)?;
    write_results(file, scored)
}

/// Write scored applicants as CSV to any writer.
pub fn write_results<W: Write>(out: W, scored: &[ScoredApplicant]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for s in scored {
        let a = &s.applicant;
        writer
            .serialize(ResultRow {
                id: a.id.as_deref().unwrap_or(""),
                income: a.income,
                loan_amount: a.loan_amount,
                credit_history: a.credit_history,
                work_experience: a.work_experience.label(),
                home_ownership: a.home_ownership.label(),
                probability_of_default: format!("{:.6}", s.result.probability_of_default),
                credit_score: s.result.credit_score,
                risk_category: s.result.risk_category.as_str(),
                scored_at: s.scored_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            })
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write results CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush results CSV: {e}")))?;
    Ok(())
}

/// Write applicants (inputs only) to a CSV file readable by `load_applicants`.
pub fn write_applicants_csv(path: &Path, applicants: &[Applicant]) -> Result<(), AppError> {
    let file = create(path)?;
    write_applicants(file, applicants)
}

pub fn write_applicants<W: Write>(out: W, applicants: &[Applicant]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for a in applicants {
        writer
            .serialize(ApplicantRow {
                id: a.id.as_deref().unwrap_or(""),
                income: format!("{:.2}", a.income),
                loan_amount: format!("{:.2}", a.loan_amount),
                credit_history: format!("{:.4}", a.credit_history),
                work_experience: a.work_experience.label(),
                home_ownership: a.home_ownership.label(),
            })
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write applicant CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush applicant CSV: {e}")))?;
    Ok(())
}

fn create(path: &Path) -> Result<File, AppError> {
    File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create CSV '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{HomeOwnership, WorkExperience};
    use crate::io::read_applicants;
    use crate::scoring::ScoringEngine;

    fn applicant() -> Applicant {
        Applicant {
            id: Some("A1".to_string()),
            income: 75_000.0,
            loan_amount: 150_000.0,
            credit_history: 10.5,
            work_experience: WorkExperience::FivePlus,
            home_ownership: HomeOwnership::Mortgage,
        }
    }

    #[test]
    fn results_csv_layout() {
        let a = applicant();
        let result = ScoringEngine::reference().score(&a).unwrap();
        let scored = ScoredApplicant {
            applicant: a,
            result,
            scored_at: Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap(),
        };

        let mut buf = Vec::new();
        write_results(&mut buf, &[scored]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "id,income,loan_amount,credit_history,work_experience,home_ownership,\
                 probability_of_default,credit_score,risk_category,scored_at"
            )
        );
        assert_eq!(
            lines.next(),
            Some("A1,75000.0,150000.0,10.5,5+ years,Mortgage,0.915300,92,HIGH,2026-10-17T09:30:00Z")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn applicant_csv_reads_back() {
        let mut buf = Vec::new();
        write_applicants(&mut buf, &[applicant()]).unwrap();
        let ingested = read_applicants(buf.as_slice()).unwrap();
        assert_eq!(ingested.applicants, vec![applicant()]);
    }
}
