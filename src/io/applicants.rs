//! Applicant CSV ingest.
//!
//! Turns an applicant export (one row per application) into typed
//! [`Applicant`]s that are safe to score.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **No scoring here**: unknown categories and bad numbers are caught before
//!   the engine ever sees the row
//!
//! Column names are matched case-insensitively with `_` and spaces ignored, so
//! both `loan_amount` and the training-style `LoanAmount` are accepted.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{info, warn};

use crate::domain::{Applicant, RawApplicant};
use crate::error::{AppError, EXIT_DATA, EXIT_INPUT};

/// A CSV column: normalized lookup key plus the name shown to users.
#[derive(Debug, Clone, Copy)]
struct Column {
    key: &'static str,
    display: &'static str,
}

const INCOME: Column = Column { key: "income", display: "income" };
const LOAN_AMOUNT: Column = Column { key: "loanamount", display: "loan_amount" };
const CREDIT_HISTORY: Column = Column { key: "credithistory", display: "credit_history" };
const WORK_EXPERIENCE: Column = Column { key: "workexperience", display: "work_experience" };
const HOME_OWNERSHIP: Column = Column { key: "homeownership", display: "home_ownership" };

const REQUIRED_COLUMNS: [Column; 5] = [INCOME, LOAN_AMOUNT, CREDIT_HISTORY, WORK_EXPERIENCE, HOME_OWNERSHIP];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub id: Option<String>,
    pub message: String,
}

/// Ingest output: valid applicants + row errors.
#[derive(Debug, Clone)]
pub struct IngestedApplicants {
    pub applicants: Vec<Applicant>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

impl IngestedApplicants {
    pub fn rows_used(&self) -> usize {
        self.applicants.len()
    }
}

/// Load applicants from a CSV file.
pub fn load_applicants(path: &Path) -> Result<IngestedApplicants, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    let ingested = read_applicants(file)?;
    info!(
        path = %path.display(),
        rows_read = ingested.rows_read,
        rows_used = ingested.rows_used(),
        "loaded applicants"
    );
    Ok(ingested)
}

/// Load applicants from any CSV reader.
pub fn read_applicants<R: Read>(reader: R) -> Result<IngestedApplicants, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut applicants = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    id: None,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let id = get_optional(&record, &header_map, "id").map(str::to_string);
        match parse_row(&record, &header_map, id.clone()) {
            Ok(applicant) => applicants.push(applicant),
            Err(message) => {
                warn!(line, id = id.as_deref().unwrap_or(""), %message, "skipping applicant row");
                row_errors.push(RowError { line, id, message });
            }
        }
    }

    if applicants.is_empty() {
        return Err(AppError::new(EXIT_DATA, "No valid applicant rows in CSV."));
    }

    Ok(IngestedApplicants {
        applicants,
        row_errors,
        rows_read,
    })
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    id: Option<String>,
) -> Result<Applicant, String> {
    let raw = RawApplicant {
        id,
        income: parse_required_f64(record, header_map, INCOME)?,
        loan_amount: parse_required_f64(record, header_map, LOAN_AMOUNT)?,
        credit_history: parse_required_f64(record, header_map, CREDIT_HISTORY)?,
        work_experience: get_required(record, header_map, WORK_EXPERIENCE)?.to_string(),
        home_ownership: get_required(record, header_map, HOME_OWNERSHIP)?.to_string(),
    };
    let applicant = Applicant::try_from(&raw).map_err(|e| e.to_string())?;
    applicant.validate().map_err(|e| e.to_string())?;
    Ok(applicant)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.chars()
        .filter(|c| *c != '_' && *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|c| !header_map.contains_key(c.key))
        .map(|c| c.display)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(AppError::new(
        EXIT_INPUT,
        format!("Missing required column(s): {}", missing.join(", ")),
    ))
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    column: Column,
) -> Result<&'a str, String> {
    get_optional(record, header_map, column.key).ok_or_else(|| format!("Missing value for '{}'", column.display))
}

fn parse_required_f64(record: &StringRecord, header_map: &HashMap<String, usize>, column: Column) -> Result<f64, String> {
    let s = get_required(record, header_map, column)?;
    s.parse::<f64>()
        .map_err(|_| format!("Invalid number '{s}' for '{}'", column.display))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HomeOwnership, WorkExperience};

    #[test]
    fn reads_snake_case_columns() {
        let csv = "\
id,income,loan_amount,credit_history,work_experience,home_ownership
A1,75000,150000,10.5,5+ years,Mortgage
A2,42000.50,210000,4,0-2 years,Rent
";
        let ingested = read_applicants(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 2);
        assert_eq!(ingested.rows_used(), 2);
        assert!(ingested.row_errors.is_empty());

        let a = &ingested.applicants[0];
        assert_eq!(a.id.as_deref(), Some("A1"));
        assert_eq!(a.income, 75_000.0);
        assert_eq!(a.work_experience, WorkExperience::FivePlus);
        assert_eq!(a.home_ownership, HomeOwnership::Mortgage);
        assert_eq!(ingested.applicants[1].income, 42_000.5);
    }

    #[test]
    fn reads_training_style_columns_without_id() {
        let csv = "\u{feff}Income,LoanAmount,CreditHistory,WorkExperience,HomeOwnership
60000,150000,15,2-5 years,Own
";
        let ingested = read_applicants(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_used(), 1);
        assert_eq!(ingested.applicants[0].id, None);
        assert_eq!(ingested.applicants[0].home_ownership, HomeOwnership::Own);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "\
id,income,loan_amount,credit_history,work_experience,home_ownership
ok,75000,150000,10.5,5+ years,Mortgage
cat,75000,150000,10.5,10+ years,Mortgage
num,abc,150000,10.5,5+ years,Mortgage
neg,-1,150000,10.5,5+ years,Mortgage
empty,75000,,10.5,5+ years,Mortgage
";
        let ingested = read_applicants(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 5);
        assert_eq!(ingested.rows_used(), 1);

        let lines: Vec<usize> = ingested.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
        assert_eq!(ingested.row_errors[0].id.as_deref(), Some("cat"));
        assert!(ingested.row_errors[0].message.contains("work_experience"));
        assert!(ingested.row_errors[1].message.contains("Invalid number"));
        assert!(ingested.row_errors[2].message.contains("income"));
        assert_eq!(ingested.row_errors[1].message, "Invalid number 'abc' for 'income'");
        assert_eq!(ingested.row_errors[3].message, "Missing value for 'loan_amount'");
    }

    #[test]
    fn missing_columns_fail_the_file() {
        let csv = "income,loan_amount,credit_history\n1,2,3\n";
        let err = read_applicants(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert_eq!(
            err.to_string(),
            "Missing required column(s): work_experience, home_ownership"
        );
    }

    #[test]
    fn file_without_valid_rows_is_an_error() {
        let csv = "income,loan_amount,credit_history,work_experience,home_ownership\n1,2,3,Never,Rent\n";
        let err = read_applicants(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_DATA);
    }
}
