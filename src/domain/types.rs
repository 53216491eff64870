//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags or CSV rows
//! - scored in-memory
//! - exported to CSV/JSON by the record-store side of the tool

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Length of employment, as declared on the application.
///
/// Ordered: the ordinal used by the model follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkExperience {
    #[serde(rename = "0-2 years")]
    ZeroToTwo,
    #[serde(rename = "2-5 years")]
    TwoToFive,
    #[serde(rename = "5+ years")]
    FivePlus,
}

impl WorkExperience {
    pub const ALL: [WorkExperience; 3] = [
        WorkExperience::ZeroToTwo,
        WorkExperience::TwoToFive,
        WorkExperience::FivePlus,
    ];

    /// Ordinal encoding used during training (0, 1, 2).
    pub fn ordinal(self) -> u8 {
        match self {
            WorkExperience::ZeroToTwo => 0,
            WorkExperience::TwoToFive => 1,
            WorkExperience::FivePlus => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkExperience::ZeroToTwo => "0-2 years",
            WorkExperience::TwoToFive => "2-5 years",
            WorkExperience::FivePlus => "5+ years",
        }
    }
}

impl FromStr for WorkExperience {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        WorkExperience::ALL
            .into_iter()
            .find(|v| v.label() == trimmed)
            .ok_or_else(|| ScoringError::InvalidCategory {
                field: "work_experience",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for WorkExperience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Housing status, as declared on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HomeOwnership {
    Rent,
    Mortgage,
    Own,
}

impl HomeOwnership {
    pub const ALL: [HomeOwnership; 3] = [HomeOwnership::Rent, HomeOwnership::Mortgage, HomeOwnership::Own];

    /// Ordinal encoding used during training (0, 1, 2).
    pub fn ordinal(self) -> u8 {
        match self {
            HomeOwnership::Rent => 0,
            HomeOwnership::Mortgage => 1,
            HomeOwnership::Own => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HomeOwnership::Rent => "Rent",
            HomeOwnership::Mortgage => "Mortgage",
            HomeOwnership::Own => "Own",
        }
    }
}

impl FromStr for HomeOwnership {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        HomeOwnership::ALL
            .into_iter()
            .find(|v| v.label() == trimmed)
            .ok_or_else(|| ScoringError::InvalidCategory {
                field: "home_ownership",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for HomeOwnership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A loan applicant with typed categorical fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Record-store identifier, if the applicant came from one.
    #[serde(default)]
    pub id: Option<String>,
    pub income: f64,
    pub loan_amount: f64,
    /// Length of credit history (years).
    pub credit_history: f64,
    pub work_experience: WorkExperience,
    pub home_ownership: HomeOwnership,
}

impl Applicant {
    /// Reject values the model cannot meaningfully score.
    ///
    /// Runs before any numeric work.
    pub fn validate(&self) -> Result<(), ScoringError> {
        check_non_negative("income", self.income)?;
        check_non_negative("loan_amount", self.loan_amount)?;
        if !self.credit_history.is_finite() {
            return Err(ScoringError::InvalidApplicant {
                field: "credit_history",
                reason: format!("must be finite, got {}", self.credit_history),
            });
        }
        Ok(())
    }

    /// Label used in logs and reports.
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("<anonymous>")
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::InvalidApplicant {
            field,
            reason: format!("must be finite, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(ScoringError::InvalidApplicant {
            field,
            reason: format!("must be >= 0, got {value}"),
        });
    }
    Ok(())
}

/// An applicant as it sits in the record store: categories are free text.
///
/// Converting to [`Applicant`] is where unknown categories are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApplicant {
    #[serde(default)]
    pub id: Option<String>,
    pub income: f64,
    pub loan_amount: f64,
    pub credit_history: f64,
    pub work_experience: String,
    pub home_ownership: String,
}

impl TryFrom<&RawApplicant> for Applicant {
    type Error = ScoringError;

    fn try_from(raw: &RawApplicant) -> Result<Self, Self::Error> {
        Ok(Applicant {
            id: raw.id.clone(),
            income: raw.income,
            loan_amount: raw.loan_amount,
            credit_history: raw.credit_history,
            work_experience: raw.work_experience.parse()?,
            home_ownership: raw.home_ownership.parse()?,
        })
    }
}

/// Risk tier derived from the integer credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 3] = [RiskCategory::Low, RiskCategory::Medium, RiskCategory::High];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::Low => "LOW",
            RiskCategory::Medium => "MEDIUM",
            RiskCategory::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of scoring one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Model probability of default, in (0, 1).
    pub probability_of_default: f64,
    /// `round(probability_of_default * 100)`, in [0, 100].
    pub credit_score: u8,
    pub risk_category: RiskCategory,
}

/// A scored applicant, ready to hand to a record store or exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredApplicant {
    pub applicant: Applicant,
    pub result: ScoreResult,
    pub scored_at: DateTime<Utc>,
}
