//! Trained logistic-regression parameters.
//!
//! Every term of the model (intercept plus five predictors) carries a
//! coefficient and the mean/std used to standardize its feature at training
//! time. Terms are keyed by [`Feature`], never by position, so a reordered
//! model file cannot silently pair a coefficient with the wrong feature.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// One term of the linear model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Feature {
    Intercept,
    Income,
    LoanAmount,
    CreditHistory,
    WorkExperience,
    HomeOwnership,
}

impl Feature {
    /// All model terms, intercept first.
    pub const ALL: [Feature; 6] = [
        Feature::Intercept,
        Feature::Income,
        Feature::LoanAmount,
        Feature::CreditHistory,
        Feature::WorkExperience,
        Feature::HomeOwnership,
    ];

    /// The five standardized predictors, in evaluation order.
    pub const PREDICTORS: [Feature; 5] = [
        Feature::Income,
        Feature::LoanAmount,
        Feature::CreditHistory,
        Feature::WorkExperience,
        Feature::HomeOwnership,
    ];

    /// Column name used by the training data and the model file.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Intercept => "Intercept",
            Feature::Income => "Income",
            Feature::LoanAmount => "LoanAmount",
            Feature::CreditHistory => "CreditHistory",
            Feature::WorkExperience => "WorkExperience",
            Feature::HomeOwnership => "HomeOwnership",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coefficient and training-time scaling of one model term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureParams {
    pub coefficient: f64,
    pub mean: f64,
    pub std: f64,
}

impl FeatureParams {
    pub const fn new(coefficient: f64, mean: f64, std: f64) -> Self {
        Self { coefficient, mean, std }
    }
}

/// Validated model parameters.
///
/// Construction is the only place parameters are checked; once built the set is
/// read-only and can be shared freely between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelParameters {
    terms: BTreeMap<Feature, FeatureParams>,
}

impl ModelParameters {
    /// Build and validate a parameter set.
    ///
    /// Requires exactly one entry per [`Feature`], finite values, `std > 0` for
    /// every predictor, and `mean = 0`, `std = 1` for the intercept.
    pub fn new(entries: impl IntoIterator<Item = (Feature, FeatureParams)>) -> Result<Self, ScoringError> {
        let mut terms = BTreeMap::new();
        for (feature, params) in entries {
            if terms.insert(feature, params).is_some() {
                return Err(ScoringError::model(feature.name(), "duplicate entry"));
            }
        }

        for feature in Feature::ALL {
            let Some(params) = terms.get(&feature) else {
                return Err(ScoringError::model(feature.name(), "missing entry"));
            };
            validate_term(feature, params)?;
        }

        Ok(Self { terms })
    }

    /// The coefficients shipped with the tool.
    pub fn reference() -> Self {
        Self {
            terms: REFERENCE_TERMS.into_iter().collect(),
        }
    }

    /// Parameters for one term.
    pub fn get(&self, feature: Feature) -> &FeatureParams {
        // `new` guarantees every feature is present.
        &self.terms[&feature]
    }

    pub fn intercept(&self) -> f64 {
        self.get(Feature::Intercept).coefficient
    }

    /// Terms in model order (intercept first).
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &FeatureParams)> {
        self.terms.iter().map(|(f, p)| (*f, p))
    }

    /// Number of terms. A validated model always holds every [`Feature`].
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.terms.len()
    }
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self::reference()
    }
}

fn validate_term(feature: Feature, params: &FeatureParams) -> Result<(), ScoringError> {
    let FeatureParams { coefficient, mean, std } = *params;
    if !(coefficient.is_finite() && mean.is_finite() && std.is_finite()) {
        return Err(ScoringError::model(
            feature.name(),
            format!("non-finite value (coefficient={coefficient}, mean={mean}, std={std})"),
        ));
    }
    if feature == Feature::Intercept {
        if mean != 0.0 || std != 1.0 {
            return Err(ScoringError::model(
                feature.name(),
                format!("intercept must have mean=0 and std=1, got mean={mean}, std={std}"),
            ));
        }
    } else if std <= 0.0 {
        return Err(ScoringError::model(feature.name(), format!("std must be > 0, got {std}")));
    }
    Ok(())
}

const REFERENCE_TERMS: [(Feature, FeatureParams); 6] = [
    (Feature::Intercept, FeatureParams::new(2.751131, 0.0, 1.0)),
    (Feature::Income, FeatureParams::new(-1.112291, 60263.938441, 19827.051862)),
    (Feature::LoanAmount, FeatureParams::new(1.712167, 152740.615647, 50259.021197)),
    (Feature::CreditHistory, FeatureParams::new(-0.912897, 14.741371, 8.774844)),
    (Feature::WorkExperience, FeatureParams::new(0.094141, 1.041250, 0.819786)),
    (Feature::HomeOwnership, FeatureParams::new(0.248981, 1.007500, 0.815441)),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_entries() -> Vec<(Feature, FeatureParams)> {
        REFERENCE_TERMS.to_vec()
    }

    #[test]
    fn reference_parameters_validate() {
        let built = ModelParameters::new(reference_entries()).unwrap();
        assert_eq!(built, ModelParameters::reference());
        assert_eq!(built.len(), 6);
        assert_eq!(built.intercept(), 2.751131);
        assert_eq!(built.get(Feature::CreditHistory).std, 8.774844);
    }

    #[test]
    fn entry_order_does_not_matter() {
        let mut entries = reference_entries();
        entries.reverse();
        let built = ModelParameters::new(entries).unwrap();
        assert_eq!(built, ModelParameters::reference());
        let order: Vec<Feature> = built.iter().map(|(f, _)| f).collect();
        assert_eq!(order, Feature::ALL.to_vec());
    }

    #[test]
    fn zero_std_is_rejected_at_construction() {
        let mut entries = reference_entries();
        entries[2].1.std = 0.0;
        let err = ModelParameters::new(entries).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::InvalidModelParameter { ref feature, .. } if feature == "LoanAmount"
        ));
    }

    #[test]
    fn negative_std_is_rejected() {
        let mut entries = reference_entries();
        entries[5].1.std = -0.8;
        assert!(ModelParameters::new(entries).is_err());
    }

    #[test]
    fn missing_and_duplicate_entries_are_rejected() {
        let mut entries = reference_entries();
        entries.retain(|(f, _)| *f != Feature::WorkExperience);
        let err = ModelParameters::new(entries).unwrap_err();
        assert_eq!(err, ScoringError::model("WorkExperience", "missing entry"));

        let mut entries = reference_entries();
        entries.push((Feature::Income, FeatureParams::new(1.0, 0.0, 1.0)));
        let err = ModelParameters::new(entries).unwrap_err();
        assert_eq!(err, ScoringError::model("Income", "duplicate entry"));
    }

    #[test]
    fn intercept_must_not_be_scaled() {
        let mut entries = reference_entries();
        entries[0].1.std = 2.0;
        assert!(ModelParameters::new(entries).is_err());

        let mut entries = reference_entries();
        entries[0].1.mean = 0.5;
        assert!(ModelParameters::new(entries).is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut entries = reference_entries();
        entries[1].1.coefficient = f64::NAN;
        assert!(ModelParameters::new(entries).is_err());
    }

    #[test]
    fn feature_names_round_trip() {
        for f in Feature::ALL {
            assert_eq!(Feature::from_name(f.name()), Some(f));
        }
        assert_eq!(Feature::from_name("income"), None);
    }
}
