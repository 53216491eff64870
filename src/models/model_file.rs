//! Model file schema (JSON).
//!
//! This is the document the training job writes next to the trained model:
//!
//! ```json
//! {
//!   "intercept": 2.751131,
//!   "coefficients": { "Income": -1.112291, ... },
//!   "scaling_params": {
//!     "means": { "Income": 60263.938441, ... },
//!     "stds":  { "Income": 19827.051862, ... }
//!   },
//!   "performance": { "accuracy": 0.71, "roc_auc": 0.78 }
//! }
//! ```
//!
//! All maps are keyed by feature name. A name the model does not know, or a
//! predictor missing from any of the three maps, is a parameter error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::models::model::{Feature, FeatureParams, ModelParameters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub intercept: f64,
    pub coefficients: BTreeMap<String, f64>,
    pub scaling_params: ScalingParams,
    /// Hold-out metrics recorded at training time (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<ModelPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingParams {
    pub means: BTreeMap<String, f64>,
    pub stds: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelPerformance {
    pub accuracy: f64,
    pub roc_auc: f64,
}

impl TryFrom<&ModelFile> for ModelParameters {
    type Error = ScoringError;

    fn try_from(file: &ModelFile) -> Result<Self, Self::Error> {
        for (section, map) in [
            ("coefficients", &file.coefficients),
            ("means", &file.scaling_params.means),
            ("stds", &file.scaling_params.stds),
        ] {
            check_known_names(section, map)?;
        }

        let mut entries = Vec::with_capacity(Feature::ALL.len());
        entries.push((Feature::Intercept, FeatureParams::new(file.intercept, 0.0, 1.0)));
        for feature in Feature::PREDICTORS {
            let coefficient = lookup("coefficients", &file.coefficients, feature)?;
            let mean = lookup("means", &file.scaling_params.means, feature)?;
            let std = lookup("stds", &file.scaling_params.stds, feature)?;
            entries.push((feature, FeatureParams::new(coefficient, mean, std)));
        }

        ModelParameters::new(entries)
    }
}

impl ModelParameters {
    /// Render the parameters in model-file form.
    pub fn to_model_file(&self) -> ModelFile {
        let mut coefficients = BTreeMap::new();
        let mut means = BTreeMap::new();
        let mut stds = BTreeMap::new();
        for feature in Feature::PREDICTORS {
            let p = self.get(feature);
            coefficients.insert(feature.name().to_string(), p.coefficient);
            means.insert(feature.name().to_string(), p.mean);
            stds.insert(feature.name().to_string(), p.std);
        }
        ModelFile {
            intercept: self.intercept(),
            coefficients,
            scaling_params: ScalingParams { means, stds },
            performance: None,
        }
    }
}

fn check_known_names(section: &str, map: &BTreeMap<String, f64>) -> Result<(), ScoringError> {
    for name in map.keys() {
        match Feature::from_name(name) {
            Some(f) if f != Feature::Intercept => {}
            _ => {
                return Err(ScoringError::model(
                    name.as_str(),
                    format!("unknown feature in '{section}'"),
                ));
            }
        }
    }
    Ok(())
}

fn lookup(section: &str, map: &BTreeMap<String, f64>, feature: Feature) -> Result<f64, ScoringError> {
    map.get(feature.name())
        .copied()
        .ok_or_else(|| ScoringError::model(feature.name(), format!("missing from '{section}'")))
}
