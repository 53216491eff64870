//! Read/write model JSON files.
//!
//! The schema is defined by `models::ModelFile`. Loading validates the
//! parameters immediately, so a bad file fails before anything is scored.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::info;

use crate::error::{AppError, EXIT_INPUT};
use crate::models::{ModelFile, ModelParameters};

/// Read and validate a model JSON file.
pub fn read_model_json(path: &Path) -> Result<ModelParameters, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let params = parse_model(file)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "loaded model parameters");
    Ok(params)
}

/// Parse and validate a model document from any reader.
pub fn parse_model<R: Read>(reader: R) -> Result<ModelParameters, AppError> {
    let file: ModelFile = serde_json::from_reader(reader)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid model JSON: {e}")))?;
    Ok(ModelParameters::try_from(&file)?)
}

/// Write parameters as a model JSON file.
pub fn write_model_json(path: &Path, params: &ModelParameters) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create model JSON '{}': {e}", path.display())))?;
    write_model(file, params)
}

pub fn write_model<W: Write>(out: W, params: &ModelParameters) -> Result<(), AppError> {
    serde_json::to_writer_pretty(out, &params.to_model_file())
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write model JSON: {e}")))
}
