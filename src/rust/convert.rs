//! Rewrites a legacy model file as an inference-only optimized graph.

use std::fs;
use std::path::Path;

use ort::session::builder::GraphOptimizationLevel;

use crate::model_manager::ModelError;
use crate::runtime::{create_session_builder, RuntimeConfig};

pub const DEFAULT_SOURCE: &str = "plant_model.onnx";
pub const DEFAULT_TARGET: &str = "plant_model.optimized.onnx";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// The optimized graph was written to the target path
    Converted,
    /// Nothing to do: the source file does not exist
    SourceMissing,
}

/// Loads `source` with full graph optimization and serializes the optimized
/// graph to `target`.
///
/// Optimization folds training-only nodes (dropout, batch-norm statistics)
/// into the inference graph. A missing source is a no-op, not an error.
///
/// # Errors
/// - `Corrupt` if the source cannot be parsed as an ONNX graph
/// - `Runtime` / `IoError` if the environment or target directory fail
pub fn convert_model(source: &Path, target: &Path, config: &RuntimeConfig) -> Result<ConvertOutcome, ModelError> {
    if !source.exists() {
        log::warn!("File not found: {:?}. Nothing to convert.", source);
        return Ok(ConvertOutcome::SourceMissing);
    }
    log::info!("Found: {:?}", source);

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let config = RuntimeConfig {
        optimization_level: GraphOptimizationLevel::Level3,
        ..config.clone()
    };
    create_session_builder(&config)?
        .with_optimized_model_path(target.to_string_lossy().to_string())?
        .commit_from_file(source)
        .map_err(|e| ModelError::Corrupt {
            kind: "model",
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

    log::info!("Converted {:?} -> {:?}", source, target);
    Ok(ConvertOutcome::Converted)
}
