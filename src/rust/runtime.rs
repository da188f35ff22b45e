use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;
use std::sync::OnceLock;

use crate::model_manager::ModelError;

/// Outcome of the one-time environment setup; `Some` holds the failure message.
static INIT: OnceLock<Option<String>> = OnceLock::new();

#[derive(Debug)]
pub struct RuntimeConfig {
    pub inter_threads: usize,
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            inter_threads: 0, // Let ONNX Runtime decide
            intra_threads: 0, // Let ONNX Runtime decide
            optimization_level: GraphOptimizationLevel::Level3,
        }
    }
}

impl Clone for RuntimeConfig {
    fn clone(&self) -> Self {
        // GraphOptimizationLevel does not implement Clone
        let optimization_level = match self.optimization_level {
            GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
            GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
            GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
            GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
        };
        Self {
            optimization_level,
            ..*self
        }
    }
}

fn init_onnx_environment() -> OrtResult<()> {
    ort::init()
        .with_name("agrisense")
        .commit()?;
    Ok(())
}

/// Commits the process-wide ONNX Runtime environment exactly once.
///
/// A failed setup is remembered and reported on every later call.
pub fn ensure_initialized() -> Result<(), ModelError> {
    let failure = INIT.get_or_init(|| init_onnx_environment().err().map(|e| e.to_string()));
    match failure {
        None => Ok(()),
        Some(msg) => Err(ModelError::Runtime(msg.clone())),
    }
}

pub fn create_session_builder(config: &RuntimeConfig) -> Result<SessionBuilder, ModelError> {
    ensure_initialized()?;
    let mut builder = Session::builder()?;

    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }

    Ok(builder.with_optimization_level(config.clone().optimization_level)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialization_is_idempotent() {
        for _ in 0..3 {
            assert!(ensure_initialized().is_ok());
        }
    }

    #[test]
    fn test_builder_accepts_thread_limits() {
        let config = RuntimeConfig {
            intra_threads: 1,
            optimization_level: GraphOptimizationLevel::Level2,
            ..RuntimeConfig::default()
        };
        assert!(create_session_builder(&config).is_ok());
    }

    #[test]
    fn test_config_clone_keeps_level() {
        let config = RuntimeConfig {
            intra_threads: 4,
            optimization_level: GraphOptimizationLevel::Disable,
            ..RuntimeConfig::default()
        };
        let cloned = config.clone();
        assert_eq!(cloned.intra_threads, 4);
        assert!(matches!(cloned.optimization_level, GraphOptimizationLevel::Disable));
    }
}
