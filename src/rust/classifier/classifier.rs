use std::collections::HashMap;
use std::path::Path;

use log::{debug, info};
use ndarray::Array4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use super::utils::check_input_shape;
use crate::model_manager::ModelError;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// A pretrained image classifier: one image tensor in, one probability
/// vector out.
///
/// Implementations are immutable after construction and are shared across
/// every request, so they must be `Send + Sync`.
pub trait Classifier: Send + Sync {
    /// Runs a single forward pass over a `[1, H, W, C]` tensor.
    ///
    /// # Errors
    /// - `InferenceError` if the tensor shape does not match what the model
    ///   expects, or if the model fails while running
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>, ClassifierError>;

    /// Number of classes the model scores, when the model declares it.
    fn output_width(&self) -> Option<usize>;
}

/// A leaf classifier backed by an ONNX Runtime session.
///
/// # Thread Safety
///
/// `Session` is `Send + Sync` and is only ever borrowed immutably, so a
/// single `OnnxClassifier` serves concurrent requests without locking.
#[derive(Debug)]
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    input_dims: Vec<i64>,
    output_width: Option<usize>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<OnnxClassifier>();
    }
};

impl OnnxClassifier {
    /// Loads an ONNX graph from disk and validates its structure.
    ///
    /// # Errors
    /// - `Runtime` if the ONNX Runtime environment cannot be set up
    /// - `Corrupt` if the file is not a loadable ONNX graph or has no
    ///   inputs/outputs
    pub fn from_file(path: &Path, config: &RuntimeConfig) -> Result<Self, ModelError> {
        let session = create_session_builder(config)?
            .commit_from_file(path)
            .map_err(|e| ModelError::Corrupt {
                kind: "model",
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Self::validate_model(&session).map_err(|reason| ModelError::Corrupt {
            kind: "model",
            path: path.to_path_buf(),
            reason,
        })?;

        let input = &session.inputs[0];
        let input_name = input.name.clone();
        let input_dims = input
            .input_type
            .tensor_dimensions()
            .cloned()
            .unwrap_or_default();
        let output_width = session.outputs[0]
            .output_type
            .tensor_dimensions()
            .and_then(|dims| dims.last().copied())
            .and_then(|width| usize::try_from(width).ok());

        info!(
            "Loaded classifier from {:?}: input '{}' {:?}, output width {:?}",
            path, input_name, input_dims, output_width
        );

        Ok(Self {
            session,
            input_name,
            input_dims,
            output_width,
        })
    }

    fn validate_model(session: &Session) -> Result<(), String> {
        if session.inputs.is_empty() {
            return Err("Model must have at least 1 input for the image tensor".to_string());
        }
        if session.outputs.is_empty() {
            return Err("Model must have at least 1 output for class probabilities".to_string());
        }
        Ok(())
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        check_input_shape(&self.input_dims, tensor.shape())?;

        let input_dyn = tensor.view().into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| {
                ClassifierError::InferenceError(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self.session.run(input_tensors).map_err(|e| {
            ClassifierError::InferenceError(format!("Failed to run model: {}", e))
        })?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::InferenceError(format!("Failed to extract output tensor: {}", e))
        })?;
        debug!("Model output shape: {:?}", output_tensor.shape());

        Ok(output_tensor.iter().copied().collect())
    }

    fn output_width(&self) -> Option<usize> {
        self.output_width
    }
}
