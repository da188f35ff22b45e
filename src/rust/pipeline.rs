use std::time::Instant;

use log::{debug, info, warn};
use serde::Serialize;

use crate::classifier::{decode_image, preprocess, Classifier, ClassifierError, LabelList, Prediction};
use crate::defects::{self, DefectRecord};

/// The loaded classifier and its labels.
///
/// Built once at startup by [`crate::ModelManager::load`] and shared
/// read-only with every request; nothing in it is mutated after loading.
pub struct ModelContext {
    classifier: Box<dyn Classifier>,
    labels: LabelList,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<ModelContext>();
    }
};

/// Everything shown to the user for one upload.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub prediction: Prediction,
    pub defect: &'static DefectRecord,
    pub elapsed_ms: f64,
}

impl ModelContext {
    pub fn new(classifier: Box<dyn Classifier>, labels: LabelList) -> Self {
        Self { classifier, labels }
    }

    pub fn labels(&self) -> &LabelList {
        &self.labels
    }

    /// Runs decode, preprocess, inference, arg-max and defect lookup on one
    /// uploaded file.
    ///
    /// # Errors
    /// - `ImageDecodeError` if the bytes are not an image
    /// - `InferenceError` if the model rejects the tensor or its output does
    ///   not line up with the labels
    pub fn analyze(&self, bytes: &[u8]) -> Result<Analysis, ClassifierError> {
        let start = Instant::now();

        let image = decode_image(bytes).map_err(|e| {
            warn!("Rejected upload of {} bytes: {}", bytes.len(), e);
            e
        })?;
        debug!("Decoded {}x{} image", image.width(), image.height());

        let tensor = preprocess(&image);
        let probabilities = self.classifier.predict(&tensor).map_err(|e| {
            warn!("Inference failed: {}", e);
            e
        })?;
        let prediction = Prediction::from_probabilities(&probabilities, &self.labels)?;
        let defect = defects::resolve(&prediction.label);

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "Predicted {} ({:.2}) -> {} in {:.1}ms",
            prediction.label, prediction.confidence, defect.key, elapsed_ms
        );

        Ok(Analysis {
            prediction,
            defect,
            elapsed_ms,
        })
    }
}
