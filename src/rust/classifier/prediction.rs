use serde::Serialize;

use super::error::ClassifierError;
use super::labels::LabelList;
use super::utils::argmax;

/// The top class for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Position of the winning class in the model output
    pub index: usize,
    /// Class name from the label list
    pub label: String,
    /// Probability of the winning class, in `[0, 1]`
    pub confidence: f32,
}

impl Prediction {
    /// Picks the arg-max class from a probability vector.
    ///
    /// # Errors
    /// - `InferenceError` if the vector is empty, has no comparable values,
    ///   or its length differs from the number of labels
    pub fn from_probabilities(probabilities: &[f32], labels: &LabelList) -> Result<Self, ClassifierError> {
        if probabilities.len() != labels.len() {
            return Err(ClassifierError::InferenceError(format!(
                "Model produced {} scores but {} labels are loaded",
                probabilities.len(),
                labels.len()
            )));
        }

        let index = argmax(probabilities).ok_or_else(|| {
            ClassifierError::InferenceError("Model produced no usable scores".into())
        })?;
        let label = labels
            .get(index)
            .ok_or_else(|| ClassifierError::InferenceError(format!("No label for class index {}", index)))?
            .to_string();

        Ok(Self {
            index,
            label,
            confidence: probabilities[index],
        })
    }

    /// Markdown-style summary, e.g. `- **Tomato_Leaf_Mold** (0.93)`.
    pub fn summary_line(&self) -> String {
        format!("- **{}** ({:.2})", self.label, self.confidence)
    }
}
