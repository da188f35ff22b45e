mod classifier;
mod error;
mod labels;
mod prediction;
pub mod preprocess;
mod utils;

pub use classifier::{Classifier, OnnxClassifier};
pub use error::ClassifierError;
pub use labels::{LabelFileError, LabelList};
pub use prediction::Prediction;
pub use preprocess::{decode_image, preprocess, CHANNELS, INPUT_SIZE};
pub use utils::argmax;
