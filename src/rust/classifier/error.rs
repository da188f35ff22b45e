use ort::Error as OrtError;
use std::fmt;

/// Errors raised while analysing a single upload.
///
/// None of these are fatal to the process: the request that produced one is
/// aborted and the message is shown to that user only.
#[derive(Debug)]
pub enum ClassifierError {
    /// The uploaded bytes could not be decoded as a raster image
    ImageDecodeError(String),
    /// The classifier rejected the input or failed while running
    InferenceError(String),
    /// The request itself was malformed (e.g. no file field)
    ValidationError(String),
    /// The upload exceeded the server's body size limit
    PayloadTooLarge(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDecodeError(msg) => write!(f, "Image decode error: {}", msg),
            Self::InferenceError(msg) => write!(f, "Inference error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::PayloadTooLarge(msg) => write!(f, "Upload too large: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::InferenceError(err.to_string())
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::ImageDecodeError(err.to_string())
    }
}
