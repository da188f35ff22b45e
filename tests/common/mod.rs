#![allow(dead_code)]

use std::io::Cursor;

use agrisense::{Classifier, ClassifierError, LabelList, ModelContext};
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use ndarray::Array4;

pub const LABELS: [&str; 4] = [
    "Tomato_Bacterial_spot",
    "Tomato_Late_blight",
    "Tomato_Leaf_Mold",
    "Tomato_healthy",
];

/// Returns the same scores for every image, after checking the tensor shape.
pub struct FixedClassifier {
    pub scores: Vec<f32>,
}

impl Classifier for FixedClassifier {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>, ClassifierError> {
        if tensor.shape() != &[1, 128, 128, 3] {
            return Err(ClassifierError::InferenceError(format!(
                "unexpected input shape {:?}",
                tensor.shape()
            )));
        }
        Ok(self.scores.clone())
    }

    fn output_width(&self) -> Option<usize> {
        Some(self.scores.len())
    }
}

pub fn context_with_scores(scores: Vec<f32>) -> ModelContext {
    ModelContext::new(Box::new(FixedClassifier { scores }), LabelList::new(LABELS.to_vec()))
}

pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    bytes
}

pub fn leaf_png(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x * 3 % 256) as u8, 160, (y * 5 % 256) as u8])
    }));
    encode(&image, ImageFormat::Png)
}
