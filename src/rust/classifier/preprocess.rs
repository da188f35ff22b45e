use image::imageops::FilterType;
use image::DynamicImage;
use ndarray::Array4;

use super::error::ClassifierError;

/// Side length, in pixels, of the square input the leaf model was trained on.
pub const INPUT_SIZE: u32 = 128;
/// Number of colour channels (RGB).
pub const CHANNELS: usize = 3;

/// Bicubic resampling, deterministic for a given input.
const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

/// Decodes uploaded bytes into an RGB raster.
///
/// The format is sniffed from the content, not from a file name or MIME
/// type. Alpha and grayscale inputs are converted to 8-bit RGB.
///
/// # Errors
/// - `ImageDecodeError` if the bytes are not a supported image format
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ClassifierError> {
    if bytes.is_empty() {
        return Err(ClassifierError::ImageDecodeError("Uploaded file is empty".into()));
    }
    let image = image::load_from_memory(bytes)?;
    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

/// Converts an image of any size into the model's input tensor.
///
/// The process involves:
/// 1. Resizing to exactly `INPUT_SIZE`×`INPUT_SIZE` (aspect ratio is not kept)
/// 2. Scaling each 8-bit channel into `[0, 1]`
/// 3. Adding a leading batch dimension
///
/// # Tensor Format
/// - Shape: `[1, INPUT_SIZE, INPUT_SIZE, CHANNELS]` (NHWC)
/// - Values: `f32` in `[0, 1]`
pub fn preprocess(image: &DynamicImage) -> Array4<f32> {
    let resized = image.resize_exact(INPUT_SIZE, INPUT_SIZE, RESIZE_FILTER);
    let rgb = resized.to_rgb8();
    let side = INPUT_SIZE as usize;

    Array4::from_shape_fn((1, side, side, CHANNELS), |(_, y, x, c)| {
        f32::from(rgb.get_pixel(x as u32, y as u32)[c]) / 255.0
    })
}
