use image::{imageops::FilterType, DynamicImage};

/// Side length of the square grayscale input the sign model was trained on.
pub const MODEL_INPUT_SIZE: u32 = 28;

/// Converts a captured frame into the flat pixel buffer the model consumes:
/// grayscale, resized to 28x28, pixel values scaled to [0, 1], row-major.
pub fn to_model_input(frame: &DynamicImage) -> Vec<f32> {
    let gray = frame.to_luma8();
    let resized = image::imageops::resize(
        &gray,
        MODEL_INPUT_SIZE,
        MODEL_INPUT_SIZE,
        FilterType::Triangle,
    );

    resized
        .pixels()
        .map(|pixel| f32::from(pixel.0[0]) / 255.0)
        .collect()
}
