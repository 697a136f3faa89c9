use crate::error::PlateError;
use image::GrayImage;
use imageproc::filter::bilateral_filter;

/// Edge-preserving bilateral smoothing over a `diameter x diameter` window.
///
/// Neighbours are weighted by a Gaussian of spatial distance (`sigma_space`)
/// and a Gaussian of intensity difference (`sigma_color`), so pixels across a
/// strong edge contribute almost nothing and plate borders stay sharp.
pub fn apply(
    image: &GrayImage,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> Result<GrayImage, PlateError> {
    if diameter == 0 || !is_positive(sigma_color) || !is_positive(sigma_space) {
        return Err(PlateError::PreprocessingError(format!(
            "invalid bilateral parameters: diameter={}, sigma_color={}, sigma_space={}",
            diameter, sigma_color, sigma_space
        )));
    }

    // bilateral_filter panics on an empty image
    if image.width() == 0 || image.height() == 0 {
        return Ok(image.clone());
    }

    Ok(bilateral_filter(image, diameter, sigma_color, sigma_space))
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
