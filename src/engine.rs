use crate::error::PlateError;
use image::GrayImage;
use serde::Serialize;

/// One recognized text region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    /// Corners of the text region in crop coordinates
    pub polygon: [(i32, i32); 4],
    pub text: String,
    pub confidence: f32,
}

impl Detection {
    /// Polygon covering a whole axis-aligned rectangle
    pub fn rect_polygon(left: i32, top: i32, right: i32, bottom: i32) -> [(i32, i32); 4] {
        [(left, top), (right, top), (right, bottom), (left, bottom)]
    }
}

/// Trait that all OCR engines must implement
pub trait OcrEngine: Send + Sync {
    /// Returns the engine identifier (e.g., "ocrs", "leptess")
    fn name(&self) -> &'static str;

    /// Returns a human-readable description of the engine
    fn description(&self) -> &'static str;

    /// Read text from a cropped plate region.
    ///
    /// Detections come back in the engine's own order, without any
    /// confidence filtering. An empty vector means no text was found.
    fn read_text(&self, image: &GrayImage) -> Result<Vec<Detection>, PlateError>;

    /// Get supported languages
    fn supported_languages(&self) -> Vec<String>;
}
