//! Leptess/Tesseract engine implementation
//!
//! Tesseract-based OCR engine. Uses tesseract-static crate for static linking
//! (no system dependencies). Downloads tessdata (training data) automatically
//! on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::config::OcrConfig;
use crate::engine::{Detection, OcrEngine};
use crate::error::PlateError;
use image::GrayImage;
use tesseract_static::tesseract::Tesseract;

/// Tesseract OCR Engine
pub struct LeptessEngine {
    /// Path to tessdata directory
    tessdata_path: String,
    language: String,
}

impl LeptessEngine {
    /// Create a new Tesseract-based OCR engine
    pub fn new(config: &OcrConfig) -> Result<Self, PlateError> {
        let language = config.language.clone();
        let tessdata_path = ensure_tessdata_available(&language)?;

        // Validate that tessdata is accessible by doing a test initialization
        let test_tess = Tesseract::new(Some(&tessdata_path), Some(&language)).map_err(|e| {
            PlateError::InitializationError(format!("Failed to initialize Tesseract: {}", e))
        })?;
        drop(test_tess);

        tracing::info!(
            "Leptess engine initialized (tessdata: {}, language: {})",
            tessdata_path,
            language
        );

        Ok(Self {
            tessdata_path,
            language,
        })
    }
}

impl OcrEngine for LeptessEngine {
    fn name(&self) -> &'static str {
        "leptess"
    }

    fn description(&self) -> &'static str {
        "Tesseract OCR engine - better for noisy/messy images like phone photos"
    }

    fn read_text(&self, plate: &GrayImage) -> Result<Vec<Detection>, PlateError> {
        let (width, height) = plate.dimensions();

        // Convert to BMP in memory (BMP is always supported by leptonica)
        let mut bmp_data = Vec::new();
        {
            let mut cursor = std::io::Cursor::new(&mut bmp_data);
            plate
                .write_to(&mut cursor, image::ImageFormat::Bmp)
                .map_err(|e| {
                    PlateError::ProcessingError(format!("Failed to convert to BMP: {}", e))
                })?;
        }

        let mut tess = Tesseract::new(Some(&self.tessdata_path), Some(&self.language))
            .map_err(|e| {
                PlateError::ProcessingError(format!("Failed to create Tesseract: {}", e))
            })?;

        tess = tess.set_image_from_mem(&bmp_data).map_err(|e| {
            PlateError::ProcessingError(format!(
                "Failed to set image ({}x{}, {} bytes): {}",
                width,
                height,
                bmp_data.len(),
                e
            ))
        })?;

        tess = tess
            .recognize()
            .map_err(|e| PlateError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        let text = tess
            .get_text()
            .map_err(|e| PlateError::ProcessingError(format!("Failed to get text: {}", e)))?;
        let text = text.trim();

        if text.is_empty() {
            return Ok(Vec::new());
        }

        // Get confidence score (0-100 scale, convert to 0.0-1.0)
        let confidence = tess.mean_text_conf() as f32 / 100.0;

        Ok(vec![Detection {
            polygon: Detection::rect_polygon(0, 0, width as i32 - 1, height as i32 - 1),
            text: text.to_string(),
            confidence,
        }])
    }

    fn supported_languages(&self) -> Vec<String> {
        // Any language with a tessdata_fast model; these are the common ones
        vec![
            "eng".to_string(),
            "deu".to_string(),
            "fra".to_string(),
            "spa".to_string(),
            "ita".to_string(),
            "por".to_string(),
            "nld".to_string(),
            "jpn".to_string(),
            "chi_sim".to_string(),
            "kor".to_string(),
            "ara".to_string(),
            "rus".to_string(),
        ]
    }
}

/// Ensure tessdata is available, downloading if needed
fn ensure_tessdata_available(language: &str) -> Result<String, PlateError> {
    let dir = cache_dir(Some("tessdata"))?;
    ensure_downloaded(
        &tessdata_url(language),
        &dir,
        &format!("{}.traineddata", language),
    )?;

    // Tesseract expects the directory, not the file
    dir.to_str()
        .map(|s| s.to_string())
        .ok_or_else(|| PlateError::InitializationError("Invalid tessdata path".to_string()))
}

/// Use tessdata_fast for smaller, faster downloads
fn tessdata_url(language: &str) -> String {
    format!(
        "https://github.com/tesseract-ocr/tessdata_fast/raw/main/{}.traineddata",
        language
    )
}
