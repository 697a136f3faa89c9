//! OCRS engine implementation
//!
//! Pure Rust OCR engine using the ocrs library. No system dependencies required.
//! Downloads neural network models automatically on first use.

use super::download::{cache_dir, ensure_downloaded};
use crate::config::OcrConfig;
use crate::engine::{Detection, OcrEngine};
use crate::error::PlateError;
use image::{DynamicImage, GrayImage};
use ocrs::{DecodeMethod, ImageSource, OcrEngine as OcrsOcrEngine, OcrEngineParams, TextItem};
use rten::Model;

/// Default model URLs from the ocrs project
const DETECTION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-detection.rten";
const RECOGNITION_MODEL_URL: &str =
    "https://ocrs-models.s3-accelerate.amazonaws.com/text-recognition.rten";

/// OCR Engine wrapping the ocrs library
pub struct OcrsEngine {
    engine: OcrsOcrEngine,
}

impl OcrsEngine {
    /// Create a new OCR engine, downloading models if needed
    pub fn new(_config: &OcrConfig) -> Result<Self, PlateError> {
        let models = cache_dir(None)?;
        let detection_model_path =
            ensure_downloaded(DETECTION_MODEL_URL, &models, "text-detection.rten")?;
        let recognition_model_path =
            ensure_downloaded(RECOGNITION_MODEL_URL, &models, "text-recognition.rten")?;

        let detection_model = Model::load_file(&detection_model_path).map_err(|e| {
            PlateError::InitializationError(format!("Failed to load detection model: {}", e))
        })?;
        let recognition_model = Model::load_file(&recognition_model_path).map_err(|e| {
            PlateError::InitializationError(format!("Failed to load recognition model: {}", e))
        })?;

        let engine = OcrsOcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            decode_method: DecodeMethod::Greedy,
            ..Default::default()
        })
        .map_err(|e| {
            PlateError::InitializationError(format!("Failed to create OCR engine: {}", e))
        })?;

        tracing::info!("ocrs engine initialized successfully");

        Ok(Self { engine })
    }
}

impl OcrEngine for OcrsEngine {
    fn name(&self) -> &'static str {
        "ocrs"
    }

    fn description(&self) -> &'static str {
        "Pure Rust OCR engine - fast, no system dependencies required"
    }

    fn read_text(&self, image: &GrayImage) -> Result<Vec<Detection>, PlateError> {
        // ImageSource::from_bytes expects HWC RGB
        let rgb_img = DynamicImage::ImageLuma8(image.clone()).into_rgb8();
        let dimensions = rgb_img.dimensions();

        let img_source = ImageSource::from_bytes(rgb_img.as_raw(), dimensions).map_err(|e| {
            PlateError::ProcessingError(format!("Failed to create image source: {}", e))
        })?;

        let ocr_input = self
            .engine
            .prepare_input(img_source)
            .map_err(|e| PlateError::ProcessingError(format!("Failed to prepare input: {}", e)))?;

        let word_rects = self
            .engine
            .detect_words(&ocr_input)
            .map_err(|e| PlateError::ProcessingError(format!("Failed to detect words: {}", e)))?;

        let line_rects = self.engine.find_text_lines(&ocr_input, &word_rects);

        let line_texts = self
            .engine
            .recognize_text(&ocr_input, &line_rects)
            .map_err(|e| PlateError::ProcessingError(format!("Failed to recognize text: {}", e)))?;

        let detections: Vec<Detection> = line_texts
            .iter()
            .filter_map(|line| line.as_ref())
            .filter_map(|line| {
                let text = line
                    .words()
                    .map(|word| word.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                if text.trim().is_empty() {
                    return None;
                }
                let rect = line.bounding_rect();
                Some(Detection {
                    polygon: Detection::rect_polygon(
                        rect.left(),
                        rect.top(),
                        rect.right(),
                        rect.bottom(),
                    ),
                    confidence: plate_confidence(&text),
                    text,
                })
            })
            .collect();

        tracing::debug!("ocrs recognized {} line(s)", detections.len());
        Ok(detections)
    }

    fn supported_languages(&self) -> Vec<String> {
        // ocrs currently only supports English/Latin alphabet
        vec!["eng".to_string()]
    }
}

// ============================================================================
// Confidence scoring heuristics
// ============================================================================

/// Estimate how plausible a string is as plate text.
///
/// ocrs doesn't report per-character confidence, so the score is derived
/// from the shape of the text: plates are short runs of letters and digits.
fn plate_confidence(text: &str) -> f32 {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return 0.0;
    }

    let confidence = 0.40 * alphanumeric_ratio(&compact)
        + 0.30 * length_score(&compact)
        + 0.15 * mix_score(&compact)
        + 0.15 * detect_repetition(&compact);

    confidence.clamp(0.0, 1.0)
}

/// Fraction of characters that are ASCII letters or digits.
///
/// Separators like '-' or '·' appear on real plates but rarely dominate.
fn alphanumeric_ratio(compact: &str) -> f32 {
    let total = compact.chars().count();
    let alnum = compact.chars().filter(|c| c.is_ascii_alphanumeric()).count();
    alnum as f32 / total as f32
}

fn length_score(compact: &str) -> f32 {
    match compact.chars().count() {
        4..=8 => 1.0,
        2..=3 | 9..=10 => 0.6,
        _ => 0.2,
    }
}

/// Most plate formats mix letters and digits
fn mix_score(compact: &str) -> f32 {
    let letters = compact.chars().any(|c| c.is_ascii_alphabetic());
    let digits = compact.chars().any(|c| c.is_ascii_digit());
    if letters && digits {
        1.0
    } else {
        0.6
    }
}

/// Detect repeated character sequences.
///
/// Patterns like "IIIII" often indicate the reader picked up border or bolt texture.
fn detect_repetition(text: &str) -> f32 {
    let mut max_repeat = 1;
    let mut current = 1;
    let mut prev: Option<char> = None;

    for c in text.chars() {
        if Some(c) == prev {
            current += 1;
            max_repeat = max_repeat.max(current);
        } else {
            current = 1;
        }
        prev = Some(c);
    }

    match max_repeat {
        1..=2 => 1.0,
        3 => 0.8,
        4..=5 => 0.5,
        _ => 0.2,
    }
}
