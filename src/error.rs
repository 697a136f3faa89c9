use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Cannot load image {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("License plate not localized: none of the {examined} largest contours simplify to 4 vertices")]
    PlateNotLocalized { examined: usize },

    #[error("Plate mask is empty")]
    EmptyMask,

    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("Failed to read text: {0}")]
    ProcessingError(String),

    #[error("Preprocessing failed: {0}")]
    PreprocessingError(String),

    #[error("Unknown OCR engine '{name}' (available: {available})")]
    UnknownEngine { name: String, available: String },

    #[error("Engine {engine} does not support language '{language}'")]
    UnsupportedLanguage { engine: String, language: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to load font: {0}")]
    Font(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl PlateError {
    /// Stable identifier for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            PlateError::ImageLoad { .. } => "IMAGE_LOAD_ERROR",
            PlateError::PlateNotLocalized { .. } => "PLATE_NOT_LOCALIZED",
            PlateError::EmptyMask => "EMPTY_MASK",
            PlateError::InitializationError(_) => "INIT_ERROR",
            PlateError::ProcessingError(_) => "PROCESSING_ERROR",
            PlateError::PreprocessingError(_) => "PREPROCESSING_ERROR",
            PlateError::UnknownEngine { .. } => "UNKNOWN_ENGINE",
            PlateError::UnsupportedLanguage { .. } => "UNSUPPORTED_LANGUAGE",
            PlateError::InvalidParameter(_) => "INVALID_PARAMETER",
            PlateError::Font(_) => "FONT_ERROR",
            PlateError::Artifact { .. } => "ARTIFACT_ERROR",
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorReport {
    pub error: String,
    pub code: String,
}

impl From<&PlateError> for ErrorReport {
    fn from(err: &PlateError) -> Self {
        Self {
            error: err.to_string(),
            code: err.code().to_string(),
        }
    }
}
