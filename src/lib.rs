//! License plate localization and OCR for a single still image.
//!
//! The pipeline runs strictly forward: grayscale and bilateral smoothing,
//! Canny edges and contour-based plate localization, mask and crop, OCR of the
//! crop, and annotation of the original image with the first recognized text.

pub mod annotate;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod crop;
pub mod engine;
pub mod engines;
pub mod error;
pub mod geometry;
pub mod localization;
pub mod preprocessing;
pub mod recognizer;
pub mod report;

pub use annotate::{Annotator, Outcome};
pub use config::{Config, OcrConfig, PipelineParams};
pub use engine::{Detection, OcrEngine};
pub use error::PlateError;
pub use recognizer::{PlateCandidate, PlateRecognizer, Recognition};
