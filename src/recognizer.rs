//! Stage sequencing: preprocess, localize, crop, read, annotate
//!
//! Every stage receives the previous stage's output as an explicit value and
//! either returns its own output or a named failure. Nothing flows forward on
//! failure.

use crate::annotate::{Annotator, Outcome};
use crate::config::PipelineParams;
use crate::crop::PlateCrop;
use crate::engine::{Detection, OcrEngine};
use crate::error::PlateError;
use crate::localization::{Localization, Localizer};
use crate::preprocessing::{Pipeline, Preprocessed, StepTiming};
use image::{DynamicImage, RgbImage};
use std::path::Path;
use std::time::Instant;

/// Everything produced up to and including the crop
#[derive(Debug, Clone)]
pub struct PlateCandidate {
    pub color: RgbImage,
    pub preprocessed: Preprocessed,
    pub localization: Localization,
    pub crop: PlateCrop,
    pub timings: Vec<StepTiming>,
}

/// Final result of a run
#[derive(Debug, Clone)]
pub struct Recognition {
    pub candidate: PlateCandidate,
    pub detections: Vec<Detection>,
    pub outcome: Outcome,
    pub timings: Vec<StepTiming>,
}

pub struct PlateRecognizer {
    pipeline: Pipeline,
    localizer: Localizer,
}

impl PlateRecognizer {
    pub fn new(params: &PipelineParams) -> Result<Self, PlateError> {
        params.validate()?;
        Ok(Self {
            pipeline: Pipeline::new(params),
            localizer: Localizer::new(params),
        })
    }

    /// Load an image, failing fast with `ImageLoad`
    pub fn load_image(path: &Path) -> Result<DynamicImage, PlateError> {
        let image = image::open(path).map_err(|source| PlateError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(image)
    }

    /// Preprocess, localize and crop
    pub fn locate_plate(&self, image: &DynamicImage) -> Result<PlateCandidate, PlateError> {
        let preprocessed = self.pipeline.process(image)?;
        let mut timings = preprocessed.steps.clone();

        let start = Instant::now();
        let localization = self.localizer.locate(&preprocessed.smoothed)?;
        timings.push(StepTiming::since("localize", start));

        let start = Instant::now();
        let color = image.to_rgb8();
        let crop = PlateCrop::from_quad(&color, &preprocessed.gray, &localization.quad)?;
        timings.push(StepTiming::since("crop", start));

        Ok(PlateCandidate {
            color,
            preprocessed,
            localization,
            crop,
            timings,
        })
    }

    /// Run OCR over the crop and annotate the original image
    pub fn read_plate(
        &self,
        candidate: PlateCandidate,
        engine: &dyn OcrEngine,
        annotator: &Annotator,
    ) -> Result<Recognition, PlateError> {
        let mut timings = candidate.timings.clone();

        let start = Instant::now();
        let detections = engine.read_text(&candidate.crop.plate)?;
        timings.push(StepTiming::since("ocr", start));
        tracing::info!(
            "{} returned {} detection(s)",
            engine.name(),
            detections.len()
        );

        let start = Instant::now();
        let outcome = annotator.annotate(
            &candidate.color,
            &candidate.localization.quad,
            &detections,
        );
        timings.push(StepTiming::since("annotate", start));

        Ok(Recognition {
            candidate,
            detections,
            outcome,
            timings,
        })
    }

    pub fn recognize(
        &self,
        image: &DynamicImage,
        engine: &dyn OcrEngine,
        annotator: &Annotator,
    ) -> Result<Recognition, PlateError> {
        let candidate = self.locate_plate(image)?;
        self.read_plate(candidate, engine, annotator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_params_rejected_up_front() {
        let params = PipelineParams {
            approx_epsilon: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            PlateRecognizer::new(&params),
            Err(PlateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_missing_image_is_a_load_failure() {
        let result = PlateRecognizer::load_image(Path::new("/nonexistent/car.jpg"));
        assert!(matches!(result, Err(PlateError::ImageLoad { .. })));
    }
}
