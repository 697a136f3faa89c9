use crate::config::PipelineParams;
use crate::error::PlateError;
use image::{DynamicImage, GrayImage};
use serde::Serialize;
use std::time::Instant;

use super::steps;

/// Timing information for a single step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

impl StepTiming {
    pub fn since(name: &str, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

/// Result of preprocessing
#[derive(Debug, Clone)]
pub struct Preprocessed {
    /// Grayscale image before smoothing, used for cropping
    pub gray: GrayImage,
    /// Smoothed grayscale image, used for edge detection
    pub smoothed: GrayImage,
    pub steps: Vec<StepTiming>,
}

/// Grayscale conversion followed by bilateral smoothing
pub struct Pipeline {
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
}

impl Pipeline {
    pub fn new(params: &PipelineParams) -> Self {
        Self {
            diameter: params.bilateral_diameter,
            sigma_color: params.sigma_color,
            sigma_space: params.sigma_space,
        }
    }

    pub fn process(&self, image: &DynamicImage) -> Result<Preprocessed, PlateError> {
        let mut steps_timing = Vec::new();

        let gray = self.run_step("grayscale", &mut steps_timing, || {
            Ok(steps::grayscale::apply(image))
        })?;

        let smoothed = self.run_step("bilateral", &mut steps_timing, || {
            steps::bilateral::apply(&gray, self.diameter, self.sigma_color, self.sigma_space)
        })?;

        tracing::debug!(
            "Preprocessed {}x{} image in {:?}",
            gray.width(),
            gray.height(),
            steps_timing
        );

        Ok(Preprocessed {
            gray,
            smoothed,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<GrayImage, PlateError>
    where
        F: FnOnce() -> Result<GrayImage, PlateError>,
    {
        let step_start = Instant::now();
        let result = step_fn()?;
        timings.push(StepTiming::since(name, step_start));
        Ok(result)
    }
}
