use crate::cli::{Args, OutputFormat};
use crate::error::PlateError;
use std::path::PathBuf;

/// Tuned constants of the localization pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineParams {
    pub bilateral_diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
    pub canny_low: f32,
    pub canny_high: f32,
    pub max_candidates: usize,
    pub approx_epsilon: f64,
    pub text_offset: i32,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            bilateral_diameter: 17,
            sigma_color: 17.0,
            sigma_space: 11.0,
            canny_low: 30.0,
            canny_high: 200.0,
            max_candidates: 10,
            approx_epsilon: 10.0,
            text_offset: 60,
        }
    }
}

impl PipelineParams {
    pub fn validate(&self) -> Result<(), PlateError> {
        if self.bilateral_diameter == 0 {
            return Err(PlateError::InvalidParameter(
                "bilateral_diameter must be at least 1".to_string(),
            ));
        }
        if !is_positive(self.sigma_color as f64) || !is_positive(self.sigma_space as f64) {
            return Err(PlateError::InvalidParameter(
                "bilateral sigmas must be positive".to_string(),
            ));
        }
        if !self.canny_low.is_finite()
            || !self.canny_high.is_finite()
            || self.canny_low < 0.0
            || self.canny_low > self.canny_high
        {
            return Err(PlateError::InvalidParameter(format!(
                "canny thresholds must satisfy 0 <= low <= high (got {} and {})",
                self.canny_low, self.canny_high
            )));
        }
        if self.max_candidates == 0 {
            return Err(PlateError::InvalidParameter(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        if !is_positive(self.approx_epsilon) {
            return Err(PlateError::InvalidParameter(
                "approx_epsilon must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Finite and strictly positive
fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// OCR engine selection
#[derive(Debug, Clone)]
pub struct OcrConfig {
    pub engine: String,
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: "ocrs".to_string(),
            language: "eng".to_string(),
        }
    }
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub image: PathBuf,
    pub ocr: OcrConfig,
    pub font: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    pub params: PipelineParams,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            image: args.image,
            ocr: OcrConfig {
                engine: args.engine,
                language: args.language,
            },
            font: args.font,
            output_dir: args.output_dir,
            format: args.format,
            params: PipelineParams {
                bilateral_diameter: args.bilateral_diameter,
                sigma_color: args.sigma_color,
                sigma_space: args.sigma_space,
                canny_low: args.canny_low,
                canny_high: args.canny_high,
                max_candidates: args.max_candidates,
                approx_epsilon: args.approx_epsilon,
                text_offset: args.text_offset,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_from_default_args_uses_default_params() {
        let args = Args::try_parse_from(["plate-reader", "car.jpg"]).unwrap();
        let config = Config::from(args);
        assert_eq!(config.params, PipelineParams::default());
        assert_eq!(config.ocr.engine, "ocrs");
        assert_eq!(config.ocr.language, "eng");
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(PipelineParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_epsilon() {
        let params = PipelineParams {
            approx_epsilon: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(PlateError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_values_from_command_line() {
        let args = Args::try_parse_from([
            "plate-reader",
            "car.jpg",
            "--approx-epsilon",
            "NaN",
        ])
        .unwrap();
        assert!(matches!(
            Config::from(args).params.validate(),
            Err(PlateError::InvalidParameter(_))
        ));

        let args =
            Args::try_parse_from(["plate-reader", "car.jpg", "--sigma-color", "NaN"]).unwrap();
        assert!(Config::from(args).params.validate().is_err());

        let params = PipelineParams {
            canny_high: f32::INFINITY,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_canny_thresholds() {
        let params = PipelineParams {
            canny_low: 250.0,
            canny_high: 200.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_candidates() {
        let params = PipelineParams {
            max_candidates: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
