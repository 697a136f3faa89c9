//! OCR engine implementations
//!
//! This module contains implementations of the OcrEngine trait for different
//! OCR backends. Engines are conditionally compiled based on feature flags and
//! constructed on demand, since building one may download model files.

#[cfg(feature = "engine-ocrs")]
pub mod ocrs;

#[cfg(feature = "engine-leptess")]
pub mod leptess;

#[cfg(any(feature = "engine-ocrs", feature = "engine-leptess"))]
mod download;

use crate::config::OcrConfig;
use crate::engine::OcrEngine;
use crate::error::PlateError;

/// Names of the engines compiled into this build
pub fn available() -> Vec<&'static str> {
    let mut names = Vec::new();
    #[cfg(feature = "engine-ocrs")]
    names.push("ocrs");
    #[cfg(feature = "engine-leptess")]
    names.push("leptess");
    names
}

/// Create the configured engine and check it supports the configured language
pub fn create(config: &OcrConfig) -> Result<Box<dyn OcrEngine>, PlateError> {
    let engine: Box<dyn OcrEngine> = match config.engine.as_str() {
        #[cfg(feature = "engine-ocrs")]
        "ocrs" => {
            tracing::info!("Initializing ocrs engine...");
            Box::new(ocrs::OcrsEngine::new(config)?)
        }
        #[cfg(feature = "engine-leptess")]
        "leptess" => {
            tracing::info!("Initializing leptess engine...");
            Box::new(leptess::LeptessEngine::new(config)?)
        }
        other => {
            return Err(PlateError::UnknownEngine {
                name: other.to_string(),
                available: available().join(", "),
            })
        }
    };

    check_language(engine.as_ref(), &config.language)?;
    Ok(engine)
}

pub(crate) fn check_language(engine: &dyn OcrEngine, language: &str) -> Result<(), PlateError> {
    if engine.supported_languages().iter().any(|l| l == language) {
        Ok(())
    } else {
        Err(PlateError::UnsupportedLanguage {
            engine: engine.name().to_string(),
            language: language.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Detection;
    use image::GrayImage;

    struct EnglishOnly;

    impl OcrEngine for EnglishOnly {
        fn name(&self) -> &'static str {
            "english-only"
        }

        fn description(&self) -> &'static str {
            "test engine"
        }

        fn read_text(&self, _image: &GrayImage) -> Result<Vec<Detection>, PlateError> {
            Ok(Vec::new())
        }

        fn supported_languages(&self) -> Vec<String> {
            vec!["eng".to_string()]
        }
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let config = OcrConfig {
            engine: "does-not-exist".to_string(),
            language: "eng".to_string(),
        };
        match create(&config) {
            Err(PlateError::UnknownEngine { name, .. }) => assert_eq!(name, "does-not-exist"),
            Err(other) => panic!("Expected UnknownEngine, got {}", other),
            Ok(_) => panic!("Expected UnknownEngine"),
        }
    }

    #[test]
    fn test_language_check() {
        assert!(check_language(&EnglishOnly, "eng").is_ok());
        assert!(matches!(
            check_language(&EnglishOnly, "deu"),
            Err(PlateError::UnsupportedLanguage { .. })
        ));
    }

    #[test]
    #[cfg(feature = "engine-ocrs")]
    fn test_default_build_lists_ocrs() {
        assert!(available().contains(&"ocrs"));
    }
}
