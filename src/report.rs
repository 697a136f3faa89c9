use crate::annotate::Outcome;
use crate::crop::BoundingBox;
use crate::engine::Detection;
use crate::preprocessing::StepTiming;
use crate::recognizer::Recognition;
use serde::Serialize;

pub const NO_TEXT_MESSAGE: &str = "No text detected on the license plate.";

/// Machine-readable summary of a run
#[derive(Debug, Serialize)]
pub struct PlateReport {
    pub image: String,
    pub location: [(i32, i32); 4],
    pub bounding_box: BoundingBox,
    pub detections: Vec<Detection>,
    pub text: Option<String>,
    pub timings: Vec<StepTiming>,
}

impl PlateReport {
    pub fn new(image: &str, recognition: &Recognition) -> Self {
        Self {
            image: image.to_string(),
            location: recognition.candidate.localization.quad.as_pairs(),
            bounding_box: recognition.candidate.crop.bounds,
            detections: recognition.detections.clone(),
            text: recognition.outcome.text().map(str::to_string),
            timings: recognition.timings.clone(),
        }
    }
}

/// Human-readable lines: the raw OCR result, then the plate text or a notice
pub fn render_text(recognition: &Recognition) -> String {
    let mut out = String::from("OCR Result: [");
    for (i, d) in recognition.detections.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&format!(
            "({:?}, {:?}, {:.3})",
            d.polygon, d.text, d.confidence
        ));
    }
    out.push_str("]\n");

    match &recognition.outcome {
        Outcome::Annotated { text, .. } => {
            out.push_str(&format!("Detected License Plate: {}\n", text));
        }
        Outcome::NoText => {
            out.push_str(NO_TEXT_MESSAGE);
            out.push('\n');
        }
    }
    out
}
