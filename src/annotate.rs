//! Overlay the recognized plate text on the original image

use crate::engine::Detection;
use crate::error::PlateError;
use crate::geometry::Quad;
use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;

const ANNOTATION_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
const RECT_THICKNESS: i32 = 3;
const FONT_SCALE: f32 = 32.0;

/// Fonts tried when none is configured
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Load the overlay font.
///
/// A configured path must load. Without one, well-known system fonts are
/// tried and `None` is returned when none exists.
pub fn load_font(configured: Option<&Path>) -> Result<Option<FontArc>, PlateError> {
    if let Some(path) = configured {
        return read_font(path).map(Some);
    }

    for candidate in SYSTEM_FONTS {
        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }
        match read_font(path) {
            Ok(font) => {
                tracing::debug!("Using font {}", candidate);
                return Ok(Some(font));
            }
            Err(e) => tracing::debug!("Skipping font {}: {}", candidate, e),
        }
    }

    Ok(None)
}

fn read_font(path: &Path) -> Result<FontArc, PlateError> {
    let data = std::fs::read(path)
        .map_err(|e| PlateError::Font(format!("{}: {}", path.display(), e)))?;
    FontArc::try_from_vec(data).map_err(|e| PlateError::Font(format!("{}: {}", path.display(), e)))
}

/// Result of the annotation stage
#[derive(Debug, Clone)]
pub enum Outcome {
    /// First detection's text drawn onto a copy of the image
    Annotated { text: String, image: RgbImage },
    /// OCR found nothing; nothing was drawn
    NoText,
}

impl Outcome {
    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Annotated { text, .. } => Some(text),
            Outcome::NoText => None,
        }
    }
}

pub struct Annotator {
    font: Option<FontArc>,
    text_offset: i32,
}

impl Annotator {
    pub fn new(font: Option<FontArc>, text_offset: i32) -> Self {
        if font.is_none() {
            tracing::warn!("No font available, plate text will not be drawn");
        }
        Self { font, text_offset }
    }

    /// Draw the first detection's text and the plate rectangle.
    ///
    /// The rectangle spans the quad's actual min/max corners. The text
    /// baseline sits `text_offset` pixels below the plate's bottom edge.
    pub fn annotate(&self, image: &RgbImage, quad: &Quad, detections: &[Detection]) -> Outcome {
        let Some(first) = detections.first() else {
            tracing::info!("No text detected, skipping annotation");
            return Outcome::NoText;
        };

        let extent = quad.extent();
        let mut annotated = image.clone();

        if let Some(font) = &self.font {
            let baseline = extent.max_y + self.text_offset;
            draw_text_mut(
                &mut annotated,
                ANNOTATION_COLOR,
                extent.min_x,
                baseline - FONT_SCALE as i32,
                PxScale::from(FONT_SCALE),
                font,
                &first.text,
            );
        }

        let width = (extent.max_x - extent.min_x + 1).max(1) as u32;
        let height = (extent.max_y - extent.min_y + 1).max(1) as u32;
        for i in 0..RECT_THICKNESS {
            let rect = Rect::at(extent.min_x - i, extent.min_y - i)
                .of_size(width + 2 * i as u32, height + 2 * i as u32);
            draw_hollow_rect_mut(&mut annotated, rect, ANNOTATION_COLOR);
        }

        tracing::info!("Annotated plate with {:?}", first.text);

        Outcome::Annotated {
            text: first.text.clone(),
            image: annotated,
        }
    }
}
