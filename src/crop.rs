//! Mask and crop the localized plate
//!
//! The plate polygon is rasterized into a binary mask; the bounding box of the
//! mask selects the rectangle of the grayscale image handed to OCR. For a
//! rotated plate that rectangle also contains background outside the polygon.

use crate::error::PlateError;
use crate::geometry::Quad;
use image::{imageops, GrayImage, Luma, Rgb, RgbImage};
use imageproc::drawing::draw_polygon_mut;
use serde::Serialize;

const MASK_ON: u8 = 255;

/// Inclusive pixel bounds of the plate region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1 + 1
    }
}

/// Zero-filled mask with the quad's interior set to 255
pub fn build_mask(dimensions: (u32, u32), quad: &Quad) -> GrayImage {
    let mut mask = GrayImage::new(dimensions.0, dimensions.1);
    draw_polygon_mut(&mut mask, &quad.points, Luma([MASK_ON]));
    mask
}

/// Keep color pixels under the mask, black elsewhere
pub fn apply_mask(image: &RgbImage, mask: &GrayImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        if mask.get_pixel(x, y).0[0] == MASK_ON {
            *image.get_pixel(x, y)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

/// Min/max column and row of the masked pixels, `None` for an empty mask
pub fn mask_bounds(mask: &GrayImage) -> Option<BoundingBox> {
    let mut bounds: Option<BoundingBox> = None;
    for (x, y, pixel) in mask.enumerate_pixels() {
        if pixel.0[0] != MASK_ON {
            continue;
        }
        bounds = Some(match bounds {
            None => BoundingBox {
                x1: x,
                y1: y,
                x2: x,
                y2: y,
            },
            Some(b) => BoundingBox {
                x1: b.x1.min(x),
                y1: b.y1.min(y),
                x2: b.x2.max(x),
                y2: b.y2.max(y),
            },
        });
    }
    bounds
}

/// Crop inclusive of the max bound
pub fn crop(gray: &GrayImage, bounds: &BoundingBox) -> GrayImage {
    imageops::crop_imm(gray, bounds.x1, bounds.y1, bounds.width(), bounds.height()).to_image()
}

/// Output of the mask and crop stage
#[derive(Debug, Clone)]
pub struct PlateCrop {
    pub mask: GrayImage,
    /// Color image restricted to the plate, for inspection only
    pub masked: RgbImage,
    pub bounds: BoundingBox,
    pub plate: GrayImage,
}

impl PlateCrop {
    pub fn from_quad(color: &RgbImage, gray: &GrayImage, quad: &Quad) -> Result<Self, PlateError> {
        let mask = build_mask(gray.dimensions(), quad);
        let masked = apply_mask(color, &mask);
        let bounds = mask_bounds(&mask).ok_or(PlateError::EmptyMask)?;
        let plate = crop(gray, &bounds);

        tracing::info!(
            "Cropped plate region {:?} ({}x{})",
            bounds,
            plate.width(),
            plate.height()
        );

        Ok(Self {
            mask,
            masked,
            bounds,
            plate,
        })
    }
}
