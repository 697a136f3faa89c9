//! Stage images written for inspection

use crate::annotate::Outcome;
use crate::error::PlateError;
use crate::recognizer::{PlateCandidate, Recognition};
use image::{ImageBuffer, Pixel, PixelWithColorType};
use std::ops::Deref;
use std::path::{Path, PathBuf};

/// Writes stage images into a directory, or nothing when unset
pub struct ArtifactWriter {
    dir: Option<PathBuf>,
}

impl ArtifactWriter {
    pub fn new(dir: Option<PathBuf>) -> Result<Self, PlateError> {
        if let Some(dir) = &dir {
            std::fs::create_dir_all(dir).map_err(|e| PlateError::Artifact {
                path: dir.clone(),
                source: image::ImageError::IoError(e),
            })?;
        }
        Ok(Self { dir })
    }

    /// Grayscale, edge map, masked color image and the crop
    pub fn write_candidate(&self, candidate: &PlateCandidate) -> Result<Vec<PathBuf>, PlateError> {
        let Some(dir) = &self.dir else {
            return Ok(Vec::new());
        };
        Ok(vec![
            save(dir, "gray.png", &candidate.preprocessed.gray)?,
            save(dir, "edges.png", &candidate.localization.edges)?,
            save(dir, "masked.png", &candidate.crop.masked)?,
            save(dir, "plate.png", &candidate.crop.plate)?,
        ])
    }

    /// Every stage image plus the annotated result when there is one
    pub fn write_recognition(&self, recognition: &Recognition) -> Result<Vec<PathBuf>, PlateError> {
        let mut written = self.write_candidate(&recognition.candidate)?;
        if let (Some(dir), Outcome::Annotated { image, .. }) = (&self.dir, &recognition.outcome) {
            written.push(save(dir, "annotated.png", image)?);
        }
        Ok(written)
    }
}

fn save<P, C>(dir: &Path, name: &str, image: &ImageBuffer<P, C>) -> Result<PathBuf, PlateError>
where
    P: Pixel + PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: Deref<Target = [P::Subpixel]>,
{
    let path = dir.join(name);
    image.save(&path).map_err(|source| PlateError::Artifact {
        path: path.clone(),
        source,
    })?;
    tracing::debug!("Wrote {}", path.display());
    Ok(path)
}
