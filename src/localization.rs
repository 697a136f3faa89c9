//! Plate localization from edge contours
//!
//! Edges are detected on the smoothed grayscale image, every contour border is
//! ranked by enclosed area, and the first of the largest contours that
//! simplifies to exactly four vertices is taken as the plate outline.

use crate::config::PipelineParams;
use crate::error::PlateError;
use crate::geometry::{approximate_closed_polygon, contour_area, Quad};
use image::GrayImage;
use imageproc::contours::find_contours;
use imageproc::edges::canny;
use imageproc::point::Point;

/// Binary edge map (255 on edges) via Canny hysteresis thresholding
pub fn detect_edges(smoothed: &GrayImage, low: f32, high: f32) -> GrayImage {
    canny(smoothed, low, high)
}

/// A contour kept for plate selection
#[derive(Debug, Clone)]
pub struct RankedContour {
    pub area: f64,
    pub points: Vec<Point<i32>>,
}

/// All contour borders of the edge map, largest area first, truncated
pub fn rank_contours(edges: &GrayImage, max_candidates: usize) -> Vec<RankedContour> {
    // Outer and hole borders alike; nesting is irrelevant for ranking
    let mut ranked: Vec<RankedContour> = find_contours::<i32>(edges)
        .into_iter()
        .map(|contour| RankedContour {
            area: contour_area(&contour.points),
            points: contour.points,
        })
        .collect();

    tracing::debug!("Found {} contours", ranked.len());

    ranked.sort_by(|a, b| b.area.total_cmp(&a.area));
    ranked.truncate(max_candidates);
    ranked
}

/// Output of the localization stage
#[derive(Debug, Clone)]
pub struct Localization {
    pub edges: GrayImage,
    pub quad: Quad,
}

pub struct Localizer {
    canny_low: f32,
    canny_high: f32,
    max_candidates: usize,
    approx_epsilon: f64,
}

impl Localizer {
    pub fn new(params: &PipelineParams) -> Self {
        Self {
            canny_low: params.canny_low,
            canny_high: params.canny_high,
            max_candidates: params.max_candidates,
            approx_epsilon: params.approx_epsilon,
        }
    }

    /// First-match selection over the ranked contours.
    ///
    /// Returns `None` when no candidate simplifies to four vertices.
    pub fn find_plate(&self, edges: &GrayImage) -> Option<Quad> {
        for (rank, contour) in rank_contours(edges, self.max_candidates)
            .iter()
            .enumerate()
        {
            let polygon = approximate_closed_polygon(&contour.points, self.approx_epsilon);
            tracing::debug!(
                rank,
                area = contour.area,
                vertices = polygon.len(),
                "Examined contour"
            );
            if let Some(quad) = Quad::from_vertices(&polygon) {
                tracing::info!("Plate outline at rank {}: {:?}", rank, quad.as_pairs());
                return Some(quad);
            }
        }
        None
    }

    pub fn locate(&self, smoothed: &GrayImage) -> Result<Localization, PlateError> {
        let edges = detect_edges(smoothed, self.canny_low, self.canny_high);
        match self.find_plate(&edges) {
            Some(quad) => Ok(Localization { edges, quad }),
            None => {
                tracing::warn!(
                    "No four-vertex contour among the {} largest",
                    self.max_candidates
                );
                Err(PlateError::PlateNotLocalized {
                    examined: self.max_candidates,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Extent;
    use image::Luma;
    use imageproc::drawing::{
        draw_filled_rect_mut, draw_hollow_circle_mut, draw_hollow_rect_mut,
        draw_line_segment_mut,
    };
    use imageproc::rect::Rect;

    fn localizer() -> Localizer {
        Localizer::new(&PipelineParams::default())
    }

    fn draw_triangle(img: &mut GrayImage, a: (f32, f32), b: (f32, f32), c: (f32, f32)) {
        draw_line_segment_mut(img, a, b, Luma([255]));
        draw_line_segment_mut(img, b, c, Luma([255]));
        draw_line_segment_mut(img, c, a, Luma([255]));
    }

    #[test]
    fn test_finds_rectangle_outline() {
        let mut edges = GrayImage::new(200, 120);
        draw_hollow_rect_mut(&mut edges, Rect::at(40, 30).of_size(100, 40), Luma([255]));

        let quad = localizer().find_plate(&edges).expect("rectangle should be found");
        assert_eq!(
            quad.extent(),
            Extent {
                min_x: 40,
                min_y: 30,
                max_x: 139,
                max_y: 69
            }
        );
    }

    #[test]
    fn test_blank_edge_map_has_no_plate() {
        let edges = GrayImage::new(100, 100);
        assert!(localizer().find_plate(&edges).is_none());
    }

    #[test]
    fn test_circle_is_not_a_plate() {
        let mut edges = GrayImage::new(200, 200);
        draw_hollow_circle_mut(&mut edges, (100, 100), 60, Luma([255]));
        assert!(localizer().find_plate(&edges).is_none());
    }

    #[test]
    fn test_first_four_vertex_candidate_wins_over_larger_triangle() {
        let mut edges = GrayImage::new(300, 200);
        draw_triangle(&mut edges, (10.0, 190.0), (150.0, 10.0), (290.0, 190.0));
        draw_hollow_rect_mut(&mut edges, Rect::at(120, 140).of_size(60, 25), Luma([255]));

        let quad = localizer().find_plate(&edges).expect("rectangle should be found");
        let extent = quad.extent();
        assert_eq!((extent.min_x, extent.min_y), (120, 140));
        assert_eq!((extent.max_x, extent.max_y), (179, 164));
    }

    #[test]
    fn test_larger_rectangle_is_selected_first() {
        let mut edges = GrayImage::new(300, 200);
        draw_hollow_rect_mut(&mut edges, Rect::at(10, 10).of_size(60, 30), Luma([255]));
        draw_hollow_rect_mut(&mut edges, Rect::at(100, 80).of_size(150, 60), Luma([255]));

        let quad = localizer().find_plate(&edges).unwrap();
        assert_eq!(quad.extent().min_x, 100);
        assert_eq!(quad.extent().min_y, 80);
    }

    #[test]
    fn test_rank_contours_sorted_and_truncated() {
        let mut edges = GrayImage::new(300, 200);
        for i in 0..6 {
            let size = 10 + i * 8;
            draw_hollow_rect_mut(
                &mut edges,
                Rect::at(5 + (i as i32) * 48, 5).of_size(size, size),
                Luma([255]),
            );
        }

        let ranked = rank_contours(&edges, 4);
        assert_eq!(ranked.len(), 4);
        for pair in ranked.windows(2) {
            assert!(pair[0].area >= pair[1].area);
        }
    }

    #[test]
    fn test_locate_synthetic_plate() {
        let mut img = GrayImage::from_pixel(200, 120, Luma([30]));
        draw_filled_rect_mut(&mut img, Rect::at(40, 30).of_size(100, 40), Luma([220]));

        let localization = localizer().locate(&img).expect("plate should be localized");
        let extent = localization.quad.extent();

        assert!((extent.min_x - 40).abs() <= 3, "{:?}", extent);
        assert!((extent.min_y - 30).abs() <= 3, "{:?}", extent);
        assert!((extent.max_x - 139).abs() <= 3, "{:?}", extent);
        assert!((extent.max_y - 69).abs() <= 3, "{:?}", extent);
        assert_eq!(localization.edges.dimensions(), (200, 120));
    }

    #[test]
    fn test_locate_uniform_image_fails_with_named_error() {
        let img = GrayImage::from_pixel(80, 60, Luma([128]));
        match localizer().locate(&img) {
            Err(PlateError::PlateNotLocalized { examined }) => assert_eq!(examined, 10),
            other => panic!("Expected PlateNotLocalized, got {:?}", other.map(|l| l.quad)),
        }
    }
}
