//! Polygon helpers shared by localization, cropping and annotation

use imageproc::geometry::approximate_polygon_dp;
use imageproc::point::Point;
use serde::Serialize;

/// Absolute area enclosed by a closed point sequence (shoelace formula)
pub fn contour_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0i64;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    (twice_area as f64 / 2.0).abs()
}

/// Douglas-Peucker simplification of a closed curve.
///
/// The curve is split at two mutually distant points (the same seeding OpenCV
/// uses for closed contours) and each chain is simplified as an open curve.
/// The result lists every vertex once, without repeating the first point.
pub fn approximate_closed_polygon(points: &[Point<i32>], epsilon: f64) -> Vec<Point<i32>> {
    let points = dedup_closed(points.to_vec());
    if points.len() < 3 {
        return points;
    }

    let a = farthest_from(&points, 0);
    let b = farthest_from(&points, a);
    let (start, end) = (a.min(b), a.max(b));
    if start == end {
        return vec![points[start]];
    }

    let first_chain = &points[start..=end];
    let second_chain: Vec<Point<i32>> = points[end..]
        .iter()
        .chain(points[..=start].iter())
        .copied()
        .collect();

    let mut vertices = approximate_polygon_dp(first_chain, epsilon, false);
    vertices.pop();
    let mut tail = approximate_polygon_dp(&second_chain, epsilon, false);
    tail.pop();
    vertices.append(&mut tail);

    dedup_closed(vertices)
}

fn farthest_from(points: &[Point<i32>], origin: usize) -> usize {
    let o = points[origin];
    let mut best = origin;
    let mut best_dist = -1i64;
    for (i, p) in points.iter().enumerate() {
        let dx = (p.x - o.x) as i64;
        let dy = (p.y - o.y) as i64;
        let dist = dx * dx + dy * dy;
        if dist > best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Drop consecutive duplicates, including a closing point equal to the first
fn dedup_closed(mut points: Vec<Point<i32>>) -> Vec<Point<i32>> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

/// Axis-aligned extent of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// The four-vertex plate outline, in contour order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub points: [Point<i32>; 4],
}

impl Quad {
    pub fn from_vertices(vertices: &[Point<i32>]) -> Option<Self> {
        let points: [Point<i32>; 4] = vertices.try_into().ok()?;
        Some(Self { points })
    }

    /// Actual min/max corners; no assumption about vertex order
    pub fn extent(&self) -> Extent {
        let xs = self.points.iter().map(|p| p.x);
        let ys = self.points.iter().map(|p| p.y);
        Extent {
            min_x: xs.clone().min().unwrap_or(0),
            max_x: xs.max().unwrap_or(0),
            min_y: ys.clone().min().unwrap_or(0),
            max_y: ys.max().unwrap_or(0),
        }
    }

    pub fn as_pairs(&self) -> [(i32, i32); 4] {
        self.points.map(|p| (p.x, p.y))
    }

    pub fn area(&self) -> f64 {
        contour_area(&self.points)
    }
}
