use imageproc::geometry::min_area_rect;
use imageproc::point::Point;

use crate::models::{BoundingGeometry, Contour};

/// Which bounding geometry to derive from a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GeometryMode {
    /// Axis-aligned bounding box.
    AxisAligned,
    /// Minimum-area rotated rectangle.
    #[default]
    Rotated,
}

/// Derive the bounding geometry for a contour.
///
/// Returns `None` for contours whose enclosed area is below `min_area`
/// (noise suppression) and for degenerate geometries with a zero extent.
/// Extents are measured between pixel centers.
pub fn extract_geometry(
    contour: &Contour,
    mode: GeometryMode,
    min_area: f64,
) -> Option<BoundingGeometry> {
    if contour.enclosed_area() < min_area {
        return None;
    }

    let geometry = match mode {
        GeometryMode::AxisAligned => {
            let (min_x, min_y, max_x, max_y) = contour.bounds()?;
            BoundingGeometry::AxisAligned {
                x: min_x,
                y: min_y,
                width: (max_x - min_x) as f64,
                height: (max_y - min_y) as f64,
            }
        }
        GeometryMode::Rotated => rotated_rect(&contour.points)?,
    };

    if geometry.is_degenerate() {
        return None;
    }
    Some(geometry)
}

/// Minimum-area rotated rectangle around a point set.
fn rotated_rect(points: &[Point<i32>]) -> Option<BoundingGeometry> {
    if points.len() < 3 {
        return None;
    }
    let corners = min_area_rect(points);
    let c: Vec<(f64, f64)> = corners
        .iter()
        .map(|p| (p.x as f64, p.y as f64))
        .collect();

    let width = dist(c[0], c[1]);
    let height = dist(c[1], c[2]);
    let angle_degrees = (c[1].1 - c[0].1).atan2(c[1].0 - c[0].0).to_degrees();
    let center = (
        (c[0].0 + c[1].0 + c[2].0 + c[3].0) / 4.0,
        (c[0].1 + c[1].1 + c[2].1 + c[3].1) / 4.0,
    );

    Some(BoundingGeometry::Rotated {
        center,
        width,
        height,
        angle_degrees,
        corners: [c[0], c[1], c[2], c[3]],
    })
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt()
}

const CIRCLE_EPS: f64 = 1e-7;

/// Smallest circle enclosing all points, as (center, radius).
///
/// Welzl's incremental construction without randomization; contour
/// point counts are small enough that the worst case does not matter.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> ((f64, f64), f64) {
    let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    match pts.len() {
        0 => ((0.0, 0.0), 0.0),
        1 => (pts[0], 0.0),
        _ => {
            let mut circle = circle_from_two(pts[0], pts[1]);
            for i in 2..pts.len() {
                if contains(circle, pts[i]) {
                    continue;
                }
                circle = circle_from_two(pts[i], pts[0]);
                for j in 1..i {
                    if contains(circle, pts[j]) {
                        continue;
                    }
                    circle = circle_from_two(pts[i], pts[j]);
                    for k in 0..j {
                        if !contains(circle, pts[k]) {
                            circle = circle_from_three(pts[i], pts[j], pts[k]);
                        }
                    }
                }
            }
            circle
        }
    }
}

fn contains(circle: ((f64, f64), f64), p: (f64, f64)) -> bool {
    dist(circle.0, p) <= circle.1 + CIRCLE_EPS
}

fn circle_from_two(a: (f64, f64), b: (f64, f64)) -> ((f64, f64), f64) {
    let center = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
    (center, dist(a, b) / 2.0)
}

fn circle_from_three(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> ((f64, f64), f64) {
    let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
    if d.abs() < CIRCLE_EPS {
        // Collinear: fall back to the widest pair.
        let candidates = [
            circle_from_two(a, b),
            circle_from_two(b, c),
            circle_from_two(a, c),
        ];
        return candidates
            .into_iter()
            .max_by(|x, y| x.1.total_cmp(&y.1))
            .unwrap_or(((a.0, a.1), 0.0));
    }
    let a2 = a.0 * a.0 + a.1 * a.1;
    let b2 = b.0 * b.0 + b.1 * b.1;
    let c2 = c.0 * c.0 + c.1 * c.1;
    let center = (
        (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d,
        (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d,
    );
    (center, dist(center, a))
}
