use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};

use crate::models::Contour;

/// Extract external contours from a binary edge image.
///
/// Hole borders are discarded; only outer boundaries are measurable
/// objects. Contours enclosing less than `min_area` square pixels are
/// dropped as noise.
pub fn find_external_contours(edges: &GrayImage, min_area: f64) -> Vec<Contour> {
    find_contours::<i32>(edges)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .map(|c| Contour::new(c.points))
        .filter(|c| c.enclosed_area() >= min_area)
        .collect()
}
