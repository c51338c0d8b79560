use ab_glyph::{FontRef, PxScale};
use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::models::{BoundingGeometry, LineSegment};

pub const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
pub const RED: Rgb<u8> = Rgb([255, 0, 0]);

const FONT_BYTES: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const LABEL_SCALE: f32 = 16.0;
const LABEL_OFFSET: i32 = 18;

fn label_font() -> FontRef<'static> {
    // The font is embedded at compile time; invalid bytes cannot occur
    // in a valid build.
    FontRef::try_from_slice(FONT_BYTES).expect("embedded font is valid")
}

/// Copy the input image and outline every geometry on it, with its
/// label above the outline.
pub fn annotate_geometries(
    img: &DynamicImage,
    items: &[(BoundingGeometry, String)],
    color: Rgb<u8>,
) -> RgbImage {
    let mut canvas = img.to_rgb8();
    for (geometry, label) in items {
        draw_labeled_geometry(&mut canvas, geometry, label, color);
    }
    canvas
}

/// Outline a geometry and draw its label text just above it.
pub fn draw_labeled_geometry(
    canvas: &mut RgbImage,
    geometry: &BoundingGeometry,
    label: &str,
    color: Rgb<u8>,
) {
    draw_geometry(canvas, geometry, color);
    let (x, y) = label_anchor(geometry);
    draw_label(canvas, label, x, y, color);
}

/// Outline a single geometry on an existing canvas.
pub fn draw_geometry(canvas: &mut RgbImage, geometry: &BoundingGeometry, color: Rgb<u8>) {
    match geometry {
        BoundingGeometry::AxisAligned {
            x,
            y,
            width,
            height,
        } => {
            // Extents are between pixel centers; the drawn box covers
            // the full pixel span.
            let rect = Rect::at(*x, *y).of_size(*width as u32 + 1, *height as u32 + 1);
            draw_hollow_rect_mut(canvas, rect, color);
        }
        BoundingGeometry::Rotated { corners, .. } => {
            for i in 0..4 {
                let a = corners[i];
                let b = corners[(i + 1) % 4];
                draw_line_segment_mut(
                    canvas,
                    (a.0 as f32, a.1 as f32),
                    (b.0 as f32, b.1 as f32),
                    color,
                );
            }
        }
    }
}

/// Draw label text at the given position. Empty labels draw nothing.
pub fn draw_label(canvas: &mut RgbImage, text: &str, x: i32, y: i32, color: Rgb<u8>) {
    if text.is_empty() {
        return;
    }
    let font = label_font();
    draw_text_mut(
        canvas,
        color,
        x.max(0),
        y.max(0),
        PxScale::from(LABEL_SCALE),
        &font,
        text,
    );
}

/// Label position just above the geometry's top-left corner, clamped
/// to the canvas.
fn label_anchor(geometry: &BoundingGeometry) -> (i32, i32) {
    match geometry {
        BoundingGeometry::AxisAligned { x, y, .. } => (*x, *y - LABEL_OFFSET),
        BoundingGeometry::Rotated { corners, .. } => {
            let min_x = corners.iter().map(|c| c.0).fold(f64::INFINITY, f64::min);
            let min_y = corners.iter().map(|c| c.1).fold(f64::INFINITY, f64::min);
            (min_x as i32, min_y as i32 - LABEL_OFFSET)
        }
    }
}

/// Copy the input image and draw every segment on it, with its label
/// near the segment midpoint.
pub fn annotate_segments(
    img: &DynamicImage,
    segments: &[(LineSegment, String)],
    color: Rgb<u8>,
) -> RgbImage {
    let mut canvas = img.to_rgb8();
    for (segment, label) in segments {
        draw_line_segment_mut(
            &mut canvas,
            (segment.start.0 as f32, segment.start.1 as f32),
            (segment.end.0 as f32, segment.end.1 as f32),
            color,
        );
        let mid_x = ((segment.start.0 + segment.end.0) / 2.0) as i32;
        let mid_y = ((segment.start.1 + segment.end.1) / 2.0) as i32;
        draw_label(&mut canvas, label, mid_x, mid_y - LABEL_OFFSET, color);
    }
    canvas
}
