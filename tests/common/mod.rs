// Not every test binary uses every helper.
#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use imageproc::point::Point;

use photoruler::Contour;

/// Black canvas with filled white rectangles, given as (x, y, w, h).
pub fn image_with_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for &(rx, ry, rw, rh) in rects {
        for y in ry..(ry + rh).min(height) {
            for x in rx..(rx + rw).min(width) {
                img.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Rectangular contour from corner points, w and h in pixel extents.
pub fn rect_contour(x: i32, y: i32, w: i32, h: i32) -> Contour {
    Contour::new(vec![
        Point::new(x, y),
        Point::new(x + w, y),
        Point::new(x + w, y + h),
        Point::new(x, y + h),
    ])
}
