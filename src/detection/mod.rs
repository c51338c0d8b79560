pub mod contours;

use std::path::Path;

use image::{DynamicImage, GrayImage};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

use crate::models::{Contour, MeasureError};

/// Decode an image file; unreadable or corrupt files surface as
/// [`MeasureError::Decode`].
pub fn load_image(path: &Path) -> Result<DynamicImage, MeasureError> {
    Ok(image::open(path)?)
}

/// Object outline detector.
///
/// Pipeline: grayscale conversion, Gaussian blur, Canny edge detection,
/// external-contour extraction. Contours enclosing less than `min_area`
/// square pixels are treated as noise and dropped.
pub struct ContourDetector {
    pub blur_sigma: f32,
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub min_area: f64,
    pub verbose: bool,
}

impl ContourDetector {
    pub fn new() -> Self {
        Self {
            blur_sigma: 1.5,
            low_threshold: 50.0,
            high_threshold: 150.0,
            min_area: 100.0,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = min_area;
        self
    }

    /// Run the full detection pipeline on an image.
    ///
    /// Returned contours are sorted by enclosed area, largest first, so
    /// selection indices are stable across runs.
    pub fn detect(&self, img: &DynamicImage) -> Vec<Contour> {
        if self.verbose {
            println!("Converting to grayscale...");
        }
        let gray = img.to_luma8();

        if self.verbose {
            println!("Applying Gaussian blur (sigma {})...", self.blur_sigma);
        }
        let blurred = gaussian_blur_f32(&gray, self.blur_sigma);

        if self.verbose {
            println!(
                "Detecting edges (thresholds {}/{})...",
                self.low_threshold, self.high_threshold
            );
        }
        let edges = self.detect_edges(&blurred);

        if self.verbose {
            println!("Extracting external contours...");
        }
        let mut found = contours::find_external_contours(&edges, self.min_area);
        found.sort_by(|a, b| b.enclosed_area().total_cmp(&a.enclosed_area()));

        if self.verbose {
            println!("Found {} contours above the area threshold", found.len());
            for (i, c) in found.iter().take(10).enumerate() {
                println!(
                    "  Contour {}: area={:.0}px², perimeter={:.0}px",
                    i + 1,
                    c.enclosed_area(),
                    c.perimeter()
                );
            }
        }

        found
    }

    /// Canny edge map of an already blurred grayscale image.
    pub fn detect_edges(&self, blurred: &GrayImage) -> GrayImage {
        canny(blurred, self.low_threshold, self.high_threshold)
    }
}

impl Default for ContourDetector {
    fn default() -> Self {
        Self::new()
    }
}
