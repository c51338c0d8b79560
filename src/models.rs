use imageproc::point::Point;
use serde::{Deserialize, Serialize};

/// Errors surfaced by detection, calibration and reporting.
///
/// All of these are terminal for the current action: inputs are
/// user-supplied, so nothing is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum MeasureError {
    /// The input image could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// A calibration extent was zero, negative or non-finite.
    #[error("invalid calibration: {0}")]
    InvalidCalibration(String),

    /// Edge detection found no contour above the area threshold.
    #[error("no measurable objects detected")]
    NoObjectsDetected,

    /// A measurement was requested before a reference was selected.
    #[error("no reference selected yet; calibrate first")]
    NotCalibrated,

    /// A selection index did not match any detected object.
    #[error("object index {index} out of range ({available} objects detected)")]
    BadIndex { index: usize, available: usize },

    /// A report file could not be parsed back.
    #[error("malformed report at line {line}: {reason}")]
    MalformedReport { line: usize, reason: String },
}

/// A closed external boundary detected in an image.
///
/// The point sequence comes straight from contour extraction and is
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Contour {
    pub points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    /// Enclosed area in square pixels (shoelace formula).
    pub fn enclosed_area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            let q = &self.points[(i + 1) % self.points.len()];
            sum += p.x as f64 * q.y as f64 - q.x as f64 * p.y as f64;
        }
        sum.abs() / 2.0
    }

    /// Closed arc length of the boundary in pixels.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        let mut total = 0.0;
        for (i, p) in self.points.iter().enumerate() {
            let q = &self.points[(i + 1) % self.points.len()];
            let dx = (q.x - p.x) as f64;
            let dy = (q.y - p.y) as f64;
            total += (dx * dx + dy * dy).sqrt();
        }
        total
    }

    /// Axis-aligned point bounds as (min_x, min_y, max_x, max_y).
    pub fn bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let first = self.points.first()?;
        let mut bounds = (first.x, first.y, first.x, first.y);
        for p in &self.points {
            bounds.0 = bounds.0.min(p.x);
            bounds.1 = bounds.1.min(p.y);
            bounds.2 = bounds.2.max(p.x);
            bounds.3 = bounds.3.max(p.y);
        }
        Some(bounds)
    }
}

/// Minimal rectangle enclosing a contour, in pixel units.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundingGeometry {
    /// Axis-aligned bounding box. Cheap, orientation-insensitive.
    AxisAligned {
        x: i32,
        y: i32,
        width: f64,
        height: f64,
    },
    /// Minimum-area rotated rectangle. Tighter fit, reports its angle.
    Rotated {
        center: (f64, f64),
        width: f64,
        height: f64,
        angle_degrees: f64,
        corners: [(f64, f64); 4],
    },
}

impl BoundingGeometry {
    /// Larger of the two measured extents. Reported as "width" so that
    /// axis labeling never flips between near-identical objects.
    pub fn width(&self) -> f64 {
        let (w, h) = self.raw_extents();
        w.max(h)
    }

    /// Smaller of the two measured extents.
    pub fn height(&self) -> f64 {
        let (w, h) = self.raw_extents();
        w.min(h)
    }

    fn raw_extents(&self) -> (f64, f64) {
        match self {
            BoundingGeometry::AxisAligned { width, height, .. } => (*width, *height),
            BoundingGeometry::Rotated { width, height, .. } => (*width, *height),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.height() <= 0.0
    }
}

/// Real-world dimensions derived from a geometry and a scale factor.
///
/// Created on demand per selected contour or segment, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub width_cm: f64,
    pub height_cm: f64,
    pub area_cm2: f64,
    pub perimeter_cm: Option<f64>,
    pub radius_cm: Option<f64>,
    pub aspect_ratio: Option<f64>,
}

/// A user-drawn line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: (f64, f64),
    pub end: (f64, f64),
}

impl LineSegment {
    pub fn new(start: (f64, f64), end: (f64, f64)) -> Self {
        Self { start, end }
    }

    /// Euclidean length in pixels.
    pub fn length(&self) -> f64 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        (dx * dx + dy * dy).sqrt()
    }
}
