use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::models::{BoundingGeometry, Contour, Measurement, MeasureError};

/// Pixels-per-centimeter conversion ratio.
///
/// Always strictly positive and finite; construction enforces it so the
/// rest of the crate can divide by it freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// Derive a scale from a measured pixel extent and its known
    /// real-world extent in centimeters.
    pub fn derive(pixel_extent: f64, real_extent: f64) -> Result<Self, MeasureError> {
        if !pixel_extent.is_finite() || pixel_extent <= 0.0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "pixel extent must be positive and finite, got {pixel_extent}"
            )));
        }
        if !real_extent.is_finite() || real_extent <= 0.0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "real extent must be positive and finite, got {real_extent} cm"
            )));
        }
        Ok(Self(pixel_extent / real_extent))
    }

    /// Use a constant pixels-per-cm ratio, validated the same way.
    pub fn fixed(pixels_per_cm: f64) -> Result<Self, MeasureError> {
        if !pixels_per_cm.is_finite() || pixels_per_cm <= 0.0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "pixels-per-cm must be positive and finite, got {pixels_per_cm}"
            )));
        }
        Ok(Self(pixels_per_cm))
    }

    pub fn pixels_per_cm(&self) -> f64 {
        self.0
    }

    /// Convert a pixel quantity to centimeters.
    pub fn to_cm(&self, pixels: f64) -> f64 {
        pixels / self.0
    }
}

/// Which optional metrics to attach to a measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricOptions {
    pub perimeter: bool,
    pub enclosing_circle: bool,
    pub aspect_ratio: bool,
}

impl MetricOptions {
    /// Everything the "advanced options" panel of the tool shows.
    pub fn all() -> Self {
        Self {
            perimeter: true,
            enclosing_circle: true,
            aspect_ratio: true,
        }
    }
}

/// Convert a bounding geometry to real-world dimensions.
pub fn measure(geometry: &BoundingGeometry, scale: ScaleFactor) -> Measurement {
    let width_cm = scale.to_cm(geometry.width());
    let height_cm = scale.to_cm(geometry.height());
    Measurement {
        width_cm,
        height_cm,
        area_cm2: width_cm * height_cm,
        perimeter_cm: None,
        radius_cm: None,
        aspect_ratio: None,
    }
}

/// Like [`measure`], with the requested contour-derived metrics attached.
pub fn measure_extended(
    geometry: &BoundingGeometry,
    contour: &Contour,
    scale: ScaleFactor,
    options: MetricOptions,
) -> Measurement {
    let mut m = measure(geometry, scale);
    if options.perimeter {
        m.perimeter_cm = Some(scale.to_cm(contour.perimeter()));
    }
    if options.enclosing_circle {
        let (_, radius) = geometry::min_enclosing_circle(&contour.points);
        m.radius_cm = Some(scale.to_cm(radius));
    }
    if options.aspect_ratio {
        // Zero height yields ratio 0 rather than a division fault.
        m.aspect_ratio = if m.height_cm > 0.0 {
            Some(m.width_cm / m.height_cm)
        } else {
            Some(0.0)
        };
    }
    m
}
