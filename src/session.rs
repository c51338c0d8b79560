use crate::calibration::{self, MetricOptions, ScaleFactor};
use crate::geometry::{self, GeometryMode};
use crate::models::{Contour, LineSegment, Measurement, MeasureError};

/// At most this many detected objects are offered for selection.
pub const MAX_SELECTABLE_OBJECTS: usize = 10;

/// Two-step reference-object flow: pick a reference contour of known
/// width to derive the scale, then measure other contours with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WizardState {
    AwaitingReference,
    Calibrated {
        reference_index: usize,
        scale: ScaleFactor,
    },
}

pub struct ObjectWizard {
    contours: Vec<Contour>,
    state: WizardState,
}

impl ObjectWizard {
    /// Expects contours sorted largest-first, as the detector returns
    /// them; only the first [`MAX_SELECTABLE_OBJECTS`] are selectable.
    pub fn new(mut contours: Vec<Contour>) -> Self {
        contours.truncate(MAX_SELECTABLE_OBJECTS);
        Self {
            contours,
            state: WizardState::AwaitingReference,
        }
    }

    pub fn objects(&self) -> &[Contour] {
        &self.contours
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn scale(&self) -> Option<ScaleFactor> {
        match self.state {
            WizardState::Calibrated { scale, .. } => Some(scale),
            WizardState::AwaitingReference => None,
        }
    }

    /// Calibrate from the selected contour's larger bounding extent and
    /// its known real width. Failed calibration is not committed.
    pub fn select_reference(
        &mut self,
        index: usize,
        real_width_cm: f64,
    ) -> Result<ScaleFactor, MeasureError> {
        let contour = self.contour(index)?;
        let geometry = geometry::extract_geometry(contour, GeometryMode::AxisAligned, 0.0)
            .ok_or_else(|| {
                MeasureError::InvalidCalibration("reference object has zero extent".into())
            })?;
        let scale = ScaleFactor::derive(geometry.width(), real_width_cm)?;
        self.state = WizardState::Calibrated {
            reference_index: index,
            scale,
        };
        Ok(scale)
    }

    /// Measure the selected contour with the calibrated scale.
    pub fn measure_object(
        &self,
        index: usize,
        options: MetricOptions,
    ) -> Result<Measurement, MeasureError> {
        let scale = self.scale().ok_or(MeasureError::NotCalibrated)?;
        let contour = self.contour(index)?;
        let geometry = geometry::extract_geometry(contour, GeometryMode::AxisAligned, 0.0)
            .ok_or(MeasureError::NoObjectsDetected)?;
        Ok(calibration::measure_extended(
            &geometry, contour, scale, options,
        ))
    }

    /// Drop the calibration and start over.
    pub fn clear(&mut self) {
        self.state = WizardState::AwaitingReference;
    }

    fn contour(&self, index: usize) -> Result<&Contour, MeasureError> {
        self.contours.get(index).ok_or(MeasureError::BadIndex {
            index,
            available: self.contours.len(),
        })
    }
}

/// Reference-line flow state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineState {
    AwaitingReference,
    Calibrated(ScaleFactor),
}

/// What a drawn segment did to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentOutcome {
    /// The segment was the reference; the session is now calibrated.
    Calibrated(ScaleFactor),
    /// The segment was measured against the calibrated scale.
    Measured(f64),
}

/// Session for the reference-line variant.
///
/// The first drawn segment calibrates the scale from its pixel length
/// and the known reference length; every later segment is a measurement.
/// Owned exclusively by one interaction session, cleared atomically.
pub struct LineSession {
    reference_length_cm: f64,
    state: LineState,
    measurements: Vec<(LineSegment, f64)>,
}

impl LineSession {
    pub fn new(reference_length_cm: f64) -> Result<Self, MeasureError> {
        if !reference_length_cm.is_finite() || reference_length_cm <= 0.0 {
            return Err(MeasureError::InvalidCalibration(format!(
                "reference length must be positive and finite, got {reference_length_cm} cm"
            )));
        }
        Ok(Self {
            reference_length_cm,
            state: LineState::AwaitingReference,
            measurements: Vec::new(),
        })
    }

    pub fn state(&self) -> LineState {
        self.state
    }

    pub fn scale(&self) -> Option<ScaleFactor> {
        match self.state {
            LineState::Calibrated(scale) => Some(scale),
            LineState::AwaitingReference => None,
        }
    }

    /// Accumulated (segment, length_cm) measurements, in draw order.
    pub fn measurements(&self) -> &[(LineSegment, f64)] {
        &self.measurements
    }

    /// Handle one drawn segment. A zero-length reference segment is an
    /// error and leaves the session awaiting its reference.
    pub fn add_segment(&mut self, segment: LineSegment) -> Result<SegmentOutcome, MeasureError> {
        match self.state {
            LineState::AwaitingReference => {
                let scale = ScaleFactor::derive(segment.length(), self.reference_length_cm)?;
                self.state = LineState::Calibrated(scale);
                Ok(SegmentOutcome::Calibrated(scale))
            }
            LineState::Calibrated(scale) => {
                let length_cm = scale.to_cm(segment.length());
                self.measurements.push((segment, length_cm));
                Ok(SegmentOutcome::Measured(length_cm))
            }
        }
    }

    /// Reset to awaiting a reference and drop accumulated measurements.
    pub fn clear(&mut self) {
        self.state = LineState::AwaitingReference;
        self.measurements.clear();
    }
}
