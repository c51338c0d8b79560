pub mod annotate;
pub mod calibration;
pub mod detection;
pub mod geometry;
pub mod models;
pub mod report;
pub mod session;

pub use calibration::{measure, measure_extended, MetricOptions, ScaleFactor};
pub use detection::{load_image, ContourDetector};
pub use geometry::{extract_geometry, GeometryMode};
pub use models::{BoundingGeometry, Contour, LineSegment, Measurement, MeasureError};
pub use report::{Report, ReportRow};
pub use session::{LineSession, LineState, ObjectWizard, SegmentOutcome, WizardState};
