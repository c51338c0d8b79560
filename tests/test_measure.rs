mod common;

use photoruler::calibration::MetricOptions;
use photoruler::{
    measure, measure_extended, BoundingGeometry, LineSegment, LineSession, MeasureError,
    ObjectWizard, ScaleFactor, SegmentOutcome, WizardState,
};

#[test]
fn derive_is_pixel_over_real() {
    let scale = ScaleFactor::derive(85.6, 8.56).unwrap();
    assert!((scale.pixels_per_cm() - 10.0).abs() < 1e-9);

    let scale = ScaleFactor::derive(200.0, 10.0).unwrap();
    assert!((scale.pixels_per_cm() - 20.0).abs() < 1e-9);
}

#[test]
fn derive_rejects_bad_extents() {
    for (px, real) in [
        (0.0, 10.0),
        (-5.0, 10.0),
        (100.0, 0.0),
        (100.0, -1.0),
        (f64::NAN, 10.0),
        (100.0, f64::INFINITY),
    ] {
        assert!(matches!(
            ScaleFactor::derive(px, real),
            Err(MeasureError::InvalidCalibration(_))
        ));
    }
    assert!(matches!(
        ScaleFactor::fixed(0.0),
        Err(MeasureError::InvalidCalibration(_))
    ));
}

#[test]
fn measures_credit_card_scenario() {
    // 85.6 px over 8.56 cm gives scale 10; a 200x100 px box is then
    // 20 x 10 cm with an area of 200 cm².
    let scale = ScaleFactor::derive(85.6, 8.56).unwrap();
    let geometry = BoundingGeometry::AxisAligned {
        x: 0,
        y: 0,
        width: 200.0,
        height: 100.0,
    };
    let m = measure(&geometry, scale);
    assert!((m.width_cm - 20.0).abs() < 1e-9);
    assert!((m.height_cm - 10.0).abs() < 1e-9);
    assert!((m.area_cm2 - 200.0).abs() < 1e-9);
    assert!(m.perimeter_cm.is_none());
    assert!(m.radius_cm.is_none());
    assert!(m.aspect_ratio.is_none());
}

#[test]
fn doubling_scale_halves_lengths_and_quarters_area() {
    let geometry = BoundingGeometry::AxisAligned {
        x: 0,
        y: 0,
        width: 120.0,
        height: 90.0,
    };
    let base = measure(&geometry, ScaleFactor::fixed(10.0).unwrap());
    let doubled = measure(&geometry, ScaleFactor::fixed(20.0).unwrap());
    assert!((doubled.width_cm - base.width_cm / 2.0).abs() < 1e-9);
    assert!((doubled.height_cm - base.height_cm / 2.0).abs() < 1e-9);
    assert!((doubled.area_cm2 - base.area_cm2 / 4.0).abs() < 1e-9);
}

#[test]
fn extended_metrics_are_independently_requestable() {
    let contour = common::rect_contour(0, 0, 100, 50);
    let scale = ScaleFactor::fixed(10.0).unwrap();
    let geometry = BoundingGeometry::AxisAligned {
        x: 0,
        y: 0,
        width: 100.0,
        height: 50.0,
    };

    let only_perimeter = measure_extended(
        &geometry,
        &contour,
        scale,
        MetricOptions {
            perimeter: true,
            ..Default::default()
        },
    );
    assert!((only_perimeter.perimeter_cm.unwrap() - 30.0).abs() < 1e-9);
    assert!(only_perimeter.radius_cm.is_none());
    assert!(only_perimeter.aspect_ratio.is_none());

    let all = measure_extended(&geometry, &contour, scale, MetricOptions::all());
    // Enclosing circle of a 100x50 rectangle has radius sqrt(50²+25²).
    let expected_radius = (50.0f64 * 50.0 + 25.0 * 25.0).sqrt() / 10.0;
    assert!((all.radius_cm.unwrap() - expected_radius).abs() < 1e-6);
    assert!((all.aspect_ratio.unwrap() - 2.0).abs() < 1e-9);
}

#[test]
fn zero_height_gives_zero_aspect_ratio() {
    let contour = common::rect_contour(0, 0, 10, 0);
    let geometry = BoundingGeometry::AxisAligned {
        x: 0,
        y: 0,
        width: 10.0,
        height: 0.0,
    };
    let m = measure_extended(
        &geometry,
        &contour,
        ScaleFactor::fixed(1.0).unwrap(),
        MetricOptions {
            aspect_ratio: true,
            ..Default::default()
        },
    );
    assert_eq!(m.aspect_ratio, Some(0.0));
}

#[test]
fn wizard_requires_calibration_before_measuring() {
    let wizard = ObjectWizard::new(vec![common::rect_contour(0, 0, 100, 50)]);
    assert_eq!(wizard.state(), WizardState::AwaitingReference);
    assert!(matches!(
        wizard.measure_object(0, MetricOptions::default()),
        Err(MeasureError::NotCalibrated)
    ));
}

#[test]
fn wizard_two_step_flow() {
    // Reference: 85.6 px wide object known to be 8.56 cm.
    let mut wizard = ObjectWizard::new(vec![
        common::rect_contour(0, 0, 856, 540),
        common::rect_contour(0, 0, 200, 100),
    ]);

    let scale = wizard.select_reference(0, 85.6).unwrap();
    assert!((scale.pixels_per_cm() - 10.0).abs() < 1e-9);

    let m = wizard.measure_object(1, MetricOptions::default()).unwrap();
    assert!((m.width_cm - 20.0).abs() < 1e-9);
    assert!((m.height_cm - 10.0).abs() < 1e-9);
    assert!((m.area_cm2 - 200.0).abs() < 1e-9);

    wizard.clear();
    assert_eq!(wizard.state(), WizardState::AwaitingReference);
}

#[test]
fn wizard_rejects_bad_selection_and_bad_width() {
    let mut wizard = ObjectWizard::new(vec![common::rect_contour(0, 0, 100, 50)]);

    assert!(matches!(
        wizard.select_reference(3, 8.56),
        Err(MeasureError::BadIndex {
            index: 3,
            available: 1
        })
    ));

    // Failed calibration is not committed.
    assert!(matches!(
        wizard.select_reference(0, 0.0),
        Err(MeasureError::InvalidCalibration(_))
    ));
    assert_eq!(wizard.state(), WizardState::AwaitingReference);
}

#[test]
fn wizard_caps_selectable_objects() {
    let contours = (0..15).map(|_| common::rect_contour(0, 0, 10, 10)).collect();
    let wizard = ObjectWizard::new(contours);
    assert_eq!(wizard.objects().len(), 10);
}

#[test]
fn line_session_first_segment_calibrates_rest_measure() {
    let mut session = LineSession::new(10.0).unwrap();
    assert!(session.scale().is_none());

    // 200 px reference over 10 cm gives 20 px/cm.
    let outcome = session
        .add_segment(LineSegment::new((0.0, 0.0), (200.0, 0.0)))
        .unwrap();
    match outcome {
        SegmentOutcome::Calibrated(scale) => {
            assert!((scale.pixels_per_cm() - 20.0).abs() < 1e-9)
        }
        other => panic!("expected calibration, got {other:?}"),
    }

    // 50 px segment is 2.5 cm.
    let outcome = session
        .add_segment(LineSegment::new((10.0, 10.0), (10.0, 60.0)))
        .unwrap();
    assert!(matches!(outcome, SegmentOutcome::Measured(len) if (len - 2.5).abs() < 1e-9));
    assert_eq!(session.measurements().len(), 1);
}

#[test]
fn line_session_zero_length_reference_is_rejected() {
    let mut session = LineSession::new(10.0).unwrap();
    let result = session.add_segment(LineSegment::new((5.0, 5.0), (5.0, 5.0)));
    assert!(matches!(result, Err(MeasureError::InvalidCalibration(_))));
    // Calibration was not committed.
    assert!(session.scale().is_none());
}

#[test]
fn line_session_clear_resets_atomically() {
    let mut session = LineSession::new(10.0).unwrap();
    session
        .add_segment(LineSegment::new((0.0, 0.0), (100.0, 0.0)))
        .unwrap();
    session
        .add_segment(LineSegment::new((0.0, 0.0), (30.0, 40.0)))
        .unwrap();
    assert_eq!(session.measurements().len(), 1);

    session.clear();
    assert!(session.scale().is_none());
    assert!(session.measurements().is_empty());

    // The next segment after a clear calibrates again.
    let outcome = session
        .add_segment(LineSegment::new((0.0, 0.0), (50.0, 0.0)))
        .unwrap();
    assert!(matches!(outcome, SegmentOutcome::Calibrated(_)));
}

#[test]
fn line_session_rejects_bad_reference_length() {
    assert!(matches!(
        LineSession::new(0.0),
        Err(MeasureError::InvalidCalibration(_))
    ));
    assert!(matches!(
        LineSession::new(f64::NAN),
        Err(MeasureError::InvalidCalibration(_))
    ));
}
