use photoruler::{Measurement, MeasureError, Report};

fn measurement(width_cm: f64, height_cm: f64) -> Measurement {
    Measurement {
        width_cm,
        height_cm,
        area_cm2: width_cm * height_cm,
        perimeter_cm: None,
        radius_cm: None,
        aspect_ratio: None,
    }
}

#[test]
fn export_parse_round_trip() {
    let report = Report::from_measurements(&[
        measurement(20.0, 10.0),
        measurement(3.456789, 1.23456),
        measurement(0.004, 12.0),
    ]);

    let text = report.to_delimited(',');
    let parsed = Report::parse_delimited(&text, ',').unwrap();

    // Rows are stored at display precision, so the round trip is exact.
    assert_eq!(parsed, report);
}

#[test]
fn export_values_are_rounded_to_two_decimals() {
    let report = Report::from_measurements(&[measurement(3.456789, 1.23456)]);
    let row = &report.rows()[0];
    assert_eq!(row.width_cm, 3.46);
    assert_eq!(row.height_cm, 1.23);
    assert_eq!(row.area_cm2, 4.27);
}

#[test]
fn header_matches_export_columns() {
    let report = Report::from_measurements(&[measurement(1.0, 1.0)]);
    let text = report.to_delimited(',');
    assert!(text.starts_with("object,width_cm,height_cm,area_cm2\n"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn alternate_delimiter_round_trips() {
    let report = Report::from_measurements(&[measurement(5.5, 2.25)]);
    let text = report.to_delimited('\t');
    let parsed = Report::parse_delimited(&text, '\t').unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn parse_rejects_bad_header() {
    let err = Report::parse_delimited("index,w,h,a\n1,2.00,1.00,2.00\n", ',');
    assert!(matches!(
        err,
        Err(MeasureError::MalformedReport { line: 1, .. })
    ));
}

#[test]
fn parse_rejects_wrong_column_count() {
    let text = "object,width_cm,height_cm,area_cm2\n1,2.00,1.00\n";
    assert!(matches!(
        Report::parse_delimited(text, ','),
        Err(MeasureError::MalformedReport { line: 2, .. })
    ));
}

#[test]
fn parse_rejects_non_numeric_values() {
    let text = "object,width_cm,height_cm,area_cm2\n1,abc,1.00,2.00\n";
    assert!(matches!(
        Report::parse_delimited(text, ','),
        Err(MeasureError::MalformedReport { line: 2, .. })
    ));
}

#[test]
fn parse_rejects_non_finite_values() {
    for bad in ["NaN", "inf", "-inf"] {
        let text = format!("object,width_cm,height_cm,area_cm2\n1,{bad},1.00,2.00\n");
        assert!(matches!(
            Report::parse_delimited(&text, ','),
            Err(MeasureError::MalformedReport { line: 2, .. })
        ));
    }
}

#[test]
fn save_writes_parseable_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("report.csv");

    let report = Report::from_measurements(&[measurement(20.0, 10.0), measurement(7.77, 3.33)]);
    report.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let parsed = Report::parse_delimited(&text, ',').unwrap();
    assert_eq!(parsed, report);
}
