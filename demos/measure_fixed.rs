use photoruler::geometry::{self, GeometryMode};
use photoruler::{measure, ContourDetector, Report, ScaleFactor};

fn main() -> anyhow::Result<()> {
    let path = std::env::args().nth(1).unwrap_or("test_image.png".into());
    let img = photoruler::load_image(std::path::Path::new(&path))?;

    let scale = ScaleFactor::fixed(10.0)?;
    let contours = ContourDetector::new().with_verbose(true).detect(&img);

    let mut report = Report::new();
    for contour in &contours {
        if let Some(g) = geometry::extract_geometry(contour, GeometryMode::Rotated, 100.0) {
            report.push(&measure(&g, scale));
        }
    }

    if report.is_empty() {
        eprintln!("Warning: no measurable objects detected.");
    } else {
        print!("{}", report.display());
    }
    Ok(())
}
