use clap::{Parser, Subcommand};
use std::path::PathBuf;

use photoruler::annotate;
use photoruler::calibration::MetricOptions;
use photoruler::geometry::{self, GeometryMode};
use photoruler::{ContourDetector, LineSegment, LineSession, ObjectWizard, Report, ScaleFactor};

#[derive(Parser)]
#[command(name = "photoruler")]
#[command(about = "Measure real-world object dimensions in photographs")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Measure every detected object with a constant pixels-per-cm ratio
    Fixed {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Constant scale in pixels per centimeter
        #[arg(long, default_value_t = 10.0)]
        pixels_per_cm: f64,

        /// Minimum enclosed contour area in square pixels
        #[arg(long, default_value_t = 100.0)]
        min_area: f64,

        /// Bounding geometry to fit around each contour
        #[arg(long, value_enum, default_value = "rotated")]
        mode: GeometryMode,

        /// Save an annotated copy of the image
        #[arg(long, value_name = "PATH")]
        annotated: Option<PathBuf>,

        /// Export the report as comma-delimited text
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Calibrate from a reference object of known width, then measure another
    Objects {
        /// Path to input image file
        #[arg(value_name = "IMAGE")]
        image_path: PathBuf,

        /// Object number of the reference (1-based, largest object first)
        #[arg(long, value_name = "N")]
        reference: usize,

        /// Real width of the reference object in cm (credit card: 8.56)
        #[arg(long, default_value_t = 8.56)]
        reference_width: f64,

        /// Object number to measure (1-based)
        #[arg(long, value_name = "N")]
        object: usize,

        /// Also report perimeter, enclosing-circle radius and aspect ratio
        #[arg(long)]
        advanced: bool,

        /// Save an annotated copy of the image
        #[arg(long, value_name = "PATH")]
        annotated: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Calibrate from a reference segment, then measure further segments
    Line {
        /// Reference segment as x1,y1,x2,y2
        #[arg(long, value_parser = parse_segment)]
        reference: LineSegment,

        /// Real length of the reference segment in cm
        #[arg(long, default_value_t = 10.0)]
        reference_length: f64,

        /// Measurement segment as x1,y1,x2,y2 (repeatable)
        #[arg(long = "segment", value_parser = parse_segment)]
        segments: Vec<LineSegment>,

        /// Image to draw the segments onto
        #[arg(long, value_name = "IMAGE")]
        image: Option<PathBuf>,

        /// Save an annotated copy of the image
        #[arg(long, value_name = "PATH", requires = "image")]
        annotated: Option<PathBuf>,
    },
}

fn parse_segment(s: &str) -> Result<LineSegment, String> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("invalid coordinate in {s:?}: {e}"))?;
    if parts.len() != 4 {
        return Err(format!("expected x1,y1,x2,y2, got {s:?}"));
    }
    Ok(LineSegment::new((parts[0], parts[1]), (parts[2], parts[3])))
}

fn load_image(path: &PathBuf, verbose: bool) -> anyhow::Result<image::DynamicImage> {
    if verbose {
        println!("Loading image: {:?}", path);
    }
    let img = photoruler::detection::load_image(path)?;
    if verbose {
        println!("Image loaded: {}x{}\n", img.width(), img.height());
    }
    Ok(img)
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Fixed {
            image_path,
            pixels_per_cm,
            min_area,
            mode,
            annotated,
            export,
            verbose,
        } => run_fixed(
            image_path,
            pixels_per_cm,
            min_area,
            mode,
            annotated,
            export,
            verbose,
        ),
        Command::Objects {
            image_path,
            reference,
            reference_width,
            object,
            advanced,
            annotated,
            verbose,
        } => run_objects(
            image_path,
            reference,
            reference_width,
            object,
            advanced,
            annotated,
            verbose,
        ),
        Command::Line {
            reference,
            reference_length,
            segments,
            image,
            annotated,
        } => run_line(reference, reference_length, segments, image, annotated),
    }
}

fn run_fixed(
    image_path: PathBuf,
    pixels_per_cm: f64,
    min_area: f64,
    mode: GeometryMode,
    annotated: Option<PathBuf>,
    export: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let img = load_image(&image_path, verbose)?;
    let scale = ScaleFactor::fixed(pixels_per_cm)?;

    let detector = ContourDetector::new()
        .with_min_area(min_area)
        .with_verbose(verbose);
    let contours = detector.detect(&img);

    let mut items = Vec::new();
    let mut report = Report::new();
    for contour in &contours {
        if let Some(geometry) = geometry::extract_geometry(contour, mode, min_area) {
            let m = photoruler::measure(&geometry, scale);
            let label = format!("{}: {:.1} x {:.1} cm", items.len() + 1, m.width_cm, m.height_cm);
            report.push(&m);
            items.push((geometry, label));
        }
    }

    if report.is_empty() {
        eprintln!("Warning: no measurable objects detected in the image.");
        return Ok(());
    }

    println!("\n=== Measurement Report ({} objects) ===", report.rows().len());
    print!("{}", report.display());

    if let Some(path) = export {
        report.save(&path)?;
        println!("\nReport exported to {:?}", path);
    }
    if let Some(path) = annotated {
        annotate::annotate_geometries(&img, &items, annotate::GREEN).save(&path)?;
        println!("Annotated image saved to {:?}", path);
    }

    Ok(())
}

fn run_objects(
    image_path: PathBuf,
    reference: usize,
    reference_width: f64,
    object: usize,
    advanced: bool,
    annotated: Option<PathBuf>,
    verbose: bool,
) -> anyhow::Result<()> {
    let img = load_image(&image_path, verbose)?;

    let detector = ContourDetector::new().with_verbose(verbose);
    let contours = detector.detect(&img);
    if contours.is_empty() {
        eprintln!("Warning: no measurable objects detected in the image.");
        return Ok(());
    }

    let mut wizard = ObjectWizard::new(contours);
    println!("Detected {} selectable objects", wizard.objects().len());

    // CLI selections are 1-based, matching the displayed object numbers.
    if reference == 0 || object == 0 {
        anyhow::bail!("object numbers are 1-based");
    }
    let scale = wizard.select_reference(reference - 1, reference_width)?;
    println!(
        "Calibrated from object {}: {:.2} pixels per cm",
        reference,
        scale.pixels_per_cm()
    );

    let options = if advanced {
        MetricOptions::all()
    } else {
        MetricOptions::default()
    };
    let measurement = wizard.measure_object(object - 1, options)?;

    println!("\n=== Measurement Results (object {}) ===", object);
    println!("  Width:  {:.2} cm", measurement.width_cm);
    println!("  Height: {:.2} cm", measurement.height_cm);
    println!("  Area:   {:.2} cm²", measurement.area_cm2);
    if let Some(p) = measurement.perimeter_cm {
        println!("  Perimeter: {:.2} cm", p);
    }
    if let Some(r) = measurement.radius_cm {
        println!("  Equivalent circle radius: {:.2} cm", r);
    }
    if let Some(a) = measurement.aspect_ratio {
        println!("  Aspect ratio (width/height): {:.2}", a);
    }

    if let Some(path) = annotated {
        let mut canvas = img.to_rgb8();
        let labels = [
            "Reference Object".to_string(),
            format!(
                "{:.1} x {:.1} cm",
                measurement.width_cm, measurement.height_cm
            ),
        ];
        for (i, index) in [reference - 1, object - 1].into_iter().enumerate() {
            let contour = &wizard.objects()[index];
            if let Some(g) = geometry::extract_geometry(contour, GeometryMode::AxisAligned, 0.0) {
                let color = if i == 0 { annotate::GREEN } else { annotate::RED };
                annotate::draw_labeled_geometry(&mut canvas, &g, &labels[i], color);
            }
        }
        canvas.save(&path)?;
        println!("\nAnnotated image saved to {:?}", path);
    }

    Ok(())
}

fn run_line(
    reference: LineSegment,
    reference_length: f64,
    segments: Vec<LineSegment>,
    image: Option<PathBuf>,
    annotated: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut session = LineSession::new(reference_length)?;

    // First segment calibrates, the rest are measurements.
    if let photoruler::SegmentOutcome::Calibrated(scale) = session.add_segment(reference)? {
        println!(
            "Calibrated from reference segment: {:.2} pixels per cm",
            scale.pixels_per_cm()
        );
    }

    for segment in segments {
        session.add_segment(segment)?;
    }

    if !session.measurements().is_empty() {
        println!("\n=== Segment Measurements ===");
        for (i, (segment, length_cm)) in session.measurements().iter().enumerate() {
            println!(
                "  Segment {}: ({:.0},{:.0}) -> ({:.0},{:.0}) = {:.2} cm",
                i + 1,
                segment.start.0,
                segment.start.1,
                segment.end.0,
                segment.end.1,
                length_cm
            );
        }
    }

    if let (Some(image_path), Some(out)) = (image, annotated) {
        let img = load_image(&image_path, false)?;
        let mut all = vec![(reference, format!("Reference: {:.1} cm", reference_length))];
        all.extend(
            session
                .measurements()
                .iter()
                .map(|(s, len)| (*s, format!("{:.2} cm", len))),
        );
        annotate::annotate_segments(&img, &all, annotate::RED).save(&out)?;
        println!("\nAnnotated image saved to {:?}", out);
    }

    Ok(())
}
