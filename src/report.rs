use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Measurement, MeasureError};

const HEADER_COLUMNS: [&str; 4] = ["object", "width_cm", "height_cm", "area_cm2"];

/// One measured object in the report, values rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub index: usize,
    pub width_cm: f64,
    pub height_cm: f64,
    pub area_cm2: f64,
}

/// Tabular measurement report, exportable as delimited text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    rows: Vec<ReportRow>,
}

/// Round to the 2-decimal display precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_measurements(measurements: &[Measurement]) -> Self {
        let mut report = Self::new();
        for m in measurements {
            report.push(m);
        }
        report
    }

    /// Append a measurement; objects are numbered from 1 in insertion
    /// order.
    pub fn push(&mut self, measurement: &Measurement) {
        self.rows.push(ReportRow {
            index: self.rows.len() + 1,
            width_cm: round2(measurement.width_cm),
            height_cm: round2(measurement.height_cm),
            area_cm2: round2(measurement.area_cm2),
        });
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize as delimited text with a header line.
    pub fn to_delimited(&self, delimiter: char) -> String {
        let mut out = HEADER_COLUMNS.join(&delimiter.to_string());
        out.push('\n');
        for row in &self.rows {
            let _ = writeln!(
                out,
                "{}{d}{:.2}{d}{:.2}{d}{:.2}",
                row.index,
                row.width_cm,
                row.height_cm,
                row.area_cm2,
                d = delimiter
            );
        }
        out
    }

    /// Parse text produced by [`Report::to_delimited`].
    pub fn parse_delimited(text: &str, delimiter: char) -> Result<Self, MeasureError> {
        let mut lines = text.lines().enumerate();

        let (_, header) = lines.next().ok_or(MeasureError::MalformedReport {
            line: 1,
            reason: "empty report".into(),
        })?;
        let header_fields: Vec<&str> = header.split(delimiter).collect();
        if header_fields != HEADER_COLUMNS {
            return Err(MeasureError::MalformedReport {
                line: 1,
                reason: format!("unexpected header {header:?}"),
            });
        }

        let mut report = Self::new();
        for (i, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(delimiter).collect();
            if fields.len() != 4 {
                return Err(MeasureError::MalformedReport {
                    line: i + 1,
                    reason: format!("expected 4 columns, got {}", fields.len()),
                });
            }
            let parse_f64 = |field: &str| {
                let value =
                    field
                        .trim()
                        .parse::<f64>()
                        .map_err(|e| MeasureError::MalformedReport {
                            line: i + 1,
                            reason: format!("{field:?}: {e}"),
                        })?;
                // Exports only ever contain finite values.
                if !value.is_finite() {
                    return Err(MeasureError::MalformedReport {
                        line: i + 1,
                        reason: format!("non-finite value {field:?}"),
                    });
                }
                Ok(value)
            };
            let index = fields[0].trim().parse::<usize>().map_err(|e| {
                MeasureError::MalformedReport {
                    line: i + 1,
                    reason: format!("{:?}: {e}", fields[0]),
                }
            })?;
            report.rows.push(ReportRow {
                index,
                width_cm: parse_f64(fields[1])?,
                height_cm: parse_f64(fields[2])?,
                area_cm2: parse_f64(fields[3])?,
            });
        }
        Ok(report)
    }

    /// Write the comma-delimited export to disk.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_delimited(','))
    }

    /// Plain-text results listing for terminal display.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = writeln!(
                out,
                "  Object {}: {:.2} x {:.2} cm, area {:.2} cm²",
                row.index, row.width_cm, row.height_cm, row.area_cm2
            );
        }
        out
    }
}
