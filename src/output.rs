//! Report export.
//!
//! CSV has one row per cycle. Columns are `cycle_number`, every field of
//! the measured result (`<field>_measured`), every field of the model result
//! (`<field>_model`), the absolute and relative error of every field
//! (`error_<field>`, `error_rel_<field>`), then `is_full`. Vector fields
//! expand to `<name>_x`, `<name>_y` and `<name>_value`. Undefined values are
//! written as `NaN`.
//!
//! JSON holds the whole report; undefined values become `null`.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::analysis::{AnalysisReport, CycleError, CycleResult, ScalarError};
use crate::config::OutputFormat;
use crate::error::{SlopeError, SlopeResult};

const SCALAR_FIELDS: [&str; 3] = ["duration1", "duration2", "duration"];
const VECTOR_FIELDS: [&str; 3] = ["start_velocity", "end_velocity", "reach"];
const COMPONENTS: [&str; 3] = ["x", "y", "value"];
const FIELD_COUNT: usize = SCALAR_FIELDS.len() + VECTOR_FIELDS.len() * COMPONENTS.len();

/// Flattened field names, in column order.
#[must_use]
pub fn field_names() -> Vec<String> {
    let mut names: Vec<String> = SCALAR_FIELDS.iter().map(ToString::to_string).collect();
    for vector in VECTOR_FIELDS {
        for component in COMPONENTS {
            names.push(format!("{vector}_{component}"));
        }
    }
    names
}

/// CSV header line, without the line break.
#[must_use]
pub fn csv_header() -> String {
    let names = field_names();
    let mut header = String::from("cycle_number");
    for name in &names {
        let _ = write!(header, ",{name}_measured");
    }
    for name in &names {
        let _ = write!(header, ",{name}_model");
    }
    for name in &names {
        let _ = write!(header, ",error_{name},error_rel_{name}");
    }
    header.push_str(",is_full");
    header
}

fn result_values(result: &CycleResult) -> [f64; FIELD_COUNT] {
    let s = result.start_velocity;
    let e = result.end_velocity;
    let r = result.reach;
    [
        result.duration1.value(),
        result.duration2.value(),
        result.duration.value(),
        s.x().value(),
        s.y().value(),
        s.magnitude().value(),
        e.x().value(),
        e.y().value(),
        e.magnitude().value(),
        r.x().value(),
        r.y().value(),
        r.magnitude().value(),
    ]
}

fn error_values(error: &CycleError) -> [ScalarError; FIELD_COUNT] {
    let s = error.start_velocity;
    let e = error.end_velocity;
    let r = error.reach;
    [
        error.duration1,
        error.duration2,
        error.duration,
        s.x,
        s.y,
        s.magnitude,
        e.x,
        e.y,
        e.magnitude,
        r.x,
        r.y,
        r.magnitude,
    ]
}

/// One CSV row, without the line break.
#[must_use]
pub fn csv_row(measured: &CycleResult, model: &CycleResult, error: &CycleError) -> String {
    let mut line = model.number.to_string();
    for value in result_values(measured) {
        let _ = write!(line, ",{value}");
    }
    for value in result_values(model) {
        let _ = write!(line, ",{value}");
    }
    for scalar in error_values(error) {
        let _ = write!(line, ",{},{}", scalar.abs.value(), scalar.rel.value());
    }
    line.push_str(if model.is_full { ",True" } else { ",False" });
    line
}

/// Write the report as CSV.
///
/// # Errors
///
/// Returns error if writing fails.
pub fn write_csv<W: Write>(report: &AnalysisReport, writer: &mut W) -> SlopeResult<()> {
    writeln!(writer, "{}", csv_header())
        .map_err(|e| SlopeError::io(format!("Write header failed: {e}")))?;

    for (i, (measured, model, error)) in report.rows().enumerate() {
        let row = csv_row(measured, model, error);
        writeln!(writer, "{row}").map_err(|e| SlopeError::io(format!("Write row failed: {e}")))?;
        debug!(n = i, "wrote row");
    }
    Ok(())
}

/// Write the report as pretty JSON.
///
/// # Errors
///
/// Returns error if serialization or writing fails.
pub fn write_json<W: Write>(report: &AnalysisReport, writer: &mut W) -> SlopeResult<()> {
    serde_json::to_writer_pretty(&mut *writer, report)
        .map_err(|e| SlopeError::serialization(format!("JSON serialization failed: {e}")))?;
    writeln!(writer).map_err(|e| SlopeError::io(format!("Write failed: {e}")))?;
    Ok(())
}

/// Writes reports to files.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportExporter {
    format: OutputFormat,
}

impl ReportExporter {
    /// Exporter for a format.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Configured format.
    #[must_use]
    pub const fn format(&self) -> OutputFormat {
        self.format
    }

    /// Export the report to `path` in the configured format, creating
    /// parent directories.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn export(&self, report: &AnalysisReport, path: &Path) -> SlopeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file =
            File::create(path).map_err(|e| SlopeError::io(format!("Failed to create file: {e}")))?;
        let mut writer = BufWriter::new(file);

        match self.format {
            OutputFormat::Csv => write_csv(report, &mut writer)?,
            OutputFormat::Json => write_json(report, &mut writer)?,
        }

        writer
            .flush()
            .map_err(|e| SlopeError::io(format!("Flush failed: {e}")))?;

        info!(
            rows = report.len(),
            format = ?self.format,
            path = %path.display(),
            "report saved"
        );
        Ok(())
    }
}
