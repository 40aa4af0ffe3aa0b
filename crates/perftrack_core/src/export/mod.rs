//! Record export to delimited text, spreadsheet and paginated document files.
//!
//! # Responsibility
//! - Serialize a record set to CSV, XLSX or PDF at a caller-chosen path.
//! - Reject empty record sets before touching the filesystem.
//!
//! # Invariants
//! - CSV and XLSX carry one header row plus one row per record.
//! - PDF carries one text line per record.
//! - A path without an extension gets the format's default extension.

mod csv_writer;
mod pdf_writer;
mod xlsx_writer;

pub use pdf_writer::record_line;

use crate::model::record::PerformanceRecord;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Column headers shared by tabular formats.
pub const EXPORT_HEADERS: [&str; 6] = ["id", "name", "date", "metric", "score", "period"];

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    /// Nothing to export; no file was written.
    NoRecords,
    Io(std::io::Error),
    Csv(::csv::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
    Pdf(String),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoRecords => write!(f, "No performance data to export."),
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
            Self::Xlsx(err) => write!(f, "xlsx export failed: {err}"),
            Self::Pdf(message) => write!(f, "pdf export failed: {message}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Xlsx(err) => Some(err),
            Self::NoRecords | Self::Pdf(_) => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<::csv::Error> for ExportError {
    fn from(value: ::csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Xlsx(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Pdf];

    /// Default file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Button label shown by the desktop app.
    pub fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Xlsx => "Excel",
            Self::Pdf => "PDF",
        }
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    /// Data rows written, header excluded.
    pub rows: usize,
}

/// Appends the format's extension when `path` has none.
pub fn resolve_export_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

/// Writes `records` to `path` in `format`.
///
/// # Errors
/// - `NoRecords` for an empty slice; the filesystem is left untouched.
/// - Writer or I/O failures from the underlying format backend.
///
/// # Side effects
/// - Emits `export` logging events with duration, format and row count.
pub fn export_records(
    records: &[PerformanceRecord],
    format: ExportFormat,
    path: &Path,
) -> ExportResult<ExportSummary> {
    if records.is_empty() {
        info!(
            "event=export module=export status=rejected format={} reason=no_records",
            format.extension()
        );
        return Err(ExportError::NoRecords);
    }

    let target = resolve_export_path(path, format);
    let started_at = Instant::now();
    info!(
        "event=export module=export status=start format={} rows={}",
        format.extension(),
        records.len()
    );

    let written = match format {
        ExportFormat::Csv => csv_writer::write_csv(records, &target),
        ExportFormat::Xlsx => xlsx_writer::write_xlsx(records, &target),
        ExportFormat::Pdf => pdf_writer::write_pdf(records, &target),
    };

    match written {
        Ok(()) => {
            info!(
                "event=export module=export status=ok format={} rows={} duration_ms={}",
                format.extension(),
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(ExportSummary {
                path: target,
                format,
                rows: records.len(),
            })
        }
        Err(err) => {
            error!(
                "event=export module=export status=error format={} duration_ms={} error={}",
                format.extension(),
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_export_path, ExportFormat};
    use std::path::{Path, PathBuf};

    #[test]
    fn missing_extension_is_filled_in() {
        assert_eq!(
            resolve_export_path(Path::new("/tmp/report"), ExportFormat::Xlsx),
            PathBuf::from("/tmp/report.xlsx")
        );
        assert_eq!(
            resolve_export_path(Path::new("/tmp/report.txt"), ExportFormat::Csv),
            PathBuf::from("/tmp/report.txt")
        );
    }
}
