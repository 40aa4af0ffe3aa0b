//! XLSX backend.
//!
//! # Responsibility
//! - Write one `Performance` worksheet with typed cells.
//!
//! # Invariants
//! - Row 0 holds the column headers; record `n` lands on row `n + 1`.
//! - Ids and scores are numeric cells, the rest are strings.

use super::{ExportResult, EXPORT_HEADERS};
use crate::model::record::{PerformanceRecord, DATE_FORMAT};
use rust_xlsxwriter::Workbook;
use std::path::Path;

const SHEET_NAME: &str = "Performance";

pub(super) fn write_xlsx(records: &[PerformanceRecord], path: &Path) -> ExportResult<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in (0u16..).zip(EXPORT_HEADERS) {
        sheet.write_string(0, col, header)?;
    }

    for (row, record) in (1u32..).zip(records) {
        // Cells are f64; ids and scores beyond 2^53 lose precision.
        sheet.write_number(row, 0, record.id as f64)?;
        sheet.write_string(row, 1, record.name.as_str())?;
        sheet.write_string(row, 2, record.date.format(DATE_FORMAT).to_string())?;
        sheet.write_string(row, 3, record.metric.as_str())?;
        sheet.write_number(row, 4, record.score as f64)?;
        sheet.write_string(row, 5, record.period.as_str())?;
    }

    workbook.save(path)?;
    Ok(())
}
