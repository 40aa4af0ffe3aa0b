//! CSV backend.
//!
//! # Invariants
//! - Header row comes first, then one row per record in input order.
//! - Dates are written as `YYYY-MM-DD`.

use super::ExportResult;
use crate::model::record::PerformanceRecord;
use std::path::Path;

pub(super) fn write_csv(records: &[PerformanceRecord], path: &Path) -> ExportResult<()> {
    // Header row comes from the record's serde field names.
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
