//! PDF backend.
//!
//! # Responsibility
//! - Render each record as one flattened text line on A4 pages.
//!
//! # Invariants
//! - Lines are laid out top to bottom; a new page starts once one is full.
//! - Page count is `ceil(records / lines_per_page())`.

use super::{ExportError, ExportResult};
use crate::model::record::{PerformanceRecord, DATE_FORMAT};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const LAYER_NAME: &str = "records";

/// Flattened single-line text for one record.
pub fn record_line(record: &PerformanceRecord) -> String {
    format!(
        "{} | {} | {} | {} | {} | {}",
        record.id,
        record.name,
        record.date.format(DATE_FORMAT),
        record.metric,
        record.score,
        record.period
    )
}

pub(super) fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM) as usize
}

pub(super) fn write_pdf(records: &[PerformanceRecord], path: &Path) -> ExportResult<()> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Employee Performance",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    for (page_index, chunk) in records.chunks(lines_per_page()).enumerate() {
        if page_index > 0 {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            layer = doc.get_page(page).get_layer(page_layer);
        }

        for (line_index, record) in chunk.iter().enumerate() {
            let baseline = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * (line_index as f32 + 1.0);
            layer.use_text(
                record_line(record),
                FONT_SIZE_PT,
                Mm(MARGIN_MM),
                Mm(baseline),
                &font,
            );
        }
    }

    // Layer handles point into the document; release before it is consumed.
    drop(layer);
    let mut writer = BufWriter::new(File::create(path)?);
    doc.save(&mut writer)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    Ok(())
}
