use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use perftrack_core::export::record_line;
use perftrack_core::{export_records, ExportError, ExportFormat, Period, PerformanceRecord};
use std::fs;
use std::path::Path;

fn records(count: i64) -> Vec<PerformanceRecord> {
    (1..=count)
        .map(|id| PerformanceRecord {
            id,
            name: if id % 2 == 0 { "Bob" } else { "Alice, Jr." }.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(id as u64),
            metric: "Sales".to_string(),
            score: id * 3,
            period: Period::Weekly,
        })
        .collect()
}

#[test]
fn csv_has_header_plus_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let summary = export_records(&records(4), ExportFormat::Csv, &dir.path().join("out")).unwrap();

    assert_eq!(summary.path, dir.path().join("out.csv"));
    assert_eq!(summary.rows, 4);

    let mut reader = csv::Reader::from_path(&summary.path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["id", "name", "date", "metric", "score", "period"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 4);
    assert_eq!(&rows[0][1], "Alice, Jr.");
    assert_eq!(&rows[0][2], "2024-01-02");
    assert_eq!(&rows[0][5], "Weekly");
}

#[test]
fn xlsx_has_header_plus_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let summary =
        export_records(&records(3), ExportFormat::Xlsx, &dir.path().join("report.xlsx")).unwrap();

    assert_eq!(summary.rows, 3);
    assert_zip_file(&summary.path);

    let mut workbook: Xlsx<_> = open_workbook(&summary.path).unwrap();
    let sheet = workbook.worksheet_range("Performance").unwrap();
    assert_eq!(sheet.height(), 4);
    assert_eq!(sheet.width(), 6);

    let header: Vec<String> = sheet
        .rows()
        .next()
        .unwrap()
        .iter()
        .map(|cell| cell.to_string())
        .collect();
    assert_eq!(header, vec!["id", "name", "date", "metric", "score", "period"]);
    assert_eq!(sheet.get_value((1, 0)), Some(&Data::Float(1.0)));
    assert_eq!(sheet.get_value((1, 1)), Some(&Data::String("Alice, Jr.".to_string())));
    assert_eq!(sheet.get_value((3, 4)), Some(&Data::Float(9.0)));
}

#[test]
fn pdf_export_spans_pages_when_needed() {
    let dir = tempfile::tempdir().unwrap();
    let data = records(60);
    let summary = export_records(&data, ExportFormat::Pdf, &dir.path().join("report")).unwrap();

    assert_eq!(summary.path, dir.path().join("report.pdf"));
    assert_eq!(summary.rows, 60);
    let bytes = fs::read(&summary.path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // 27 lines per page: 27 + 27 + 6.
    let document = lopdf::Document::load(&summary.path).unwrap();
    assert_eq!(document.get_pages().len(), 3);
    assert_eq!(record_line(&data[0]), "1 | Alice, Jr. | 2024-01-02 | Sales | 3 | Weekly");
}

#[test]
fn empty_record_set_is_rejected_for_every_format() {
    let dir = tempfile::tempdir().unwrap();
    for format in ExportFormat::ALL {
        let target = dir.path().join(format!("empty.{}", format.extension()));
        let err = export_records(&[], format, &target).unwrap_err();
        assert!(matches!(err, ExportError::NoRecords));
        assert!(!target.exists());
    }
}

#[test]
fn unwritable_path_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing-dir").join("out.csv");

    let err = export_records(&records(1), ExportFormat::Csv, &target).unwrap_err();
    assert!(matches!(err, ExportError::Csv(_) | ExportError::Io(_)));
}

fn assert_zip_file(path: &Path) {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.starts_with(b"PK"), "xlsx should be a zip container");
}
