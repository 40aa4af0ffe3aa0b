//! Use-case API for the desktop front end.
//!
//! # Responsibility
//! - Expose one function per user action (add, update, delete, search,
//!   visualize, export).
//! - Turn core results and errors into notification envelopes the window can
//!   show as-is.
//!
//! # Invariants
//! - Functions never panic; every failure becomes a `Notice`.
//! - All calls borrow the app's long-lived connection for their duration only.

use perftrack_core::{
    with_record_service, ChartSpec, ChartStyle, ExportFormat, Period, PerformanceRecord,
    RecordId, RecordInput, ServiceError,
};
use rusqlite::Connection;
use std::path::Path;

/// Modal notification shown after every action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Whether the action succeeded.
    pub ok: bool,
    /// Window title, e.g. `Data Added` or `No Data`.
    pub title: String,
    /// Human-readable message.
    pub message: String,
}

impl Notice {
    fn success(title: &str, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn failure(err: &ServiceError) -> Self {
        let title = match err {
            ServiceError::Validation(_) => "Invalid Input",
            ServiceError::RecordNotFound(_) => "Not Found",
            other if other.is_empty_result() => "No Data",
            _ => "Error",
        };
        Self {
            ok: false,
            title: title.to_string(),
            message: err.to_string(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            title: "Invalid Input".to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of a search: rows for the results table, or a notice.
pub type SearchOutcome = Result<Vec<PerformanceRecord>, Notice>;

/// Outcome of a visualize request: a chart to open, or a notice.
pub type ChartOutcome = Result<ChartSpec, Notice>;

pub fn add_record(conn: &Connection, input: &RecordInput) -> Notice {
    match with_record_service(conn, |service| service.add_record(input)) {
        Ok(_) => Notice::success(
            "Data Added",
            "Performance data has been added successfully.",
        ),
        Err(err) => Notice::failure(&err),
    }
}

/// Replaces every field of the record whose id is typed in `id_text`.
pub fn update_record(conn: &Connection, id_text: &str, input: &RecordInput) -> Notice {
    let id = match parse_record_id(id_text) {
        Ok(id) => id,
        Err(notice) => return notice,
    };
    match with_record_service(conn, |service| service.update_record(id, input)) {
        Ok(()) => Notice::success(
            "Data Updated",
            "Performance data has been updated successfully.",
        ),
        Err(err) => Notice::failure(&err),
    }
}

pub fn delete_record(conn: &Connection, id_text: &str) -> Notice {
    let id = match parse_record_id(id_text) {
        Ok(id) => id,
        Err(notice) => return notice,
    };
    match with_record_service(conn, |service| service.delete_record(id)) {
        Ok(()) => Notice::success(
            "Data Deleted",
            "Performance data has been deleted successfully.",
        ),
        Err(err) => Notice::failure(&err),
    }
}

pub fn search(conn: &Connection, name: &str) -> SearchOutcome {
    with_record_service(conn, |service| service.search(name, None))
        .map_err(|err| Notice::failure(&err))
}

pub fn visualize(conn: &Connection, name: &str, period: Period, style: ChartStyle) -> ChartOutcome {
    with_record_service(conn, |service| service.visualize(name, period, style))
        .map_err(|err| Notice::failure(&err))
}

/// Exports every record to `path_text`.
pub fn export(conn: &Connection, format: ExportFormat, path_text: &str) -> Notice {
    let path_text = path_text.trim();
    if path_text.is_empty() {
        return Notice::invalid("Choose an output file before exporting.");
    }
    match with_record_service(conn, |service| {
        service.export_all(format, Path::new(path_text))
    }) {
        Ok(summary) => Notice::success(
            "Export Successful",
            format!("Data exported to {}", summary.path.display()),
        ),
        Err(err) => Notice::failure(&err),
    }
}

fn parse_record_id(id_text: &str) -> Result<RecordId, Notice> {
    let trimmed = id_text.trim();
    trimmed
        .parse::<RecordId>()
        .map_err(|_| Notice::invalid(format!("invalid record id `{trimmed}`")))
}
