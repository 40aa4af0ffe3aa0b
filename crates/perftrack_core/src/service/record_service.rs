//! Performance record use-case service.
//!
//! # Responsibility
//! - Validate raw input before any write.
//! - Provide add/update/delete/list/search/visualize/export entry points.
//!
//! # Invariants
//! - Malformed input never reaches the repository.
//! - Empty search, chart and export selections fail without side effects.

use crate::chart::series::{build_chart, ChartError, ChartSpec, ChartStyle};
use crate::export::{export_records, ExportError, ExportFormat, ExportSummary};
use crate::model::record::{
    Period, PerformanceRecord, RecordId, RecordInput, RecordValidationError,
};
use crate::query::filter::RecordFilter;
use crate::repo::record_repo::{RecordRepository, RepoError, SqliteRecordRepository};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for record use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching storage.
    Validation(RecordValidationError),
    /// Target record does not exist.
    RecordNotFound(RecordId),
    /// Search matched nothing.
    NoMatches {
        name: String,
        period: Option<Period>,
    },
    Chart(ChartError),
    Export(ExportError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::RecordNotFound(id) => write!(f, "No performance record with id {id}."),
            Self::NoMatches {
                name,
                period: Some(period),
            } => write!(
                f,
                "No performance data found for {name} for {period} period."
            ),
            Self::NoMatches { name, period: None } => {
                write!(f, "No performance data found for {name}.")
            }
            Self::Chart(err) => write!(f, "{err}"),
            Self::Export(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Chart(err) => Some(err),
            Self::Export(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::RecordNotFound(_) | Self::NoMatches { .. } => None,
        }
    }
}

impl ServiceError {
    /// Whether the failure is an empty-result condition rather than a fault.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            Self::NoMatches { .. }
                | Self::Chart(ChartError::NoData { .. })
                | Self::Export(ExportError::NoRecords)
        )
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::RecordNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<RecordValidationError> for ServiceError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ChartError> for ServiceError {
    fn from(value: ChartError) -> Self {
        Self::Chart(value)
    }
}

impl From<ExportError> for ServiceError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

/// Use-case service wrapper for record operations.
pub struct RecordService<R: RecordRepository> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates form input and appends a new record.
    pub fn add_record(&self, input: &RecordInput) -> ServiceResult<RecordId> {
        let draft = input.parse()?;
        let id = self.repo.create_record(&draft)?;
        info!("event=record_add module=service status=ok record_id={id}");
        Ok(id)
    }

    /// Validates form input and replaces every field of record `id`.
    pub fn update_record(&self, id: RecordId, input: &RecordInput) -> ServiceResult<()> {
        let draft = input.parse()?;
        self.repo.update_record(id, &draft)?;
        info!("event=record_update module=service status=ok record_id={id}");
        Ok(())
    }

    pub fn delete_record(&self, id: RecordId) -> ServiceResult<()> {
        self.repo.delete_record(id)?;
        info!("event=record_delete module=service status=ok record_id={id}");
        Ok(())
    }

    pub fn get_record(&self, id: RecordId) -> ServiceResult<PerformanceRecord> {
        self.repo
            .get_record(id)?
            .ok_or(ServiceError::RecordNotFound(id))
    }

    /// Returns every record in storage order.
    pub fn list_records(&self) -> ServiceResult<Vec<PerformanceRecord>> {
        Ok(self.repo.list_records()?)
    }

    /// Returns records matching `filter`; an empty result is not an error.
    pub fn list_filtered(&self, filter: &RecordFilter) -> ServiceResult<Vec<PerformanceRecord>> {
        Ok(filter.apply(&self.repo.list_records()?))
    }

    /// Finds records for one employee, optionally narrowed to a period.
    ///
    /// # Errors
    /// - `NoMatches` when nothing matches.
    pub fn search(
        &self,
        name: &str,
        period: Option<Period>,
    ) -> ServiceResult<Vec<PerformanceRecord>> {
        let name = name.trim();
        let filter = RecordFilter {
            name: Some(name.to_string()),
            period,
        };
        let hits = self.list_filtered(&filter)?;
        info!(
            "event=record_search module=service status=ok hits={} period_filter={}",
            hits.len(),
            period.is_some()
        );
        if hits.is_empty() {
            return Err(ServiceError::NoMatches {
                name: name.to_string(),
                period,
            });
        }
        Ok(hits)
    }

    /// Builds chart series for one employee and period.
    pub fn visualize(
        &self,
        name: &str,
        period: Period,
        style: ChartStyle,
    ) -> ServiceResult<ChartSpec> {
        let records = self.repo.list_records()?;
        let chart = build_chart(&records, name.trim(), period, style)?;
        info!(
            "event=chart_build module=service status=ok series={}",
            chart.series.len()
        );
        Ok(chart)
    }

    /// Exports the full, unfiltered record set.
    pub fn export_all(&self, format: ExportFormat, path: &Path) -> ServiceResult<ExportSummary> {
        let records = self.repo.list_records()?;
        Ok(export_records(&records, format, path)?)
    }
}

/// Runs `op` against a service borrowing `conn` for the duration of the call.
///
/// The borrow ends on every exit path, including errors.
pub fn with_record_service<T>(
    conn: &Connection,
    op: impl FnOnce(&RecordService<SqliteRecordRepository<'_>>) -> ServiceResult<T>,
) -> ServiceResult<T> {
    let repo = SqliteRecordRepository::try_new(conn)?;
    op(&RecordService::new(repo))
}
