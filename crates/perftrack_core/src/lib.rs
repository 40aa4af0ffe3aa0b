//! Core domain logic for PerfTrack.
//! This crate is the single source of truth for record invariants.

pub mod chart;
pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use chart::series::{build_chart, ChartError, ChartPoint, ChartSpec, ChartStyle, MetricSeries};
pub use config::{AppConfig, ConfigError};
pub use export::{export_records, ExportError, ExportFormat, ExportSummary};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::record::{
    Period, PerformanceRecord, RecordDraft, RecordId, RecordInput, RecordValidationError,
    DATE_FORMAT,
};
pub use query::filter::{distinct_metrics, filter_by_name, filter_by_name_and_period, RecordFilter};
pub use repo::record_repo::{RecordRepository, RepoError, RepoResult, SqliteRecordRepository};
pub use service::record_service::{
    with_record_service, RecordService, ServiceError, ServiceResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
