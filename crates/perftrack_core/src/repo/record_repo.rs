//! Performance record repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `performance` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `id` is assigned by SQLite (`AUTOINCREMENT`) and never rewritten.
//! - `get_record` rejects an undecodable row with `InvalidData`.
//! - `list_records` skips undecodable rows with a warning; valid rows still load.
//! - `list_records` returns rows in natural storage order (`id ASC`).

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::record::{
    Period, PerformanceRecord, RecordDraft, RecordId, RecordValidationError, DATE_FORMAT,
};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const RECORD_SELECT_SQL: &str = "SELECT
    id,
    name,
    date,
    metric,
    score,
    period
FROM performance";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecordValidationError),
    Db(DbError),
    NotFound(RecordId),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::UninitializedConnection { .. } => {
                None
            }
        }
    }
}

impl From<RecordValidationError> for RepoError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for performance record CRUD.
pub trait RecordRepository {
    fn create_record(&self, draft: &RecordDraft) -> RepoResult<RecordId>;
    fn get_record(&self, id: RecordId) -> RepoResult<Option<PerformanceRecord>>;
    fn list_records(&self) -> RepoResult<Vec<PerformanceRecord>>;
    fn update_record(&self, id: RecordId, draft: &RecordDraft) -> RepoResult<()>;
    fn delete_record(&self, id: RecordId) -> RepoResult<()>;
}

/// SQLite-backed record repository borrowing a long-lived connection.
pub struct SqliteRecordRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecordRepository<'conn> {
    /// Wraps a connection that was opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is not current.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl RecordRepository for SqliteRecordRepository<'_> {
    fn create_record(&self, draft: &RecordDraft) -> RepoResult<RecordId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO performance (name, date, metric, score, period)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.name.as_str(),
                draft.date.format(DATE_FORMAT).to_string(),
                draft.metric.as_str(),
                draft.score,
                draft.period.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        debug!("event=record_create module=repo status=ok record_id={id}");
        Ok(id)
    }

    fn get_record(&self, id: RecordId) -> RepoResult<Option<PerformanceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt.query_row([id], RawRow::read).optional()?;

        row.map(RawRow::decode).transpose()
    }

    fn list_records(&self) -> RepoResult<Vec<PerformanceRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let raw = RawRow::read(row)?;
            let id = raw.id;
            match raw.decode() {
                Ok(record) => records.push(record),
                Err(_) => {
                    warn!("event=record_decode module=repo status=error record_id={id}");
                }
            }
        }

        Ok(records)
    }

    fn update_record(&self, id: RecordId, draft: &RecordDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE performance
             SET
                name = ?1,
                date = ?2,
                metric = ?3,
                score = ?4,
                period = ?5
             WHERE id = ?6;",
            params![
                draft.name.as_str(),
                draft.date.format(DATE_FORMAT).to_string(),
                draft.metric.as_str(),
                draft.score,
                draft.period.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("event=record_update module=repo status=ok record_id={id}");
        Ok(())
    }

    fn delete_record(&self, id: RecordId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM performance WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        debug!("event=record_delete module=repo status=ok record_id={id}");
        Ok(())
    }
}

/// Column values as stored; legacy rows may carry NULLs.
struct RawRow {
    id: RecordId,
    name: Option<String>,
    date: Option<String>,
    metric: Option<String>,
    score: Value,
    period: Option<String>,
}

impl RawRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            date: row.get("date")?,
            metric: row.get("metric")?,
            score: row.get("score")?,
            period: row.get("period")?,
        })
    }

    fn decode(self) -> RepoResult<PerformanceRecord> {
        let id = self.id;
        let missing =
            |column: &str| RepoError::InvalidData(format!("record {id} has NULL performance.{column}"));

        let date_text = self.date.ok_or_else(|| missing("date"))?;
        let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid date value `{date_text}` in performance.date (record {id})"
            ))
        })?;

        let period_text = self.period.ok_or_else(|| missing("period"))?;
        let period = parse_period(&period_text).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid period value `{period_text}` in performance.period (record {id})"
            ))
        })?;

        Ok(PerformanceRecord {
            id,
            name: self.name.ok_or_else(|| missing("name"))?,
            date,
            metric: self.metric.ok_or_else(|| missing("metric"))?,
            score: decode_score(id, self.score)?,
            period,
        })
    }
}

fn decode_score(id: RecordId, value: Value) -> RepoResult<i64> {
    match value {
        Value::Integer(score) => Ok(score),
        Value::Null => Err(RepoError::InvalidData(format!(
            "record {id} has NULL performance.score"
        ))),
        other => Err(RepoError::InvalidData(format!(
            "non-integer value {other:?} in performance.score (record {id})"
        ))),
    }
}

fn parse_period(value: &str) -> Option<Period> {
    Period::ALL
        .into_iter()
        .find(|period| period.as_str() == value)
}
