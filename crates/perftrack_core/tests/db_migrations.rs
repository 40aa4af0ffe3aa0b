use perftrack_core::db::migrations::latest_version;
use perftrack_core::db::{open_db, open_db_in_memory, DbError};
use perftrack_core::{
    with_record_service, ExportFormat, PerformanceRecord, RecordRepository, SqliteRecordRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "performance");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("perftrack.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "performance");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unversioned_legacy_table_is_adopted_with_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employee_performance.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS performance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                date TEXT,
                metric TEXT,
                score INTEGER,
                period TEXT
            );
            INSERT INTO performance (name, date, metric, score, period)
            VALUES ('Alice', '2023-12-01', 'Sales', '75', 'Monthly');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let records: Vec<PerformanceRecord> = repo.list_records().unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Alice");
    assert_eq!(records[0].score, 75);
}

#[test]
fn legacy_rows_that_fail_to_decode_do_not_hide_valid_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employee_performance.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS performance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                date TEXT,
                metric TEXT,
                score INTEGER,
                period TEXT
            );
            INSERT INTO performance (name, date, metric, score, period)
            VALUES ('Alice', '2023-12-01', 'Sales', '75', 'Monthly');
            INSERT INTO performance (name, date, metric, score, period)
            VALUES ('Bob', 'Jan 5 2024', 'Sales', '60', 'Monthly');
            INSERT INTO performance (name, date, metric, score, period)
            VALUES ('Carol', '2024-01-05', 'Sales', '', 'Monthly');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    let repo = SqliteRecordRepository::try_new(&conn).unwrap();
    let records = repo.list_records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Alice");

    let hits = with_record_service(&conn, |service| service.search("Alice", None)).unwrap();
    assert_eq!(hits.len(), 1);

    let target = dir.path().join("legacy");
    let summary =
        with_record_service(&conn, |service| service.export_all(ExportFormat::Csv, &target))
            .unwrap();
    assert_eq!(summary.rows, 1);
    let text = std::fs::read_to_string(&summary.path).unwrap();
    assert_eq!(text.lines().count(), 2);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
