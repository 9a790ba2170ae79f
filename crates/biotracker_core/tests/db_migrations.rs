use biotracker_core::db::migrations::latest_version;
use biotracker_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "compounds");
    assert_table_exists(&conn, "logs");
}

#[test]
fn kinetics_columns_are_present_after_bootstrap() {
    let conn = open_db_in_memory().unwrap();

    assert_column_exists(&conn, "compounds", "min_threshold");
    assert_column_exists(&conn, "compounds", "time_to_peak_hours");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("biotracker.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "compounds");
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
fn upgrading_a_version_one_database_preserves_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE compounds (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            half_life_hours REAL NOT NULL,
            category TEXT NOT NULL
        );
        CREATE TABLE logs (
            id TEXT PRIMARY KEY NOT NULL,
            compound_name TEXT NOT NULL,
            dose_amount REAL NOT NULL,
            timestamp_ms INTEGER NOT NULL
        );
        CREATE INDEX idx_logs_compound_time ON logs (compound_name, timestamp_ms);
        INSERT INTO compounds (id, name, half_life_hours, category)
        VALUES ('00000000-0000-4000-8000-000000000001', 'BPC-157', 4.0, 'Peptide');
        PRAGMA user_version = 1;",
    )
    .unwrap();
    drop(conn);

    let upgraded = open_db(&path).unwrap();
    assert_eq!(schema_version(&upgraded), latest_version());
    assert_column_exists(&upgraded, "compounds", "min_threshold");

    let (name, threshold): (String, f64) = upgraded
        .query_row(
            "SELECT name, min_threshold FROM compounds WHERE name = 'BPC-157';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "BPC-157");
    assert_eq!(threshold, 0.0);
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

fn assert_column_exists(conn: &Connection, table_name: &str, column_name: &str) {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2;",
            [table_name, column_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(count, 1, "column {table_name}.{column_name} does not exist");
}
