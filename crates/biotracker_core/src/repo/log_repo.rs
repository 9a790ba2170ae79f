//! Administration log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable access over the `logs` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `LogEntry::validate()` before SQL mutations.
//! - Canonical listing order is timestamp descending, ties by insertion
//!   order (rowid ascending).
//! - `compound_name` is stored as written; no catalog lookup happens here.

use crate::model::log_entry::{LogEntry, LogEntryId};
use crate::model::timestamp::{from_storage_millis, to_storage_millis};
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const LOG_SELECT_SQL: &str = "SELECT
    id,
    compound_name,
    dose_amount,
    timestamp_ms
FROM logs";

const REQUIRED_COLUMNS: &[&str] = &["id", "compound_name", "dose_amount", "timestamp_ms"];

/// Repository interface for dose log operations.
pub trait LogRepository {
    fn insert_entry(&self, entry: &LogEntry) -> RepoResult<LogEntryId>;
    /// All entries, most recent first, ties in insertion order.
    fn list_entries(&self) -> RepoResult<Vec<LogEntry>>;
    /// Entries for one compound with `timestamp <= until`, oldest first.
    fn entries_for_compound_until(
        &self,
        compound_name: &str,
        until: NaiveDateTime,
    ) -> RepoResult<Vec<LogEntry>>;
    fn delete_entry(&self, id: LogEntryId) -> RepoResult<()>;
}

/// SQLite-backed dose log repository.
pub struct SqliteLogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLogRepository<'conn> {
    /// Binds the repository to a migrated connection.
    ///
    /// # Errors
    /// Rejects connections whose schema version or `logs` shape does not
    /// match this binary.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "logs", REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl LogRepository for SqliteLogRepository<'_> {
    fn insert_entry(&self, entry: &LogEntry) -> RepoResult<LogEntryId> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO logs (
                id,
                compound_name,
                dose_amount,
                timestamp_ms
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                entry.id.to_string(),
                entry.compound_name.as_str(),
                entry.dose_amount,
                to_storage_millis(entry.timestamp),
            ],
        )?;

        Ok(entry.id)
    }

    fn list_entries(&self) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOG_SELECT_SQL} ORDER BY timestamp_ms DESC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_log_row(row)?);
        }

        Ok(entries)
    }

    fn entries_for_compound_until(
        &self,
        compound_name: &str,
        until: NaiveDateTime,
    ) -> RepoResult<Vec<LogEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{LOG_SELECT_SQL}
             WHERE compound_name = ?1 AND timestamp_ms <= ?2
             ORDER BY timestamp_ms ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query(params![compound_name, to_storage_millis(until)])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_log_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: LogEntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM logs WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_log_row(row: &Row<'_>) -> RepoResult<LogEntry> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{id_text}` in logs.id")))?;

    let millis: i64 = row.get("timestamp_ms")?;
    let timestamp = from_storage_millis(millis).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "timestamp value `{millis}` in logs.timestamp_ms is out of range"
        ))
    })?;

    let entry = LogEntry::with_id(
        id,
        row.get::<_, String>("compound_name")?,
        row.get("dose_amount")?,
        timestamp,
    );
    entry.validate()?;
    Ok(entry)
}
