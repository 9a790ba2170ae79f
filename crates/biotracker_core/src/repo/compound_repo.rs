//! Compound catalog repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable catalog access over the `compounds` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Compound::validate()` before SQL mutations.
//! - Name uniqueness is enforced by the table's UNIQUE constraint and
//!   surfaced as `DuplicateName`.
//! - Listing order is insertion order (rowid ascending).

use crate::model::compound::{Compound, CompoundId};
use crate::repo::{ensure_schema_ready, is_constraint_violation, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const COMPOUND_SELECT_SQL: &str = "SELECT
    id,
    name,
    half_life_hours,
    category,
    min_threshold,
    time_to_peak_hours
FROM compounds";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "half_life_hours",
    "category",
    "min_threshold",
    "time_to_peak_hours",
];

/// Repository interface for catalog operations.
pub trait CompoundRepository {
    fn insert_compound(&self, compound: &Compound) -> RepoResult<CompoundId>;
    fn get_compound(&self, id: CompoundId) -> RepoResult<Option<Compound>>;
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Compound>>;
    fn list_compounds(&self) -> RepoResult<Vec<Compound>>;
    fn delete_compound(&self, id: CompoundId) -> RepoResult<()>;
}

/// SQLite-backed compound repository.
pub struct SqliteCompoundRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompoundRepository<'conn> {
    /// Binds the repository to a migrated connection.
    ///
    /// # Errors
    /// Rejects connections whose schema version or `compounds` shape does
    /// not match this binary.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "compounds", REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CompoundRepository for SqliteCompoundRepository<'_> {
    fn insert_compound(&self, compound: &Compound) -> RepoResult<CompoundId> {
        compound.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO compounds (
                id,
                name,
                half_life_hours,
                category,
                min_threshold,
                time_to_peak_hours
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                compound.id.to_string(),
                compound.name.as_str(),
                compound.half_life_hours,
                compound.category.as_str(),
                compound.min_threshold,
                compound.time_to_peak_hours,
            ],
        );

        match inserted {
            Ok(_) => Ok(compound.id),
            Err(err) if is_constraint_violation(&err) => {
                Err(RepoError::DuplicateName(compound.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_compound(&self, id: CompoundId) -> RepoResult<Option<Compound>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPOUND_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_compound_row(row)?));
        }
        Ok(None)
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Compound>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPOUND_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_compound_row(row)?));
        }
        Ok(None)
    }

    fn list_compounds(&self) -> RepoResult<Vec<Compound>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMPOUND_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut compounds = Vec::new();

        while let Some(row) = rows.next()? {
            compounds.push(parse_compound_row(row)?);
        }

        Ok(compounds)
    }

    fn delete_compound(&self, id: CompoundId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM compounds WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_compound_row(row: &Row<'_>) -> RepoResult<Compound> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in compounds.id"))
    })?;

    let compound = Compound::with_id(
        id,
        row.get::<_, String>("name")?,
        row.get("half_life_hours")?,
        row.get::<_, String>("category")?,
        row.get("min_threshold")?,
        row.get("time_to_peak_hours")?,
    );
    compound.validate()?;
    Ok(compound)
}
