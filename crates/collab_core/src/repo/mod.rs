//! Repository contracts consumed by services, and their SQLite adapters.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL details out of core logic and services.
//!
//! # Invariants
//! - Write paths call the model `validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Missing targets surface as `PersistenceError::NotFound`, never silently.

pub mod directory_repo;
pub mod error;
pub mod invitation_repo;
pub mod task_repo;

use crate::db::migrations::latest_version;
use error::{PersistenceError, PersistenceResult};
use rusqlite::{Connection, Row};
use uuid::Uuid;

/// Fails unless `conn` carries the latest schema.
pub(crate) fn ensure_schema_ready(conn: &Connection) -> PersistenceResult<()> {
    let version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    if version != latest {
        return Err(PersistenceError::InvalidData(format!(
            "connection schema version {version} does not match expected {latest}; open it with db::open_db"
        )));
    }
    Ok(())
}

pub(crate) fn uuid_column(row: &Row<'_>, column: &str) -> PersistenceResult<Uuid> {
    let text: String = row.get(column)?;
    Uuid::parse_str(&text).map_err(|_| {
        PersistenceError::InvalidData(format!("invalid uuid value `{text}` in column {column}"))
    })
}

pub(crate) fn bool_column(row: &Row<'_>, column: &str) -> PersistenceResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PersistenceError::InvalidData(format!(
            "invalid boolean value `{other}` in column {column}"
        ))),
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
