//! Cart schema migration registry and executor.
//!
//! # Responsibility
//! - Create the legacy-compatible base tables when they are absent.
//! - Apply pending migrations atomically, recording each in `schema_version`.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - A database with no `schema_version` row is at version 0 (legacy shape).

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::{Connection, OptionalExtension};

const BASE_SCHEMA_SQL: &str = include_str!("0000_base.sql");

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "cart_not_null",
    sql: include_str!("0001_cart_not_null.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies the base schema and every pending migration in one transaction.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database was written by a
///   newer binary.
/// - `DbError::Sqlite` for any statement failure; nothing is committed then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(BASE_SCHEMA_SQL)?;

    let current_version = current_schema_version(&tx)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        tx.commit()?;
        return Ok(());
    }

    let legacy_rows = count_rows(&tx)?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_version (version) VALUES (?1);",
            [migration.version],
        )?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            migration.version, migration.name
        );
    }

    let kept_rows = count_rows(&tx)?;
    if kept_rows < legacy_rows {
        warn!(
            "event=db_migrate module=db status=ok dropped_rows={} reason=null_item_or_price",
            legacy_rows - kept_rows
        );
    }
    tx.commit()?;

    Ok(())
}

/// Reads the highest recorded schema version, or 0 when none is recorded.
pub fn current_schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1;",
            [],
            |row| row.get::<_, u32>(0),
        )
        .optional()?;
    Ok(version.unwrap_or(0))
}

fn count_rows(conn: &Connection) -> DbResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM cart;", [], |row| row.get(0))?;
    Ok(count)
}
