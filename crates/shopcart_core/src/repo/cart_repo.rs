//! Cart store contract and SQLite implementation.
//!
//! # Responsibility
//! - Issue the fixed insert/delete/update/list statements against `cart`.
//! - Refuse connections that have not been migrated.
//!
//! # Invariants
//! - Name-keyed writes affect every row with that name.
//! - `list_all` returns rows in physical (id) order.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::migrations::{current_schema_version, latest_version};
use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CART_COLUMNS: &[&str] = &["id", "item", "price"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for cart persistence and schema checks.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted cart data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is at schema version {actual_version}, expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
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

/// Persistent storage behind a cart.
pub trait CartStore {
    /// Inserts one row and returns its generated id.
    fn insert(&self, name: &str, price: f64) -> RepoResult<ItemId>;
    /// Deletes every row named `name`; returns the number removed.
    fn delete_by_name(&self, name: &str) -> RepoResult<usize>;
    /// Renames and/or reprices every row named `name`; returns rows changed.
    ///
    /// With neither `new_name` nor `new_price` this is a logged no-op.
    fn update(
        &self,
        name: &str,
        new_name: Option<&str>,
        new_price: Option<f64>,
    ) -> RepoResult<usize>;
    /// Full scan in physical row order.
    fn list_all(&self) -> RepoResult<Vec<Item>>;
}

/// SQLite-backed cart store borrowing a migrated connection.
pub struct SqliteCartStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCartStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not run to the latest
    ///   version.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when `cart` does not
    ///   have the expected shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let actual_version = if table_exists(conn, "schema_version")? {
            current_schema_version(conn)?
        } else {
            0
        };
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, "cart")? {
            return Err(RepoError::MissingRequiredTable("cart"));
        }
        let columns = table_columns(conn, "cart")?;
        for &column in CART_COLUMNS {
            if !columns.iter().any(|name| name == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: "cart",
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl CartStore for SqliteCartStore<'_> {
    fn insert(&self, name: &str, price: f64) -> RepoResult<ItemId> {
        self.conn.execute(
            "INSERT INTO cart (item, price) VALUES (?1, ?2);",
            params![name, price],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!("event=store_insert module=repo status=ok id={id}");
        Ok(id)
    }

    fn delete_by_name(&self, name: &str) -> RepoResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM cart WHERE item = ?1;", [name])?;
        debug!("event=store_delete module=repo status=ok rows={removed}");
        Ok(removed)
    }

    fn update(
        &self,
        name: &str,
        new_name: Option<&str>,
        new_price: Option<f64>,
    ) -> RepoResult<usize> {
        let changed = match (new_name, new_price) {
            (Some(new_name), Some(new_price)) => self.conn.execute(
                "UPDATE cart SET item = ?1, price = ?2 WHERE item = ?3;",
                params![new_name, new_price, name],
            )?,
            (Some(new_name), None) => self.conn.execute(
                "UPDATE cart SET item = ?1 WHERE item = ?2;",
                params![new_name, name],
            )?,
            (None, Some(new_price)) => self.conn.execute(
                "UPDATE cart SET price = ?1 WHERE item = ?2;",
                params![new_price, name],
            )?,
            (None, None) => {
                warn!("event=store_update module=repo status=skipped reason=no_changes");
                return Ok(0);
            }
        };
        debug!("event=store_update module=repo status=ok rows={changed}");
        Ok(changed)
    }

    fn list_all(&self) -> RepoResult<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, item, price FROM cart ORDER BY id;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();

        while let Some(row) = rows.next()? {
            items.push(parse_item_row(row)?);
        }

        Ok(items)
    }
}

fn parse_item_row(row: &Row<'_>) -> RepoResult<Item> {
    let item = Item {
        id: row.get("id")?,
        name: row.get("item")?,
        price: row.get("price")?,
    };
    item.validate().map_err(|err| {
        RepoError::InvalidData(format!("cart row {} has {err}", item.id))
    })?;
    Ok(item)
}

fn table_exists(conn: &Connection, table_name: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table_name: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table_name});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>("name"))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
