//! Cart use-case service.
//!
//! # Responsibility
//! - Keep the in-memory mirror of the `cart` table that front ends render.
//! - Validate input, delegate writes to the store, write audit lines.
//! - Export the mirror and the audit trail to files.
//!
//! # Invariants
//! - The mirror is only ever replaced by a full `list_all` read; it is
//!   never edited in place, so after a successful mutation it equals the table.
//! - A failed store call leaves the mirror untouched.
//! - A store write that succeeds is audited even if the reload after it fails.
//! - Export failures are logged and reported as `false`, never raised.

use crate::audit::{AuditSink, LogAuditSink};
use crate::export::{write_json, write_lines, write_shopping_list};
use crate::model::item::{validate_price, Item, ItemId, ItemValidationError};
use crate::repo::cart_repo::{CartStore, RepoError};
use log::{error, info, Level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

pub type CartResult<T> = Result<T, CartError>;

/// Service error for cart use-cases.
#[derive(Debug)]
pub enum CartError {
    /// Input rejected before reaching the store.
    Validation(ItemValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for CartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ItemValidationError> for CartError {
    fn from(value: ItemValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for CartError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Shopping cart backed by a [`CartStore`].
pub struct Cart<S: CartStore, A: AuditSink = LogAuditSink> {
    store: S,
    audit: A,
    items: Vec<Item>,
}

impl<S: CartStore> Cart<S> {
    /// Loads the cart with audit lines going to the `log` facade.
    pub fn open(store: S) -> CartResult<Self> {
        Self::load(store, LogAuditSink)
    }
}

impl<S: CartStore, A: AuditSink> Cart<S, A> {
    /// Builds the cart and fills the mirror from the store.
    pub fn load(store: S, audit: A) -> CartResult<Self> {
        let items = store.list_all()?;
        info!(
            "event=cart_load module=service status=ok count={}",
            items.len()
        );
        Ok(Self {
            store,
            audit,
            items,
        })
    }

    /// Current mirror, in store row order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Adds an item and returns its store-assigned id.
    ///
    /// # Errors
    /// - `Validation` when `price` is not finite; nothing is written.
    /// - `Repo` when the insert or the mirror reload fails.
    pub fn add(&mut self, name: impl Into<String>, price: f64) -> CartResult<ItemId> {
        let name = name.into();
        let price = validate_price(price)?;

        let id = self.store.insert(&name, price)?;
        self.audit.record(
            Level::Info,
            &format!("Item {name} with ID {id} and price {price:.2} $ added to the cart."),
        );
        self.reload()?;
        Ok(id)
    }

    /// Removes every item named `name` and returns how many rows went away.
    ///
    /// The store delete runs even when the mirror holds no such item, so rows
    /// written by other processes are removed too.
    pub fn remove(&mut self, name: &str) -> CartResult<usize> {
        let removed = self.store.delete_by_name(name)?;
        if removed > 0 {
            self.audit
                .record(Level::Info, &format!("Item {name} removed from the cart."));
        } else {
            self.audit.record(
                Level::Info,
                &format!("Item {name} not found in the cart; nothing removed."),
            );
        }
        self.reload()?;
        Ok(removed)
    }

    /// First mirror entry named `name`.
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.name == name)
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Sum of mirror prices; `0.0` for an empty cart.
    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Renames and/or reprices items named `old_name`.
    ///
    /// Returns the number of rows changed. With neither value given this is a
    /// no-op that only records a warning.
    pub fn update(
        &mut self,
        old_name: &str,
        new_name: Option<&str>,
        new_price: Option<f64>,
    ) -> CartResult<usize> {
        if new_name.is_none() && new_price.is_none() {
            self.audit.record(Level::Warn, "No updates provided.");
            return Ok(0);
        }
        let new_price = new_price.map(validate_price).transpose()?;

        let changed = self.store.update(old_name, new_name, new_price)?;
        if changed > 0 {
            let price_text =
                new_price.map_or_else(|| "unchanged".to_string(), |p| format!("{p:.2}"));
            self.audit.record(
                Level::Info,
                &format!(
                    "Updated item {old_name} to {} with price {price_text} in the cart.",
                    new_name.unwrap_or(old_name)
                ),
            );
        } else {
            self.audit.record(
                Level::Info,
                &format!("Item {old_name} not found in the cart; nothing updated."),
            );
        }
        self.reload()?;
        Ok(changed)
    }

    /// Replaces the mirror with a fresh read of the store.
    pub fn refresh(&mut self) -> CartResult<()> {
        self.reload()?;
        self.audit.record(
            Level::Info,
            &format!("Cart refreshed from the database ({} items).", self.items.len()),
        );
        Ok(())
    }

    /// Writes `"<name>, <price>"` lines to `path`.
    pub fn export_shopping_list(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let result = create(path).and_then(|file| write_shopping_list(&self.items, file));
        self.finish_export("shopping_list", "Shopping list", path, result)
    }

    /// Writes the mirror as a JSON array to `path`.
    pub fn export_json(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let result = create(path).and_then(|file| write_json(&self.items, file));
        self.finish_export("cart_json", "Shopping cart", path, result)
    }

    /// Writes the audit lines recorded so far to `path`.
    pub fn export_audit_log(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let lines = self.audit.recorded();
        let result = create(path).and_then(|file| write_lines(&lines, file));
        self.finish_export("audit_log", "Logs", path, result)
    }

    fn reload(&mut self) -> CartResult<()> {
        self.items = self.store.list_all()?;
        Ok(())
    }

    fn finish_export(&self, kind: &str, label: &str, path: &Path, result: io::Result<()>) -> bool {
        match result {
            Ok(()) => {
                info!(
                    "event=cart_export module=service status=ok kind={} path={}",
                    kind,
                    path.display()
                );
                self.audit.record(
                    Level::Info,
                    &format!("{label} exported to {}.", path.display()),
                );
                true
            }
            Err(err) => {
                error!(
                    "event=cart_export module=service status=error kind={} path={} error={}",
                    kind,
                    path.display(),
                    err
                );
                self.audit.record(
                    Level::Error,
                    &format!("Failed to export {} to {}: {err}", label.to_lowercase(), path.display()),
                );
                false
            }
        }
    }
}

fn create(path: &Path) -> io::Result<BufWriter<File>> {
    File::create(path).map(BufWriter::new)
}
