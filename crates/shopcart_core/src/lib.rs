//! Core of the shopcart manager: SQLite item store, cart mirror, exports.
//! Front ends depend on this crate only through the re-exports below.

pub mod audit;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use audit::{AuditSink, FileAuditSink, LogAuditSink, MemoryAuditSink};
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::item::{parse_price, Item, ItemId, ItemValidationError};
pub use repo::cart_repo::{CartStore, RepoError, RepoResult, SqliteCartStore};
pub use service::cart_service::{Cart, CartError, CartResult};
