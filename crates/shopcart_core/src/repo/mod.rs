//! Repository layer: the persistent cart store.
//!
//! # Responsibility
//! - Define the storage contract the cart service depends on.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors in addition to DB transport errors.

pub mod cart_repo;
