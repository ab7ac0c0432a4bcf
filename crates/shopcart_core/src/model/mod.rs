//! Cart domain model.
//!
//! # Invariants
//! - Every persisted item is identified by a store-assigned `ItemId`.
//! - Item prices are always finite.

pub mod item;
