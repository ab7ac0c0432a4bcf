//! Item domain model.
//!
//! # Responsibility
//! - Define the record shared by the store, the cart mirror and exports.
//! - Validate user-supplied prices before they reach persistence.
//!
//! # Invariants
//! - `id` is assigned by the store on insert and never reused by it.
//! - `price` is finite.
//! - Names are not unique; name-keyed lookups take the first match.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier (SQLite rowid).
pub type ItemId = i64;

/// One named, priced entry in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Serialized as `item` to match the column name and export format.
    #[serde(rename = "item")]
    pub name: String,
    pub price: f64,
}

/// Validation failures for cart input.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemValidationError {
    /// Price is NaN or infinite.
    NonFinitePrice(f64),
    /// Price text could not be read as a number.
    InvalidPrice(String),
}

impl Display for ItemValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFinitePrice(value) => write!(f, "price must be a finite number, got {value}"),
            Self::InvalidPrice(text) => write!(f, "invalid price `{text}`"),
        }
    }
}

impl Error for ItemValidationError {}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// Checks invariants that must hold for persisted items.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        validate_price(self.price).map(|_| ())
    }
}

/// Accepts a price only when it is a finite number.
pub fn validate_price(price: f64) -> Result<f64, ItemValidationError> {
    if price.is_finite() {
        Ok(price)
    } else {
        Err(ItemValidationError::NonFinitePrice(price))
    }
}

/// Parses user text (CLI argument, form field) into a valid price.
pub fn parse_price(text: &str) -> Result<f64, ItemValidationError> {
    let trimmed = text.trim();
    let price = trimmed
        .parse::<f64>()
        .map_err(|_| ItemValidationError::InvalidPrice(trimmed.to_string()))?;
    validate_price(price)
}
