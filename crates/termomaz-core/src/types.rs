//! # Domain Types
//!
//! Core domain types used by the order-entry cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Identifier    │   │  ProductOffer   │   │    LineItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Number(i64)    │   │  id             │   │  id             │       │
//! │  │  Text(String)   │   │  name           │──►│  name           │       │
//! │  │                 │   │  price (Money)  │   │  price (frozen) │       │
//! │  │  opaque, Eq     │   │  stock ceiling  │   │  quantity >= 1  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is never stored on a `LineItem`. It travels with each
//! `ProductOffer` and is checked at the moment of the add.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Identifier
// =============================================================================

/// Opaque identifier for products, clients and orders.
///
/// The backend hands out numeric ids, but nothing in the cart depends on
/// that. Ids are compared as given: `Text("1")` and `Number(1)` are
/// different ids. On the wire the value is emitted exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum Identifier {
    Number(i64),
    Text(String),
}

impl Identifier {
    /// Reads an id typed by a user or taken from a form field.
    ///
    /// Plain integers become `Number`, anything else is kept as `Text`.
    ///
    /// ```rust
    /// use termomaz_core::Identifier;
    ///
    /// assert_eq!(Identifier::from_input("17"), Identifier::Number(17));
    /// assert_eq!(Identifier::from_input("SKU-9"), Identifier::Text("SKU-9".into()));
    /// ```
    pub fn from_input(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(n) if !raw.starts_with('+') => Identifier::Number(n),
            _ => Identifier::Text(raw.to_string()),
        }
    }

    /// True for an empty or whitespace-only textual id.
    pub fn is_blank(&self) -> bool {
        match self {
            Identifier::Number(_) => false,
            Identifier::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{}", n),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Identifier::Text(s)
    }
}

impl From<i64> for Identifier {
    fn from(n: i64) -> Self {
        Identifier::Number(n)
    }
}

// =============================================================================
// Product Offer
// =============================================================================

/// A product as the order screen offers it at the moment of an add.
///
/// `stock` is the availability ceiling supplied by the caller for this one
/// operation; the cart keeps no record of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOffer {
    pub id: Identifier,
    pub name: String,
    pub price: Money,
    pub stock: i64,
}

impl ProductOffer {
    pub fn new(
        id: impl Into<Identifier>,
        name: impl Into<String>,
        price: Money,
        stock: i64,
    ) -> Self {
        ProductOffer {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `name` and `price` are frozen when the product is first added. Adding
///   the same id again only bumps `quantity`.
/// - `quantity` is at least 1 for as long as the item is in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Product identifier.
    pub id: Identifier,

    /// Display label at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub price: Money,

    /// Quantity in cart.
    pub quantity: i64,

    /// When this product first entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Creates a line item from an offer and an already validated quantity.
    pub fn from_offer(offer: &ProductOffer, quantity: i64) -> Self {
        LineItem {
            id: offer.id.clone(),
            name: offer.name.clone(),
            price: offer.price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}
