//! # Error Types
//!
//! Domain-specific error types for termomaz-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  termomaz-core errors (this file)                                      │
//! │  └── CartError        - Cart rule violations                           │
//! │                                                                         │
//! │  termomaz-client errors (separate crate)                               │
//! │  ├── SubmitError      - Order submission failures                      │
//! │  └── ConfigError      - Client configuration problems                  │
//! │                                                                         │
//! │  Flow: CartError / SubmitError → one-line message on the screen        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected operation leaves the cart exactly as it was, so callers
//! only need to show the message and carry on.

use thiserror::Error;

use crate::types::Identifier;

/// Cart rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Requested quantity is zero or negative.
    #[error("Quantity must be a positive whole number, got {requested}")]
    InvalidQuantity { requested: i64 },

    /// Adding the requested quantity would push the line past available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart has A x4, stock = 5
    ///      │
    ///      ▼
    /// Add A (qty: 2)
    ///      │
    ///      ▼
    /// InsufficientStock { id: "A", available: 5, in_cart: 4, requested: 2 }
    ///      │
    ///      ▼
    /// UI shows: "Not enough stock for A: 5 available, 4 already in cart, 2 requested"
    /// ```
    #[error(
        "Not enough stock for {id}: {available} available, {in_cart} already in cart, {requested} requested"
    )]
    InsufficientStock {
        id: Identifier,
        available: i64,
        in_cart: i64,
        requested: i64,
    },

    /// Row index does not exist in the current cart.
    #[error("Row {index} does not exist (cart has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No line item carries the given product id.
    #[error("Product {0} is not in the cart")]
    ItemNotFound(Identifier),

    /// The line or cart total would not fit in the money type.
    #[error("Amount too large for {id}: the cart total would overflow")]
    AmountOverflow { id: Identifier },
}

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::InsufficientStock {
            id: Identifier::from("A"),
            available: 5,
            in_cart: 4,
            requested: 2,
        };
        assert_eq!(
            err.to_string(),
            "Not enough stock for A: 5 available, 4 already in cart, 2 requested"
        );

        let err = CartError::IndexOutOfRange { index: 5, len: 2 };
        assert_eq!(err.to_string(), "Row 5 does not exist (cart has 2 rows)");
    }

    #[test]
    fn test_overflow_message() {
        let err = CartError::AmountOverflow {
            id: Identifier::from("A"),
        };
        assert_eq!(
            err.to_string(),
            "Amount too large for A: the cart total would overflow"
        );
    }

    #[test]
    fn test_numeric_ids_render_plainly() {
        let err = CartError::ItemNotFound(Identifier::from(42_i64));
        assert_eq!(err.to_string(), "Product 42 is not in the cart");
    }
}
