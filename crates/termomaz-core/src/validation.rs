//! # Validation Module
//!
//! Cart rules, checked before any mutation happens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Add To Cart: Rule Order                            │
//! │                                                                         │
//! │  requested <= 0 ?                    ──► InvalidQuantity               │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  requested > stock ?                 ──► InsufficientStock             │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  in_cart + requested > stock ?       ──► InsufficientStock             │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  price × qty + other rows overflows? ──► AmountOverflow                │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  mutate cart                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checks never touch the cart, so a failed add is all-or-nothing.

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::Identifier;

/// Validates a requested quantity.
///
/// ```rust
/// use termomaz_core::validation::validate_quantity;
///
/// assert!(validate_quantity(1).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(requested: i64) -> CartResult<()> {
    if requested <= 0 {
        return Err(CartError::InvalidQuantity { requested });
    }

    Ok(())
}

/// Validates that `in_cart + requested` fits within `stock`.
///
/// `in_cart` is 0 for a product that is not in the cart yet, which turns
/// this into the plain `requested > stock` check.
pub fn validate_stock(
    id: &Identifier,
    in_cart: i64,
    requested: i64,
    stock: i64,
) -> CartResult<()> {
    let exceeds = match in_cart.checked_add(requested) {
        Some(wanted) => wanted > stock,
        None => true,
    };

    if exceeds {
        return Err(CartError::InsufficientStock {
            id: id.clone(),
            available: stock,
            in_cart,
            requested,
        });
    }

    Ok(())
}

/// Validates that a line of `quantity` at `price`, added to `rest` (the
/// total of every other row), still fits in [`Money`].
pub fn validate_amount(
    id: &Identifier,
    price: Money,
    quantity: i64,
    rest: Money,
) -> CartResult<()> {
    price
        .checked_multiply_quantity(quantity)
        .and_then(|line| rest.checked_add(line))
        .map(|_| ())
        .ok_or_else(|| CartError::AmountOverflow { id: id.clone() })
}

/// Validates a row index against the current cart length.
pub fn validate_index(index: usize, len: usize) -> CartResult<()> {
    if index >= len {
        return Err(CartError::IndexOutOfRange { index, len });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(CartError::InvalidQuantity { requested: 0 })
        );
        assert_eq!(
            validate_quantity(-1),
            Err(CartError::InvalidQuantity { requested: -1 })
        );
    }

    #[test]
    fn test_validate_stock() {
        let id = Identifier::from("A");

        assert!(validate_stock(&id, 0, 3, 3).is_ok());
        assert!(validate_stock(&id, 4, 1, 5).is_ok());

        assert!(validate_stock(&id, 0, 4, 3).is_err());
        assert!(validate_stock(&id, 4, 2, 5).is_err());
        assert!(validate_stock(&id, 0, 1, 0).is_err());
    }

    #[test]
    fn test_validate_stock_overflow_is_rejected() {
        let id = Identifier::from(1_i64);
        assert!(validate_stock(&id, i64::MAX, 1, i64::MAX).is_err());
    }

    #[test]
    fn test_validate_amount() {
        let id = Identifier::from("A");
        let huge = Money::from_cents(i64::MAX / 2 + 1);

        assert!(validate_amount(&id, Money::from_cents(1000), 3, Money::from_cents(500)).is_ok());
        assert!(validate_amount(&id, huge, 1, Money::zero()).is_ok());

        assert_eq!(
            validate_amount(&id, huge, 2, Money::zero()),
            Err(CartError::AmountOverflow { id: id.clone() })
        );
        assert!(validate_amount(&id, huge, 1, huge).is_err());
    }

    #[test]
    fn test_validate_index() {
        assert!(validate_index(0, 2).is_ok());
        assert!(validate_index(1, 2).is_ok());
        assert_eq!(
            validate_index(2, 2),
            Err(CartError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(validate_index(0, 0).is_err());
    }
}
