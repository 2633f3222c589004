//! # termomaz-core: Pure Cart Logic for the Order-Entry Screen
//!
//! This crate holds the in-memory cart of the point-of-sale order-entry
//! screen. It has zero I/O dependencies: rendering is signalled through the
//! [`CartView`] trait and submission lives in `termomaz-client`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Termomaz Order Entry Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Rendering surface (table rows + total)             │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ CartView signals                       │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │               ★ termomaz-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │ CartStore │  │   rules   │  │   │
//! │  │   │Identifier │  │  (cents)  │  │ Snapshot  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartSnapshot                           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            termomaz-client (OrderSubmitter, HTTP)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Identifier, ProductOffer, LineItem)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - `CartStore`, `CartSnapshot` and the `CartView` seam
//! - [`error`] - Cart error types
//! - [`validation`] - Quantity and stock rules
//!
//! ## Example Usage
//!
//! ```rust
//! use termomaz_core::{CartStore, Money, ProductOffer};
//!
//! let mut cart = CartStore::new();
//! let widget = ProductOffer::new("A", "Widget", Money::from_major_minor(10, 0), 5);
//!
//! cart.add_to_cart(&widget, 2).unwrap();
//! cart.add_to_cart(&widget, 2).unwrap();
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.items()[0].quantity, 4);
//! assert_eq!(cart.formatted_total(), "40.00");
//! ```

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// These allow users to do `use termomaz_core::Money` instead of
// `use termomaz_core::money::Money`
pub use cart::{CartSnapshot, CartStore, CartView, NullView};
pub use error::{CartError, CartResult};
pub use money::Money;
pub use types::*;

/// Value the per-product quantity input is reset to after a successful add.
pub const DEFAULT_INPUT_QUANTITY: i64 = 1;
