//! # Cart Store
//!
//! Owns the shopping cart of one order-entry session.
//!
//! ## Ownership
//! There is no process-wide cart. Each screen constructs its own
//! `CartStore`, injects the rendering collaborator through [`CartView`], and
//! hands `&CartStore` to the order submitter when the cashier submits.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Screen Action            CartStore                State Change         │
//! │  ─────────────            ─────────                ────────────         │
//! │                                                                         │
//! │  Click Add ──────────────► add_to_cart() ────────► push / qty += n     │
//! │                                 │                                       │
//! │                                 └──► render + reset qty input to 1     │
//! │                                                                         │
//! │  Click Remove (row) ─────► remove_from_cart(i) ──► items.remove(i)     │
//! │                                                                         │
//! │  Remove by product ──────► remove_by_id(id) ─────► items.remove(pos)   │
//! │                                                                         │
//! │  Submit ─────────────────► snapshot() ───────────► (read only copy)    │
//! │                                                                         │
//! │  NOTE: Only successful mutations signal the view. A rejected           │
//! │        operation leaves items and view untouched.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::Money;
use crate::types::{Identifier, LineItem, ProductOffer};
use crate::validation::{validate_amount, validate_index, validate_quantity, validate_stock};
use crate::DEFAULT_INPUT_QUANTITY;

// =============================================================================
// Rendering Seam
// =============================================================================

/// The rendering collaborator the cart pushes its state into.
///
/// Implementations draw rows (each with a remove action), show the total
/// and own the per-product quantity inputs.
pub trait CartView {
    /// Redraws every row, in cart order.
    fn render_items(&mut self, items: &[LineItem]);

    /// Shows the total, already formatted with two fraction digits.
    fn render_total(&mut self, total: &str);

    /// Puts the quantity input of `product` back to `quantity`, which is
    /// always [`DEFAULT_INPUT_QUANTITY`](crate::DEFAULT_INPUT_QUANTITY).
    fn reset_quantity_input(&mut self, product: &Identifier, quantity: i64);
}

/// View that draws nothing. Used by headless carts and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl CartView for NullView {
    fn render_items(&mut self, _items: &[LineItem]) {}

    fn render_total(&mut self, _total: &str) {}

    fn reset_quantity_input(&mut self, _product: &Identifier, _quantity: i64) {}
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every quantity is >= 1
/// - No quantity exceeds the stock supplied by the add that produced it
/// - Insertion order is display order
pub struct CartStore {
    items: Vec<LineItem>,
    view: Box<dyn CartView + Send>,
}

impl CartStore {
    /// Creates an empty cart with no rendering surface.
    pub fn new() -> Self {
        CartStore::with_view(NullView)
    }

    /// Creates an empty cart that signals `view` on every mutation.
    pub fn with_view(view: impl CartView + Send + 'static) -> Self {
        CartStore {
            items: Vec::new(),
            view: Box::new(view),
        }
    }

    /// Adds `quantity` units of a product, merging with an existing row.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: `InvalidQuantity`
    /// - `quantity > offer.stock`: `InsufficientStock`
    /// - Product already in cart: `InsufficientStock` if the merged quantity
    ///   would exceed `offer.stock`, otherwise the quantity is increased
    /// - Product not in cart: appended as a new row
    /// - Line or cart total past the range of `Money`: `AmountOverflow`
    ///
    /// On success the view is re-rendered and the product's quantity input
    /// is reset.
    pub fn add_to_cart(&mut self, offer: &ProductOffer, quantity: i64) -> CartResult<()> {
        debug!(product_id = %offer.id, quantity, stock = offer.stock, "add_to_cart");

        validate_quantity(quantity)?;

        match self.position(&offer.id) {
            Some(pos) => {
                let in_cart = self.items[pos].quantity;
                validate_stock(&offer.id, in_cart, quantity, offer.stock)?;
                // Merged rows keep their frozen price.
                validate_amount(
                    &offer.id,
                    self.items[pos].price,
                    in_cart + quantity,
                    self.total_without(pos),
                )?;
                self.items[pos].quantity += quantity;
            }
            None => {
                validate_stock(&offer.id, 0, quantity, offer.stock)?;
                validate_amount(&offer.id, offer.price, quantity, self.total())?;
                self.items.push(LineItem::from_offer(offer, quantity));
            }
        }

        self.render();
        self.view
            .reset_quantity_input(&offer.id, DEFAULT_INPUT_QUANTITY);
        Ok(())
    }

    /// Removes the row at `index` (0-based), shifting later rows up.
    ///
    /// Rows are positional: an index read from a stale rendering may point
    /// at a different product. Prefer [`CartStore::remove_by_id`] when the
    /// caller knows the product.
    pub fn remove_from_cart(&mut self, index: usize) -> CartResult<LineItem> {
        debug!(index, len = self.items.len(), "remove_from_cart");

        validate_index(index, self.items.len())?;
        let removed = self.items.remove(index);

        self.render();
        Ok(removed)
    }

    /// Removes the row holding `id`.
    pub fn remove_by_id(&mut self, id: &Identifier) -> CartResult<LineItem> {
        debug!(product_id = %id, "remove_by_id");

        let pos = self
            .position(id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
        let removed = self.items.remove(pos);

        self.render();
        Ok(removed)
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        debug!(len = self.items.len(), "clear_cart");
        self.items.clear();
        self.render();
    }

    /// Sum of `price × quantity` over every row, recomputed on each call.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The total as shown on the total display, e.g. `"35.00"`.
    pub fn formatted_total(&self) -> String {
        self.total().to_string()
    }

    /// Read-only view of the rows, in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up the row for a product.
    pub fn item(&self, id: &Identifier) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all rows.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Copies the current contents into an immutable snapshot.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            taken_at: Utc::now(),
        }
    }

    /// Pushes rows and total to the view.
    ///
    /// Called after every successful mutation; screens also call it once
    /// after construction to draw the empty cart.
    pub fn render(&mut self) {
        let total = self.formatted_total();
        self.view.render_items(&self.items);
        self.view.render_total(&total);
    }

    fn total_without(&self, skip: usize) -> Money {
        self.items
            .iter()
            .enumerate()
            .filter(|(pos, _)| *pos != skip)
            .map(|(_, item)| item.line_total())
            .sum()
    }

    fn position(&self, id: &Identifier) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Cart Snapshot
// =============================================================================

/// Frozen copy of the cart taken when an order is submitted.
///
/// Later changes to the live cart never reach a snapshot, so the request
/// body always matches what the cashier saw at click time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    items: Vec<LineItem>,

    #[ts(as = "String")]
    taken_at: DateTime<Utc>,
}

impl CartSnapshot {
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<LineItem>> for CartSnapshot {
    fn from(items: Vec<LineItem>) -> Self {
        CartSnapshot {
            items,
            taken_at: Utc::now(),
        }
    }
}
