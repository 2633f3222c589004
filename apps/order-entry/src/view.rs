//! # Table View
//!
//! Draws the cart as a text table.
//!
//! ```text
//!    #  ID          NAME                        PRICE   QTY     SUBTOTAL
//!    1  1           Termo Acero 500ml          250.00     2       500.00
//!    2  B-7         Caja                        10.50     1        10.50
//!   TOTAL: 510.50
//! ```

use std::io::{self, Write};
use tracing::{debug, warn};

use termomaz_core::{CartView, Identifier, LineItem};

/// `CartView` that writes to any `Write` sink, normally stdout.
pub struct TableView<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TableView<W> {
    pub fn new(out: W) -> Self {
        TableView { out }
    }

    fn draw(&mut self, f: impl FnOnce(&mut W) -> io::Result<()>) {
        if let Err(e) = f(&mut self.out).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to draw cart");
        }
    }
}

impl<W: Write + Send> CartView for TableView<W> {
    fn render_items(&mut self, items: &[LineItem]) {
        self.draw(|out| {
            if items.is_empty() {
                return writeln!(out, "  (cart is empty)");
            }

            writeln!(
                out,
                "  {:>3}  {:<10}  {:<24}  {:>8}  {:>4}  {:>11}",
                "#", "ID", "NAME", "PRICE", "QTY", "SUBTOTAL"
            )?;
            for (row, item) in items.iter().enumerate() {
                writeln!(
                    out,
                    "  {:>3}  {:<10}  {:<24}  {:>8}  {:>4}  {:>11}",
                    row + 1,
                    item.id.to_string(),
                    item.name,
                    item.price.to_string(),
                    item.quantity,
                    item.line_total().to_string()
                )?;
            }
            Ok(())
        });
    }

    fn render_total(&mut self, total: &str) {
        self.draw(|out| writeln!(out, "  TOTAL: {}", total));
    }

    fn reset_quantity_input(&mut self, product: &Identifier, quantity: i64) {
        // Quantities are typed per command here, so there is no input to reset.
        debug!(product_id = %product, quantity, "Quantity input reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use termomaz_core::{CartStore, Money, ProductOffer};

    /// Write sink the test can read back after handing it to the cart.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_draws_rows_and_total() {
        let buffer = SharedBuffer::default();
        let mut cart = CartStore::with_view(TableView::new(buffer.clone()));

        cart.add_to_cart(
            &ProductOffer::new(1_i64, "Termo Acero 500ml", Money::from_cents(25000), 100),
            2,
        )
        .unwrap();

        let drawn = buffer.contents();
        assert!(drawn.contains("Termo Acero 500ml"));
        assert!(drawn.contains("500.00"));
        assert!(drawn.contains("TOTAL: 500.00"));
    }

    #[test]
    fn test_draws_empty_cart() {
        let buffer = SharedBuffer::default();
        let mut cart = CartStore::with_view(TableView::new(buffer.clone()));

        cart.render();

        let drawn = buffer.contents();
        assert!(drawn.contains("(cart is empty)"));
        assert!(drawn.contains("TOTAL: 0.00"));
    }
}
