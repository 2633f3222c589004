//! # Order Session
//!
//! State of one order-entry screen: its cart, the selected client, and the
//! submitter that turns the two into an order.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────┐  add / remove  ┌──────────┐  submit   ┌──────────────┐   │
//! │  │  Empty   │───────────────►│ In Cart  │──────────►│ Order created│   │
//! │  │  Cart    │◄───────────────│          │           │ detail path  │   │
//! │  └──────────┘  clear         └──────────┘           └──────┬───────┘   │
//! │       ▲                           │ rejected / network     │           │
//! │       │                           └──► message, cart kept  │           │
//! │       └────────────────────────────────────────────────────┘           │
//! │                          cart cleared for the next order                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use tracing::{debug, info};

use termomaz_client::{OrderGateway, OrderSubmitter};
use termomaz_core::CartStore;

use crate::commands::{Command, HELP};
use crate::error::AppError;

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct OrderSession<G: OrderGateway> {
    cart: CartStore,
    client: Option<String>,
    submitter: OrderSubmitter<G>,
    detail_template: String,
}

impl<G: OrderGateway> OrderSession<G> {
    /// `detail_template` is the order-detail path with `{order_id}` in it.
    pub fn new(
        cart: CartStore,
        submitter: OrderSubmitter<G>,
        detail_template: impl Into<String>,
    ) -> Self {
        OrderSession {
            cart,
            client: None,
            submitter,
            detail_template: detail_template.into(),
        }
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn client(&self) -> Option<&str> {
        self.client.as_deref()
    }

    pub fn submitter(&self) -> &OrderSubmitter<G> {
        &self.submitter
    }

    /// Runs one command. Messages that are not part of the cart table go
    /// to `out`.
    pub async fn execute<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<Flow, AppError> {
        debug!(?command, "execute");

        match command {
            Command::Add { offer, quantity } => {
                self.cart.add_to_cart(&offer, quantity)?;
            }
            Command::RemoveRow(row) => {
                let removed = self.cart.remove_from_cart(row.saturating_sub(1))?;
                writeln!(out, "Removed {}", removed.name)?;
            }
            Command::RemoveId(id) => {
                let removed = self.cart.remove_by_id(&id)?;
                writeln!(out, "Removed {}", removed.name)?;
            }
            Command::Client(id) => {
                writeln!(out, "Client: {}", id)?;
                self.client = Some(id);
            }
            Command::Total => {
                writeln!(out, "TOTAL: {}", self.cart.formatted_total())?;
            }
            Command::Show => self.cart.render(),
            Command::Clear => self.cart.clear(),
            Command::Submit => self.submit(out).await?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    async fn submit<W: Write>(&mut self, out: &mut W) -> Result<(), AppError> {
        let client = self.client.clone().unwrap_or_default();

        let confirmation = self.submitter.submit_order(&client, &self.cart).await?;

        let path = confirmation.detail_path_with(&self.detail_template);
        info!(order_id = %confirmation.order_id, %path, "Navigating to order detail");
        writeln!(out, "Order {} created. Details: {}", confirmation.order_id, path)?;

        self.cart.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use termomaz_client::mock::MockGateway;
    use termomaz_client::{CreateOrderResponse, SubmitError};
    use termomaz_core::Identifier;

    fn session(gateway: MockGateway) -> OrderSession<MockGateway> {
        OrderSession::new(
            CartStore::new(),
            OrderSubmitter::new(gateway),
            "/orders/{order_id}",
        )
    }

    async fn run(
        session: &mut OrderSession<MockGateway>,
        line: &str,
    ) -> (Result<Flow, AppError>, String) {
        let mut out = Vec::new();
        let command = Command::parse(line).unwrap().unwrap();
        let result = session.execute(command, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_add_and_total() {
        let mut s = session(MockGateway::accepting("O9"));

        run(&mut s, "add A 10.00 5 2 Widget").await.0.unwrap();
        run(&mut s, "add B 5.00 5 3 Gadget").await.0.unwrap();
        let (_, out) = run(&mut s, "total").await;

        assert_eq!(out.trim(), "TOTAL: 35.00");
    }

    #[tokio::test]
    async fn test_rejected_add_keeps_cart() {
        let mut s = session(MockGateway::accepting("O9"));
        run(&mut s, "add A 10.00 5 4 Widget").await.0.unwrap();

        let err = run(&mut s, "add A 10.00 5 2 Widget").await.0.unwrap_err();

        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(s.cart().items()[0].quantity, 4);
    }

    #[tokio::test]
    async fn test_oversized_amount_is_rejected() {
        let mut s = session(MockGateway::accepting("O9"));

        let err = run(&mut s, "add A 92233720368547758.07 10 2 X")
            .await
            .0
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AmountOverflow);
        assert!(s.cart().is_empty());

        let (_, out) = run(&mut s, "total").await;
        assert_eq!(out.trim(), "TOTAL: 0.00");
    }

    #[tokio::test]
    async fn test_remove_by_row_is_one_based() {
        let mut s = session(MockGateway::accepting("O9"));
        run(&mut s, "add A 1 9 1 Widget").await.0.unwrap();
        run(&mut s, "add B 1 9 1 Gadget").await.0.unwrap();

        let (result, out) = run(&mut s, "remove 1").await;
        result.unwrap();

        assert_eq!(out.trim(), "Removed Widget");
        assert_eq!(s.cart().items()[0].id, Identifier::from("B"));

        let err = run(&mut s, "remove 5").await.0.unwrap_err();
        assert_eq!(err.to_string(), "Row 5 does not exist (cart has 1 rows)");
    }

    #[tokio::test]
    async fn test_submit_without_client() {
        let mut s = session(MockGateway::accepting("O9"));
        run(&mut s, "add A 10 5 1 Widget").await.0.unwrap();

        let err = run(&mut s, "submit").await.0.unwrap_err();

        assert_eq!(err.code, ErrorCode::MissingClient);
        assert!(s.submitter().gateway().requests().is_empty());
        assert_eq!(s.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_success_clears_cart() {
        let mut s = session(MockGateway::accepting(41_i64));
        run(&mut s, "client 3").await.0.unwrap();
        run(&mut s, "add 1 250 100 2 Termo").await.0.unwrap();

        let (result, out) = run(&mut s, "submit").await;
        result.unwrap();

        assert_eq!(out.trim(), "Order 41 created. Details: /orders/41");
        assert!(s.cart().is_empty());

        let requests = s.submitter().gateway().requests();
        assert_eq!(requests[0].client_id, Identifier::Number(3));
        assert_eq!(requests[0].items[0].price, 250.0);
    }

    #[tokio::test]
    async fn test_submit_rejection_keeps_cart() {
        let mut s = session(MockGateway::replying(CreateOrderResponse::rejected(
            "Cliente inactivo",
        )));
        run(&mut s, "client 3").await.0.unwrap();
        run(&mut s, "add A 10 5 1 Widget").await.0.unwrap();

        let err = run(&mut s, "submit").await.0.unwrap_err();

        assert_eq!(err.to_string(), "Order rejected: Cliente inactivo");
        assert_eq!(s.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_network_failure() {
        let mut s = session(MockGateway::failing(SubmitError::NetworkError(
            "connection refused".into(),
        )));
        run(&mut s, "client 3").await.0.unwrap();
        run(&mut s, "add A 10 5 1 Widget").await.0.unwrap();

        let err = run(&mut s, "submit").await.0.unwrap_err();

        assert_eq!(err.code, ErrorCode::Network);
        assert_eq!(s.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_quit() {
        let mut s = session(MockGateway::accepting("O9"));
        assert_eq!(run(&mut s, "quit").await.0.unwrap(), Flow::Quit);
    }
}
