//! In-memory [`OrderGateway`] for tests and offline runs.
//!
//! Replies with a canned outcome and records every request it receives.
//! [`MockGateway::hold`] parks each call until the returned `Notify` is
//! signalled, which lets tests observe a submission while it is in flight.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use termomaz_core::Identifier;

use crate::error::{SubmitError, SubmitResult};
use crate::gateway::OrderGateway;
use crate::protocol::{CreateOrderRequest, CreateOrderResponse};

pub struct MockGateway {
    outcome: SubmitResult<CreateOrderResponse>,
    requests: Mutex<Vec<CreateOrderRequest>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockGateway {
    /// Replies with the given body.
    pub fn replying(response: CreateOrderResponse) -> Self {
        Self::with_outcome(Ok(response))
    }

    /// Accepts every order under `order_id`.
    pub fn accepting(order_id: impl Into<Identifier>) -> Self {
        Self::replying(CreateOrderResponse::accepted(order_id))
    }

    /// Fails every exchange with `error`.
    pub fn failing(error: SubmitError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: SubmitResult<CreateOrderResponse>) -> Self {
        MockGateway {
            outcome,
            requests: Mutex::new(Vec::new()),
            gate: Mutex::new(None),
        }
    }

    /// Parks subsequent calls until the returned handle is notified.
    ///
    /// Each `notify_one` releases one call.
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        if let Ok(mut gate) = self.gate.lock() {
            *gate = Some(Arc::clone(&notify));
        }
        notify
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<CreateOrderRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> SubmitResult<CreateOrderResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        let gate = self.gate.lock().ok().and_then(|gate| gate.clone());
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termomaz_core::{CartSnapshot, LineItem, Money, ProductOffer};

    fn request() -> CreateOrderRequest {
        let offer = ProductOffer::new("A", "Widget", Money::from_cents(500), 3);
        let snapshot = CartSnapshot::from(vec![LineItem::from_offer(&offer, 1)]);
        CreateOrderRequest::new(Identifier::from("C1"), &snapshot)
    }

    #[tokio::test]
    async fn test_records_requests_in_order() {
        let gateway = MockGateway::accepting(5_i64);

        gateway.create_order(&request()).await.unwrap();
        gateway.create_order(&request()).await.unwrap();

        assert_eq!(gateway.requests().len(), 2);
        assert_eq!(gateway.requests()[0], request());
    }

    #[tokio::test]
    async fn test_failing_gateway_still_records() {
        let gateway = MockGateway::failing(SubmitError::NetworkError("down".into()));

        let err = gateway.create_order(&request()).await.unwrap_err();

        assert_eq!(err, SubmitError::NetworkError("down".into()));
        assert_eq!(gateway.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_held_call_waits_for_release() {
        let gateway = MockGateway::accepting("O1");
        let release = gateway.hold();
        release.notify_one();

        let response = gateway.create_order(&request()).await.unwrap();

        assert_eq!(response, CreateOrderResponse::accepted("O1"));
    }
}
