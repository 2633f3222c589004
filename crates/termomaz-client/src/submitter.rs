//! # Order Submitter
//!
//! Turns the cart on screen into a created order.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_order(client_id, &cart)                                         │
//! │       │                                                                 │
//! │       ├── cart.snapshot()            (synchronous, before any await)   │
//! │       ▼                                                                 │
//! │  client_id blank? ──────────────────► MissingClient     (no network)   │
//! │       │                                                                 │
//! │  snapshot empty? ───────────────────► EmptyCart         (no network)   │
//! │       │                                                                 │
//! │  another submit in flight? ─────────► SubmissionInProgress             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  gateway.create_order(request) ─────► NetworkError                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  success truthy? ── no ─────────────► BackendRejected(message)         │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  OrderConfirmation { order_id }                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One call, one request. Nothing is retried.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

use termomaz_core::{CartSnapshot, CartStore, Identifier};

use crate::error::{SubmitError, SubmitResult};
use crate::gateway::OrderGateway;
use crate::protocol::{CreateOrderRequest, OrderConfirmation};

/// Submits carts through an [`OrderGateway`].
///
/// Holds a submission-in-progress flag: while one submission is awaiting
/// the backend, further submissions through the same submitter fail fast
/// with `SubmissionInProgress`.
pub struct OrderSubmitter<G: OrderGateway> {
    gateway: G,
    in_flight: AtomicBool,
}

impl<G: OrderGateway> OrderSubmitter<G> {
    pub fn new(gateway: G) -> Self {
        OrderSubmitter {
            gateway,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// True while a submission is awaiting the backend.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the cart for `client_id`.
    ///
    /// The cart is copied before this returns, so the returned future does
    /// not borrow it: the screen may keep editing the cart while the
    /// request is in flight, and those edits are not part of this order.
    pub fn submit_order(
        &self,
        client_id: &str,
        cart: &CartStore,
    ) -> impl Future<Output = SubmitResult<OrderConfirmation>> + Send + '_ {
        let snapshot = cart.snapshot();
        let client_id = client_id.to_string();
        async move { self.submit_snapshot(&client_id, snapshot).await }
    }

    /// Submits an already captured snapshot for `client_id`.
    pub async fn submit_snapshot(
        &self,
        client_id: &str,
        snapshot: CartSnapshot,
    ) -> SubmitResult<OrderConfirmation> {
        let client_id = client_id.trim();
        if client_id.is_empty() {
            return Err(SubmitError::MissingClient);
        }
        if snapshot.is_empty() {
            return Err(SubmitError::EmptyCart);
        }

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        let request = CreateOrderRequest::new(Identifier::from_input(client_id), &snapshot);
        let span = tracing::info_span!(
            "submit_order",
            submission_id = %Uuid::new_v4(),
            client_id = %request.client_id,
            gateway = self.gateway.name(),
        );

        async move {
            info!(
                items = request.items.len(),
                total = %snapshot.total(),
                "Submitting order"
            );

            let response = self.gateway.create_order(&request).await.map_err(|e| {
                error!(error = %e, "Order submission failed");
                e
            })?;

            match response.into_outcome() {
                Ok(confirmation) => {
                    info!(order_id = %confirmation.order_id, "Order created");
                    Ok(confirmation)
                }
                Err(SubmitError::BackendRejected(message)) => {
                    warn!(message = %message, "Order rejected by backend");
                    Err(SubmitError::BackendRejected(message))
                }
                Err(e) => {
                    error!(error = %e, "Order response malformed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Holds the in-flight flag for the duration of one submission.
///
/// Released on drop, which also covers a future dropped mid-request.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> SubmitResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitError::SubmissionInProgress)?;
        Ok(InFlightGuard { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
