//! # Order-Creation Protocol
//!
//! JSON bodies exchanged with `POST /pos/create_order`.
//!
//! ## Message Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Screen                                  Backend                        │
//! │    │                                        │                           │
//! │    │── POST /pos/create_order ─────────────►│                           │
//! │    │   { "client_id": 3,                    │                           │
//! │    │     "items": [ { "id": 1,              │                           │
//! │    │                  "name": "Termo 500ml",│                           │
//! │    │                  "price": 250.0,       │                           │
//! │    │                  "quantity": 2 } ] }   │                           │
//! │    │                                        │                           │
//! │    │◄── { "success": true, "order_id": 41 } │                           │
//! │    │    { "success": false, "message": ".."}│                           │
//! │    │                                        │                           │
//! │    └── navigate to /orders/41               │                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use termomaz_core::{CartSnapshot, Identifier, LineItem};

use crate::config::ORDER_ID_PLACEHOLDER;
use crate::error::{SubmitError, SubmitResult};

// =============================================================================
// Request
// =============================================================================

/// Body of the order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub client_id: Identifier,
    pub items: Vec<OrderLine>,
}

/// One row of the request. `price` is a decimal number in major units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Identifier,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl From<&LineItem> for OrderLine {
    fn from(item: &LineItem) -> Self {
        OrderLine {
            id: item.id.clone(),
            name: item.name.clone(),
            price: item.price.to_major_f64(),
            quantity: item.quantity,
        }
    }
}

impl CreateOrderRequest {
    pub fn new(client_id: Identifier, snapshot: &CartSnapshot) -> Self {
        CreateOrderRequest {
            client_id,
            items: snapshot.items().iter().map(OrderLine::from).collect(),
        }
    }
}

// =============================================================================
// Response
// =============================================================================

/// Body of the order-creation response, read loosely.
///
/// `success` is kept as raw JSON because the backend is not strict about
/// its type; see [`is_truthy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub success: Value,

    #[serde(default)]
    pub order_id: Option<Identifier>,

    #[serde(default)]
    pub message: Option<String>,
}

impl CreateOrderResponse {
    /// Accepted order.
    pub fn accepted(order_id: impl Into<Identifier>) -> Self {
        CreateOrderResponse {
            success: Value::Bool(true),
            order_id: Some(order_id.into()),
            message: None,
        }
    }

    /// Refused order.
    pub fn rejected(message: impl Into<String>) -> Self {
        CreateOrderResponse {
            success: Value::Bool(false),
            order_id: None,
            message: Some(message.into()),
        }
    }

    /// Turns the body into the submission outcome.
    ///
    /// - truthy `success` with an `order_id` → confirmation
    /// - truthy `success` without one → `NetworkError` (malformed reply)
    /// - falsy `success` → `BackendRejected(message)`
    pub fn into_outcome(self) -> SubmitResult<OrderConfirmation> {
        if !is_truthy(&self.success) {
            let message = self
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "the order service did not say why".to_string());
            return Err(SubmitError::BackendRejected(message));
        }

        match self.order_id {
            Some(order_id) => Ok(OrderConfirmation { order_id }),
            None => Err(SubmitError::NetworkError(
                "response reports success but carries no order_id".to_string(),
            )),
        }
    }
}

/// Loose truthiness: `false`, `null`, `0` and `""` are false.
///
/// Arrays and objects are true even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// A created order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: Identifier,
}

impl OrderConfirmation {
    /// Default navigation target, `/orders/<order_id>`.
    pub fn detail_path(&self) -> String {
        self.detail_path_with(&format!("/orders/{}", ORDER_ID_PLACEHOLDER))
    }

    /// Navigation target built from a configured template.
    pub fn detail_path_with(&self, template: &str) -> String {
        template.replace(ORDER_ID_PLACEHOLDER, &self.order_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use termomaz_core::{CartStore, Money, ProductOffer};

    #[test]
    fn test_request_body_shape() {
        let mut cart = CartStore::new();
        cart.add_to_cart(
            &ProductOffer::new(1_i64, "Termo Acero 500ml", Money::from_cents(25000), 100),
            2,
        )
        .unwrap();
        cart.add_to_cart(
            &ProductOffer::new("B-7", "Caja", Money::from_cents(1050), 10),
            1,
        )
        .unwrap();

        let request = CreateOrderRequest::new(Identifier::from("C1"), &cart.snapshot());

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "client_id": "C1",
                "items": [
                    { "id": 1, "name": "Termo Acero 500ml", "price": 250.0, "quantity": 2 },
                    { "id": "B-7", "name": "Caja", "price": 10.5, "quantity": 1 }
                ]
            })
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("yes")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));

        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn test_success_outcome() {
        let response: CreateOrderResponse =
            serde_json::from_value(json!({ "success": true, "order_id": "O9" })).unwrap();

        let confirmation = response.into_outcome().unwrap();
        assert_eq!(confirmation.order_id, Identifier::from("O9"));
        assert_eq!(confirmation.detail_path(), "/orders/O9");
    }

    #[test]
    fn test_rejection_outcome() {
        let response: CreateOrderResponse =
            serde_json::from_value(json!({ "success": false, "message": "x" })).unwrap();

        assert_eq!(
            response.into_outcome(),
            Err(SubmitError::BackendRejected("x".to_string()))
        );
    }

    #[test]
    fn test_missing_success_is_rejection() {
        let response: CreateOrderResponse =
            serde_json::from_value(json!({ "message": "Cliente no encontrado" })).unwrap();

        assert_eq!(
            response.into_outcome(),
            Err(SubmitError::BackendRejected("Cliente no encontrado".to_string()))
        );
    }

    #[test]
    fn test_rejection_without_message() {
        let outcome = CreateOrderResponse {
            success: json!(0),
            ..Default::default()
        }
        .into_outcome();

        assert!(matches!(outcome, Err(SubmitError::BackendRejected(m)) if !m.is_empty()));
    }

    #[test]
    fn test_success_without_order_id_is_malformed() {
        let outcome = CreateOrderResponse {
            success: json!(true),
            ..Default::default()
        }
        .into_outcome();

        assert!(matches!(outcome, Err(SubmitError::NetworkError(_))));
    }

    #[test]
    fn test_detail_path_template() {
        let confirmation = OrderConfirmation {
            order_id: Identifier::from(41_i64),
        };
        assert_eq!(confirmation.detail_path(), "/orders/41");
        assert_eq!(
            confirmation.detail_path_with("/pedidos/{order_id}/ver"),
            "/pedidos/41/ver"
        );
    }
}
