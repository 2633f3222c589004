//! # termomaz-client: Order Submission
//!
//! Sends the cart of an order-entry session to the backend and reports how
//! it went.
//!
//! ## Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &CartStore ──► OrderSubmitter ──► OrderGateway ──► POST create_order  │
//! │                 (submitter.rs)     (gateway.rs)                         │
//! │                      │                  │                               │
//! │                      │                  └── CreateOrderRequest /        │
//! │                      │                      CreateOrderResponse         │
//! │                      │                      (protocol.rs)               │
//! │                      ▼                                                  │
//! │           OrderConfirmation ──► detail path ──► navigate               │
//! │                                                                         │
//! │  ClientConfig (config.rs): backend URL, paths, timeout                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use termomaz_client::{ClientConfig, HttpOrderGateway, OrderSubmitter};
//! use termomaz_core::{CartStore, Money, ProductOffer};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load_or_default(None);
//! let submitter = OrderSubmitter::new(HttpOrderGateway::from_config(&config)?);
//!
//! let mut cart = CartStore::new();
//! cart.add_to_cart(&ProductOffer::new(1_i64, "Termo", Money::from_cents(25000), 10), 2)?;
//!
//! let confirmation = submitter.submit_order("3", &cart).await?;
//! println!("{}", confirmation.detail_path_with(&config.navigation.order_detail_path));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod protocol;
pub mod submitter;

pub use config::ClientConfig;
pub use error::{ConfigError, ConfigResult, SubmitError, SubmitResult};
pub use gateway::{HttpOrderGateway, OrderGateway};
pub use protocol::{CreateOrderRequest, CreateOrderResponse, OrderConfirmation};
pub use submitter::OrderSubmitter;
