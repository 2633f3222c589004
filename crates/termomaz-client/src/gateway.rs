//! # Order Gateway
//!
//! The seam between the submitter and the order-creation endpoint.
//!
//! ```text
//! OrderSubmitter ──► dyn OrderGateway ──┬──► HttpOrderGateway (reqwest)
//!                                        └──► test doubles
//! ```
//!
//! A gateway performs exactly one exchange per call. It never retries.

use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ConfigError, ConfigResult, SubmitError, SubmitResult};
use crate::protocol::{CreateOrderRequest, CreateOrderResponse};

/// Sends a finished cart to the backend.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Performs the order-creation exchange and returns the parsed body.
    ///
    /// Transport failures and unreadable bodies are `NetworkError`; a
    /// parsed body is returned as is, whatever it says.
    async fn create_order(&self, request: &CreateOrderRequest) -> SubmitResult<CreateOrderResponse>;
}

/// `OrderGateway` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOrderGateway {
    client: Client,
    endpoint: Url,
}

impl HttpOrderGateway {
    /// Builds a gateway for the endpoint described by `config`.
    ///
    /// A timeout is set only when `timeout_secs` is configured.
    pub fn from_config(config: &ClientConfig) -> ConfigResult<Self> {
        let endpoint = config.create_order_url()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.backend.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpOrderGateway { client, endpoint })
    }

    /// Builds a gateway with an existing client and endpoint URL.
    pub fn new(client: Client, endpoint: Url) -> Self {
        HttpOrderGateway { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn create_order(&self, request: &CreateOrderRequest) -> SubmitResult<CreateOrderResponse> {
        debug!(endpoint = %self.endpoint, items = request.items.len(), "POST create_order");

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(endpoint = %self.endpoint, error = %e, "order request failed");
                SubmitError::from(e)
            })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("json"));
        debug!(%status, ?is_json, "create_order responded");

        // Status is not checked; the body decides the outcome.
        let bytes = response.bytes().await.map_err(|e| {
            error!(endpoint = %self.endpoint, %status, error = %e, "reading order response failed");
            SubmitError::from(e)
        })?;

        serde_json::from_slice::<CreateOrderResponse>(&bytes).map_err(|e| {
            error!(
                endpoint = %self.endpoint,
                %status,
                body_len = bytes.len(),
                error = %e,
                "order response is not JSON"
            );
            SubmitError::NetworkError(format!(
                "unreadable response (HTTP {}): {}",
                status.as_u16(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use termomaz_core::{CartStore, Identifier, Money, ProductOffer};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn gateway_for(server: &MockServer) -> HttpOrderGateway {
        let mut config = ClientConfig::default();
        config.backend.base_url = server.uri();
        HttpOrderGateway::from_config(&config).unwrap()
    }

    fn sample_request() -> CreateOrderRequest {
        let mut cart = CartStore::new();
        cart.add_to_cart(&ProductOffer::new(1_i64, "Termo", Money::from_cents(25000), 10), 2)
            .unwrap();
        CreateOrderRequest::new(Identifier::from("C1"), &cart.snapshot())
    }

    #[test]
    fn test_endpoint_from_config() {
        let gateway = HttpOrderGateway::from_config(&ClientConfig::default()).unwrap();
        assert_eq!(
            gateway.endpoint().as_str(),
            "http://127.0.0.1:5000/pos/create_order"
        );
    }

    #[tokio::test]
    async fn test_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pos/create_order"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "client_id": "C1",
                "items": [{ "id": 1, "name": "Termo", "price": 250.0, "quantity": 2 }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "order_id": "O9" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let response = gateway_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap();

        assert_eq!(response, CreateOrderResponse::accepted("O9"));
    }

    #[tokio::test]
    async fn test_error_status_with_json_body_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/pos/create_order"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "success": false, "message": "Sin stock" })),
            )
            .mount(&server)
            .await;

        let response = gateway_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap();

        assert_eq!(response, CreateOrderResponse::rejected("Sin stock"));
    }

    #[tokio::test]
    async fn test_html_body_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"),
            )
            .mount(&server)
            .await;

        let err = gateway_for(&server)
            .create_order(&sample_request())
            .await
            .unwrap_err();

        assert!(err.is_network_error());
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let mut config = ClientConfig::default();
        config.backend.base_url = format!("http://127.0.0.1:{}", port);
        let gateway = HttpOrderGateway::from_config(&config).unwrap();

        let err = gateway.create_order(&sample_request()).await.unwrap_err();
        assert!(err.is_network_error());
    }

    #[tokio::test]
    async fn test_configured_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "order_id": 1 }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let mut config = ClientConfig::default();
        config.backend.base_url = server.uri();
        config.backend.timeout_secs = Some(1);
        let gateway = HttpOrderGateway::from_config(&config).unwrap();

        let err = gateway.create_order(&sample_request()).await.unwrap_err();
        assert!(err.is_network_error());
    }
}
