//! # Client Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Preconditions  │  │    Backend      │  │      Transport          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  MissingClient  │  │ BackendRejected │  │  NetworkError           │ │
//! │  │  EmptyCart      │  │                 │  │  (connect, timeout,     │ │
//! │  │  InProgress     │  │                 │  │   non-JSON body)        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  ConfigError: InvalidConfig, InvalidUrl, LoadFailed             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Precondition failures never reach the network. None of these errors is
//! fatal: the screen shows the message and the cart stays as it was.

use thiserror::Error;

/// Result type alias for order submission.
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why an order was not created.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No client was selected.
    #[error("Select a client before submitting the order")]
    MissingClient,

    /// Nothing to order.
    #[error("The cart is empty")]
    EmptyCart,

    /// Another submission from this screen has not finished yet.
    #[error("An order is already being submitted")]
    SubmissionInProgress,

    /// The backend answered and refused the order.
    #[error("Order rejected: {0}")]
    BackendRejected(String),

    /// The exchange itself failed: connection, timeout, or an unreadable
    /// response body.
    #[error("Could not reach the order service: {0}")]
    NetworkError(String),
}

impl SubmitError {
    /// True for errors the cashier can fix on screen.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SubmitError::MissingClient | SubmitError::EmptyCart | SubmitError::SubmissionInProgress
        )
    }

    /// True for transport failures, which operators should see in the logs.
    pub fn is_network_error(&self) -> bool {
        matches!(self, SubmitError::NetworkError(_))
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SubmitError::NetworkError(format!("request timed out: {}", err))
        } else if err.is_decode() {
            SubmitError::NetworkError(format!("response is not valid JSON: {}", err))
        } else {
            SubmitError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        SubmitError::NetworkError(format!("response is not valid JSON: {}", err))
    }
}

/// Configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Backend URL does not parse or has the wrong scheme.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Config file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<url::ParseError> for ConfigError {
    fn from(err: url::ParseError) -> Self {
        ConfigError::InvalidUrl(err.to_string())
    }
}
