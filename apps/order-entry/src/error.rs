//! # App Error Type
//!
//! One error type for everything the command loop can report.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Order Screen                       │
//! │                                                                         │
//! │  stdin line ──► Command::parse ── bad syntax ──► InvalidCommand ──┐    │
//! │                      │                                            │    │
//! │                      ▼                                            │    │
//! │               OrderSession::execute                               │    │
//! │                      │                                            │    │
//! │        CartError ────┼──► InvalidQuantity / InsufficientStock ────┤    │
//! │                      │    NotFound                                │    │
//! │        SubmitError ──┼──► MissingClient / EmptyCart / InProgress ─┤    │
//! │                      │    Rejected / Network                      │    │
//! │                      ▼                                            ▼    │
//! │                   Success              "error: <message>" on stdout    │
//! │                                        loop continues                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use thiserror::Error;

use termomaz_client::{ConfigError, SubmitError};
use termomaz_core::CartError;

/// Error shown to the cashier as a single line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable category, used in logs.
    pub code: ErrorCode,

    /// Human-readable message for display.
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Line could not be parsed as a command.
    InvalidCommand,

    /// Quantity is zero or negative.
    InvalidQuantity,

    /// Not enough stock for the requested quantity.
    InsufficientStock,

    /// Row or product does not exist.
    NotFound,

    /// Line or cart total is too large to represent.
    AmountOverflow,

    /// Submit precondition failed.
    MissingClient,
    EmptyCart,
    SubmissionInProgress,

    /// Backend refused the order.
    Rejected,

    /// Backend could not be reached or answered garbage.
    Network,

    /// Client configuration is unusable.
    Config,

    /// Terminal I/O failed.
    Io,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidCommand => "INVALID_COMMAND",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::InsufficientStock => "INSUFFICIENT_STOCK",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::AmountOverflow => "AMOUNT_OVERFLOW",
            ErrorCode::MissingClient => "MISSING_CLIENT",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::SubmissionInProgress => "SUBMISSION_IN_PROGRESS",
            ErrorCode::Rejected => "REJECTED",
            ErrorCode::Network => "NETWORK_ERROR",
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Io => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates an invalid-command error.
    pub fn invalid_command(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::InvalidCommand, message)
    }
}

/// Converts cart errors to app errors.
impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code = match &err {
            CartError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CartError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CartError::ItemNotFound(_) => ErrorCode::NotFound,
            CartError::AmountOverflow { .. } => ErrorCode::AmountOverflow,
            // Rows are shown 1-based on this screen.
            CartError::IndexOutOfRange { index, len } => {
                return AppError::new(
                    ErrorCode::NotFound,
                    format!("Row {} does not exist (cart has {} rows)", index + 1, len),
                );
            }
        };
        AppError::new(code, err.to_string())
    }
}

/// Converts submission errors to app errors.
impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        let code = match &err {
            SubmitError::MissingClient => ErrorCode::MissingClient,
            SubmitError::EmptyCart => ErrorCode::EmptyCart,
            SubmitError::SubmissionInProgress => ErrorCode::SubmissionInProgress,
            SubmitError::BackendRejected(_) => ErrorCode::Rejected,
            SubmitError::NetworkError(_) => ErrorCode::Network,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Config, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Terminal I/O failed: {}", err);
        AppError::new(ErrorCode::Io, err.to_string())
    }
}
