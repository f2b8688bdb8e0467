//! Order book error types.

use thiserror::Error;

/// Errors that can occur during order book operations.
#[derive(Debug, Error, PartialEq)]
pub enum OrderBookError {
    /// Price cannot be inverted (zero).
    #[error("invalid price: {0}")]
    InvalidPrice(String),

    /// Amount overflowed while converting.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),
}
