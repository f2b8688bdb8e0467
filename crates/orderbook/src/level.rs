//! Price level representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OrderBookError;

/// A single price level in the order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBookLevel {
    /// The price at this level.
    pub price: Decimal,
    /// The total amount available at this price.
    pub amount: Decimal,
}

impl OrderBookLevel {
    /// Creates a new price level.
    pub fn new(price: Decimal, amount: Decimal) -> Self {
        Self { price, amount }
    }

    /// Returns the same level quoted in the reciprocal pair.
    ///
    /// A level of `amount` A at `price` B/A becomes a level of
    /// `amount * price` B at `1 / price` A/B.
    ///
    /// # Errors
    /// `InvalidPrice` if the price is zero, `InvalidQuantity` if the
    /// converted amount does not fit in a `Decimal`.
    pub fn inverse(&self) -> Result<Self, OrderBookError> {
        let price = Decimal::ONE
            .checked_div(self.price)
            .ok_or_else(|| OrderBookError::InvalidPrice(self.price.to_string()))?;
        let amount = self
            .amount
            .checked_mul(self.price)
            .ok_or_else(|| OrderBookError::InvalidQuantity(self.amount.to_string()))?;

        Ok(Self { price, amount })
    }
}
