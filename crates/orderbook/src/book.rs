//! Order book snapshot as returned by the exchange.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::OrderBookError;
use crate::level::OrderBookLevel;

/// Snapshot of bids and asks.
///
/// Levels keep the order in which the exchange sent them, which by
/// convention is best price first on both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBook {
    pub bids: Vec<OrderBookLevel>,
    pub asks: Vec<OrderBookLevel>,
}

impl OrderBook {
    /// Creates a book from bid and ask levels.
    pub fn new(bids: Vec<OrderBookLevel>, asks: Vec<OrderBookLevel>) -> Self {
        Self { bids, asks }
    }

    /// Returns the book for the reciprocal pair.
    ///
    /// Asks of A/B are bids of B/A and vice versa, so the sides swap and
    /// every level is inverted. Level order within each side is kept.
    pub fn inverse(&self) -> Result<Self, OrderBookError> {
        let bids = self
            .asks
            .iter()
            .map(OrderBookLevel::inverse)
            .collect::<Result<Vec<_>, _>>()?;
        let asks = self
            .bids
            .iter()
            .map(OrderBookLevel::inverse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { bids, asks })
    }

    /// Returns the first bid level.
    pub fn best_bid(&self) -> Option<&OrderBookLevel> {
        self.bids.first()
    }

    /// Returns the first ask level.
    pub fn best_ask(&self) -> Option<&OrderBookLevel> {
        self.asks.first()
    }

    /// Returns the spread (best ask - best bid).
    pub fn spread(&self) -> Option<Decimal> {
        let bid = self.best_bid()?;
        let ask = self.best_ask()?;
        Some(ask.price - bid.price)
    }

    /// Returns true if both sides are empty.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn level(price: Decimal, amount: Decimal) -> OrderBookLevel {
        OrderBookLevel::new(price, amount)
    }

    fn sample_book() -> OrderBook {
        OrderBook::new(
            vec![level(dec!(2), dec!(1)), level(dec!(1.6), dec!(5))],
            vec![level(dec!(2.5), dec!(4)), level(dec!(4), dec!(0.5))],
        )
    }

    #[test]
    fn test_inverse_swaps_sides() {
        let inverse = sample_book().inverse().unwrap();

        assert_eq!(
            inverse.bids,
            vec![level(dec!(0.4), dec!(10)), level(dec!(0.25), dec!(2))]
        );
        assert_eq!(
            inverse.asks,
            vec![level(dec!(0.5), dec!(2)), level(dec!(0.625), dec!(8))]
        );
    }

    #[test]
    fn test_inverse_twice_restores_book() {
        let book = sample_book();
        let restored = book.inverse().unwrap().inverse().unwrap();

        assert_eq!(restored.bids, book.bids);
        assert_eq!(restored.asks, book.asks);
    }

    #[test]
    fn test_inverse_empty_book() {
        let book = OrderBook::default();
        assert!(book.inverse().unwrap().is_empty());
    }

    #[test]
    fn test_inverse_propagates_zero_price() {
        let book = OrderBook::new(vec![level(Decimal::ZERO, dec!(1))], vec![]);
        assert!(matches!(
            book.inverse(),
            Err(OrderBookError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_best_levels_and_spread() {
        let book = sample_book();
        assert_eq!(book.best_bid(), Some(&level(dec!(2), dec!(1))));
        assert_eq!(book.best_ask(), Some(&level(dec!(2.5), dec!(4))));
        assert_eq!(book.spread(), Some(dec!(0.5)));
        assert_eq!(OrderBook::default().spread(), None);
    }
}
