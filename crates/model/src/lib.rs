//! Exchange-neutral records built from API responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Exact decimal used for every price and amount.
pub type Amount = Decimal;

/// Direction of an order or trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Side from the sell flag used throughout the records.
    pub fn from_is_sell(is_sell: bool) -> Self {
        if is_sell {
            Self::Sell
        } else {
            Self::Buy
        }
    }

    /// Parse the lowercase wire form (`"buy"` / `"sell"`).
    pub fn from_okex_str(s: &str) -> Option<Self> {
        match s {
            "buy" => Some(Self::Buy),
            "sell" => Some(Self::Sell),
            _ => None,
        }
    }

    /// Lowercase wire form.
    pub fn as_okex_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }

    pub fn is_sell(&self) -> bool {
        matches!(self, Self::Sell)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One OHLCV bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, unix seconds.
    pub timestamp: i64,
    pub open: Amount,
    pub close: Amount,
    pub high: Amount,
    pub low: Amount,
    pub volume: Amount,
}

/// An open order on the exchange.
///
/// Equality and hashing use only `order_id` and `pair`: two snapshots of
/// the same order at different fill levels compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    /// Creation time, unix seconds.
    pub timestamp: i64,
    pub pair: String,
    pub is_sell: bool,
    pub price: Amount,
    pub amount: Amount,
    /// Amount filled so far.
    pub deal_amount: Amount,
}

impl Order {
    pub fn side(&self) -> Side {
        Side::from_is_sell(self.is_sell)
    }

    /// Unfilled amount in the order's own units.
    pub fn remaining_amount(&self) -> Amount {
        self.amount - self.deal_amount
    }

    /// Remaining quantity of the currency this order buys.
    ///
    /// A sell order of base for quote buys `remaining * price` quote; a buy
    /// order buys `remaining` base.
    pub fn remaining_buy_amount(&self) -> Amount {
        if self.is_sell {
            self.remaining_amount() * self.price
        } else {
            self.remaining_amount()
        }
    }

    /// Remaining quantity of the currency this order sells.
    pub fn remaining_sell_amount(&self) -> Amount {
        if self.is_sell {
            self.remaining_amount()
        } else {
            self.remaining_amount() * self.price
        }
    }

    /// Price to convert the sold currency into the bought one. OKEx quotes
    /// both directions of a spot pair at the order price.
    pub fn sell_to_buy_price(&self) -> Amount {
        self.price
    }

    /// Price to convert the bought currency back into the sold one.
    pub fn buy_to_sell_price(&self) -> Amount {
        self.price
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id && self.pair == other.pair
    }
}

impl Eq for Order {}

impl Hash for Order {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
        self.pair.hash(state);
    }
}

/// A historical trade.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: u64,
    /// Execution time, unix seconds.
    pub timestamp: i64,
    pub is_sell: bool,
    pub price: Amount,
    pub amount: Amount,
    /// Currency `amount` is denominated in.
    pub amount_symbol: String,
}

/// Funds held in one currency of the spot account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    /// Total funds.
    pub balance: Amount,
    /// Funds locked in open orders.
    pub hold: Amount,
    pub available: Amount,
    /// Account id on the exchange.
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn order(is_sell: bool) -> Order {
        Order {
            order_id: 42,
            timestamp: 1_500_000_000,
            pair: "ETH-BTC".into(),
            is_sell,
            price: dec!(2),
            amount: dec!(10),
            deal_amount: dec!(3),
        }
    }

    #[test]
    fn test_remaining_amounts_sell() {
        let order = order(true);
        assert_eq!(order.remaining_sell_amount(), dec!(7));
        assert_eq!(order.remaining_buy_amount(), dec!(14));
        assert_eq!(order.side(), Side::Sell);
    }

    #[test]
    fn test_remaining_amounts_buy() {
        let order = order(false);
        assert_eq!(order.remaining_buy_amount(), dec!(7));
        assert_eq!(order.remaining_sell_amount(), dec!(14));
        assert_eq!(order.side(), Side::Buy);
    }

    #[test]
    fn test_conversion_prices_are_order_price() {
        for is_sell in [true, false] {
            let order = order(is_sell);
            assert_eq!(order.sell_to_buy_price(), dec!(2));
            assert_eq!(order.buy_to_sell_price(), dec!(2));
        }
    }

    #[test]
    fn test_order_equality_is_identity() {
        let a = order(true);
        let b = Order {
            price: dec!(3),
            amount: dec!(1),
            deal_amount: dec!(0),
            timestamp: 0,
            ..order(true)
        };
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(!set.insert(b));
    }

    #[test]
    fn test_order_different_pair_not_equal() {
        let a = order(true);
        let b = Order {
            pair: "ETH-USDT".into(),
            ..order(true)
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_trade_full_field_equality() {
        let trade = Trade {
            trade_id: 1,
            timestamp: 10,
            is_sell: false,
            price: dec!(100),
            amount: dec!(0.5),
            amount_symbol: "BTC".into(),
        };
        let same = Trade {
            price: dec!(100.00),
            ..trade.clone()
        };
        let other = Trade {
            amount: dec!(0.6),
            ..trade.clone()
        };

        assert_eq!(trade, same);
        assert_ne!(trade, other);

        let set: HashSet<Trade> = [trade, same].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_side_wire_strings() {
        assert_eq!(Side::from_okex_str("buy"), Some(Side::Buy));
        assert_eq!(Side::from_okex_str("sell"), Some(Side::Sell));
        assert_eq!(Side::from_okex_str("limit"), None);
        assert_eq!(Side::Sell.as_okex_str(), "sell");
        assert_eq!(Side::from_is_sell(false), Side::Buy);
        assert_eq!(Side::Buy.to_string(), "BUY");
    }
}
