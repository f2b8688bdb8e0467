//! Order book snapshots and pair inversion.
//!
//! # Example
//!
//! ```rust
//! use orderbook::{OrderBook, OrderBookLevel};
//! use rust_decimal_macros::dec;
//!
//! let book = OrderBook::new(
//!     vec![OrderBookLevel::new(dec!(2), dec!(1))],
//!     vec![OrderBookLevel::new(dec!(4), dec!(1))],
//! );
//!
//! // Same market quoted the other way round.
//! let inverse = book.inverse().unwrap();
//! assert_eq!(inverse.bids[0].price, dec!(0.25));
//! ```

mod book;
mod error;
mod level;

pub use book::OrderBook;
pub use error::OrderBookError;
pub use level::OrderBookLevel;
