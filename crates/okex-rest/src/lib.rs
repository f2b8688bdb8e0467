//! OKEx v3 spot REST API client.
//!
//! This crate provides a typed client for the OKEx spot API with:
//!
//! - **Request signing**: every private call is signed with the exchange's
//!   own clock, fetched from the time endpoint
//! - **Market data**: raw ticker and depth, plus normalized order books and candles
//! - **Order management**: list, place and cancel limit orders
//! - **Error handling**: transport, protocol, validation and unsupported
//!   operations are distinct error variants
//!
//! # Example
//!
//! ```rust,ignore
//! use okex_rest::OkexRestClient;
//! use rust_decimal_macros::dec;
//!
//! let client = OkexRestClient::from_env()?;
//!
//! let book = client.order_book("ETH-BTC").await?;
//! let order_id = client.place_order("ETH-BTC", true, dec!(0.035), dec!(1.5)).await?;
//! let cancelled = client.cancel_order("ETH-BTC", order_id).await?;
//! ```

mod client;
mod error;
mod responses;

pub use client::{OkexRestClient, CANDLE_GRANULARITIES};
pub use error::OkexRestError;
pub use responses::{
    BalanceResponse, CancelOrderResponse, DepthResponse, PendingOrderResponse,
    PlaceOrderResponse, ServerTime,
};
