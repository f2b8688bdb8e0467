//! OKEx v3 response types.
//!
//! Amounts arrive either as JSON strings or JSON numbers depending on the
//! endpoint; both go through [`parse_decimal`] so no value ever passes
//! through `f64`. Number literals keep their source text because
//! `serde_json` is built with `arbitrary_precision`.

use model::{Amount, Balance};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Response from GET /api/general/v3/time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerTime {
    /// ISO 8601 time, used verbatim as the signing timestamp.
    pub iso: String,
    /// Unix time in seconds with millisecond fraction.
    #[serde(deserialize_with = "deserialize_decimal")]
    pub epoch: Decimal,
}

/// One entry of GET /api/spot/v3/accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub currency: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub balance: Amount,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub hold: Amount,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub available: Amount,
    #[serde(deserialize_with = "deserialize_string_id")]
    pub id: String,
}

impl From<BalanceResponse> for Balance {
    fn from(r: BalanceResponse) -> Self {
        Balance {
            currency: r.currency,
            balance: r.balance,
            hold: r.hold,
            available: r.available,
            id: r.id,
        }
    }
}

/// One entry of GET /api/spot/v3/orders_pending.
#[derive(Debug, Clone, Deserialize)]
pub struct PendingOrderResponse {
    #[serde(deserialize_with = "deserialize_order_id")]
    pub order_id: u64,
    /// Creation time, unix milliseconds.
    pub create_date: i64,
    pub symbol: String,
    /// Declared side, `"buy"` or `"sell"`.
    #[serde(rename = "type")]
    pub side: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub price: Amount,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub amount: Amount,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub deal_amount: Amount,
}

/// Response from POST /api/spot/v3/orders.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(deserialize_with = "deserialize_order_id")]
    pub order_id: u64,
    #[serde(default)]
    pub client_oid: Option<String>,
    #[serde(default)]
    pub result: Option<Value>,
}

/// Response from POST /api/spot/v3/cancel_orders/<order_id>.
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(deserialize_with = "deserialize_order_id")]
    pub order_id: u64,
    #[serde(default)]
    pub result: Option<Value>,
}

/// Response from GET /api/spot/v3/instruments/<pair>/book.
///
/// Levels are `[price, size, num_orders]` arrays; extra columns are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DepthResponse {
    pub asks: Vec<Vec<Value>>,
    pub bids: Vec<Vec<Value>>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Parse an exact decimal from its textual form.
///
/// Accepts plain notation (`"0.001"`) and scientific notation (`"1e-3"`).
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    let s = s.trim();
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

/// Read a decimal out of a JSON string or number.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    }
}

/// Deserialize a Decimal from a string or a number.
///
/// Goes through `Value` so number literals keep their full text.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    decimal_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal {}", value)))
}

/// Deserialize an integer order id sent either as a number or a digit string.
fn deserialize_order_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let id = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    id.ok_or_else(|| serde::de::Error::custom(format!("invalid order id {}", value)))
}

/// Deserialize an identifier that may be numeric into its string form.
fn deserialize_string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid id {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deserialize_server_time() {
        let json = r#"{"iso": "2015-01-07T23:47:25.201Z", "epoch": 1420674445.201}"#;
        let response: ServerTime = serde_json::from_str(json).unwrap();
        assert_eq!(response.iso, "2015-01-07T23:47:25.201Z");
        assert_eq!(response.epoch, dec!(1420674445.201));
    }

    #[test]
    fn test_deserialize_balance() {
        let json = r#"{"currency": "BTC", "balance": "2.3", "hold": "2", "available": "0.3", "id": "344555"}"#;
        let balance: Balance = serde_json::from_str::<BalanceResponse>(json).unwrap().into();
        assert_eq!(balance.currency, "BTC");
        assert_eq!(balance.balance, dec!(2.3));
        assert_eq!(balance.hold, dec!(2));
        assert_eq!(balance.available, dec!(0.3));
        assert_eq!(balance.id, "344555");
    }

    #[test]
    fn test_deserialize_pending_order_numbers_and_strings() {
        let json = r#"{
            "order_id": "2510789768709120",
            "create_date": 1552042765789,
            "symbol": "BTC-USDT",
            "type": "sell",
            "price": 6500.1,
            "amount": "0.0100",
            "deal_amount": 0
        }"#;
        let order: PendingOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, 2510789768709120);
        assert_eq!(order.side, "sell");
        assert_eq!(order.price, dec!(6500.1));
        assert_eq!(order.amount.to_string(), "0.0100");
        assert_eq!(order.deal_amount, Decimal::ZERO);
    }

    #[test]
    fn test_number_amounts_keep_all_digits() {
        let json = r#"{
            "order_id": 1,
            "create_date": 1552042765789,
            "symbol": "BTC-USDT",
            "type": "buy",
            "price": 0.12345678901234567891,
            "amount": 12345678901234567.5,
            "deal_amount": 1e-8
        }"#;
        let order: PendingOrderResponse = serde_json::from_str(json).unwrap();
        assert_eq!(order.price, dec!(0.12345678901234567891));
        assert_eq!(order.amount, dec!(12345678901234567.5));
        assert_eq!(order.deal_amount, dec!(0.00000001));

        let value: Value = serde_json::from_str("0.12345678901234567891").unwrap();
        assert_eq!(
            decimal_from_value(&value),
            Some(dec!(0.12345678901234567891))
        );
    }

    #[test]
    fn test_place_order_response_requires_integer_id() {
        let ok: PlaceOrderResponse =
            serde_json::from_str(r#"{"order_id": 77, "result": true}"#).unwrap();
        assert_eq!(ok.order_id, 77);

        assert!(serde_json::from_str::<PlaceOrderResponse>(r#"{"result": true}"#).is_err());
        assert!(serde_json::from_str::<PlaceOrderResponse>(r#"{"order_id": "abc"}"#).is_err());
        assert!(serde_json::from_str::<PlaceOrderResponse>(r#"{"order_id": -5}"#).is_err());
        assert!(serde_json::from_str::<PlaceOrderResponse>(r#"{"order_id": 1.5}"#).is_err());
    }

    #[test]
    fn test_decimal_from_value() {
        assert_eq!(decimal_from_value(&Value::from("1.50")), Some(dec!(1.50)));
        assert_eq!(decimal_from_value(&serde_json::json!(0.1)), Some(dec!(0.1)));
        assert_eq!(decimal_from_value(&Value::from("1e-3")), Some(dec!(0.001)));
        assert_eq!(decimal_from_value(&Value::Null), None);
        assert_eq!(decimal_from_value(&Value::from("abc")), None);
    }
}
