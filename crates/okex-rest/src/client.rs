//! OKEx v3 spot REST API client.

use crate::error::OkexRestError;
use crate::responses::{
    decimal_from_value, BalanceResponse, CancelOrderResponse, DepthResponse, PendingOrderResponse,
    PlaceOrderResponse, ServerTime,
};
use auth::{ApiCredentials, RequestSigner};
use chrono::DateTime;
use common::ClientConfig;
use model::{Amount, Balance, Candle, Order, Side, Trade};
use orderbook::{OrderBook, OrderBookLevel};
use rest_client::RestClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use tracing::instrument::Instrumented;
use tracing::{Instrument, Span};

const SERVER_TIME_PATH: &str = "/api/general/v3/time";
const ACCOUNTS_PATH: &str = "/api/spot/v3/accounts";
const ORDERS_PENDING_PATH: &str = "/api/spot/v3/orders_pending";
const ORDERS_PATH: &str = "/api/spot/v3/orders";

/// Candle widths accepted by the candles endpoint, in seconds.
pub const CANDLE_GRANULARITIES: [u32; 12] = [
    60, 180, 300, 900, 1800, 3600, 7200, 14400, 21600, 43200, 86400, 604800,
];

/// Body of POST /api/spot/v3/orders.
#[derive(Debug, Serialize)]
struct PlaceOrderRequest<'a> {
    instrument_id: &'a str,
    side: &'static str,
    #[serde(rename = "type")]
    order_type: &'static str,
    price: String,
    size: String,
}

/// Body of POST /api/spot/v3/cancel_orders/<order_id>.
#[derive(Debug, Serialize)]
struct CancelOrderRequest<'a> {
    instrument_id: &'a str,
}

/// OKEx REST API client with authentication support.
///
/// Every authenticated request is signed with the exchange's own clock,
/// fetched from the time endpoint just before the request, so local clock
/// skew never causes a rejected signature. The client holds no mutable
/// state and can be shared across tasks.
pub struct OkexRestClient {
    client: RestClient,
    credentials: ApiCredentials,
    span: Span,
}

impl OkexRestClient {
    /// Create a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig, credentials: ApiCredentials) -> Result<Self, OkexRestError> {
        let client = RestClient::new(config.api_server(), config.timeout())?;

        Ok(Self {
            client,
            credentials,
            span: Span::none(),
        })
    }

    /// Create a client from raw settings, validating them first.
    ///
    /// # Arguments
    /// * `api_server` - Base URL, e.g. `https://www.okex.com`
    /// * `api_key`, `secret_key`, `passphrase` - API credentials
    /// * `timeout_secs` - Per-request timeout in seconds
    pub fn from_settings(
        api_server: &str,
        api_key: &str,
        secret_key: &str,
        passphrase: &str,
        timeout_secs: f64,
    ) -> Result<Self, OkexRestError> {
        if api_key.is_empty() || secret_key.is_empty() || passphrase.is_empty() {
            return Err(OkexRestError::Validation(
                "api key, secret key and passphrase are required".into(),
            ));
        }

        let config = ClientConfig::new(api_server, timeout_secs)?;
        let credentials =
            ApiCredentials::new(api_key.into(), secret_key.into(), passphrase.into());
        Self::new(&config, credentials)
    }

    /// Create a client from `OKEX_*` environment variables.
    pub fn from_env() -> Result<Self, OkexRestError> {
        let config = ClientConfig::from_env()?;
        let credentials = ApiCredentials::from_env()?;
        Self::new(&config, credentials)
    }

    /// Record all of this client's log events inside `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Get the API key (for logging/debugging).
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Get the exchange's current time.
    ///
    /// GET /api/general/v3/time (unsigned)
    pub async fn server_time(&self) -> Result<ServerTime, OkexRestError> {
        self.traced(self.fetch_server_time()).await
    }

    /// Get the raw ticker for `pair`.
    ///
    /// GET /api/spot/v3/instruments/<pair>/ticker
    pub async fn ticker(&self, pair: &str) -> Result<Value, OkexRestError> {
        validate_pair(pair)?;
        let path = format!("/api/spot/v3/instruments/{}/ticker", pair);
        self.traced(self.http_get(&path)).await
    }

    /// Get the raw order book for `pair`.
    ///
    /// GET /api/spot/v3/instruments/<pair>/book
    pub async fn depth(&self, pair: &str) -> Result<Value, OkexRestError> {
        validate_pair(pair)?;
        self.traced(self.http_get(&book_path(pair))).await
    }

    /// Get the order book for `pair` as an [`OrderBook`].
    pub async fn order_book(&self, pair: &str) -> Result<OrderBook, OkexRestError> {
        validate_pair(pair)?;
        let path = book_path(pair);

        self.traced(async {
            let response: DepthResponse = decode(&path, self.http_get(&path).await?)?;

            let bids = parse_levels(&path, &response.bids)?;
            let asks = parse_levels(&path, &response.asks)?;

            tracing::debug!(
                pair = %pair,
                bid_levels = bids.len(),
                ask_levels = asks.len(),
                "Order book received"
            );

            Ok::<_, OkexRestError>(OrderBook::new(bids, asks))
        })
        .await
    }

    /// Get candles for `pair`, newest first as sent by the exchange.
    ///
    /// GET /api/spot/v3/instruments/<pair>/candles?granularity=<secs>
    pub async fn candles(
        &self,
        pair: &str,
        granularity_secs: u32,
    ) -> Result<Vec<Candle>, OkexRestError> {
        validate_pair(pair)?;
        if !CANDLE_GRANULARITIES.contains(&granularity_secs) {
            return Err(OkexRestError::Validation(format!(
                "unsupported candle granularity {}s",
                granularity_secs
            )));
        }

        let path = format!(
            "/api/spot/v3/instruments/{}/candles?granularity={}",
            pair, granularity_secs
        );

        self.traced(async {
            let rows: Vec<Vec<Value>> = decode(&path, self.http_get(&path).await?)?;
            rows.iter()
                .map(|row| parse_candle(&path, row))
                .collect::<Result<Vec<_>, OkexRestError>>()
        })
        .await
    }

    // ========================================================================
    // Account
    // ========================================================================

    /// Get spot account balances.
    ///
    /// GET /api/spot/v3/accounts
    pub async fn get_balances(&self) -> Result<Vec<Balance>, OkexRestError> {
        self.traced(async {
            let response: Vec<BalanceResponse> =
                decode(ACCOUNTS_PATH, self.http_get(ACCOUNTS_PATH).await?)?;
            Ok::<_, OkexRestError>(response.into_iter().map(Balance::from).collect())
        })
        .await
    }

    // ========================================================================
    // Order Management
    // ========================================================================

    /// Get open orders for `pair`.
    ///
    /// GET /api/spot/v3/orders_pending?instrument_id=<pair>
    ///
    /// Records whose declared side is neither buy nor sell are skipped.
    pub async fn get_orders(&self, pair: &str) -> Result<Vec<Order>, OkexRestError> {
        validate_pair(pair)?;
        let path = format!("{}?instrument_id={}", ORDERS_PENDING_PATH, pair);

        self.traced(async {
            let rows: Vec<Value> = decode(&path, self.http_get(&path).await?)?;

            rows.into_iter()
                .filter(|row| {
                    row.get("type")
                        .and_then(Value::as_str)
                        .and_then(Side::from_okex_str)
                        .is_some()
                })
                .map(|row| {
                    let pending: PendingOrderResponse = decode(&path, row)?;
                    parse_order(&path, pending)
                })
                .collect::<Result<Vec<_>, OkexRestError>>()
        })
        .await
    }

    /// Place a limit order and return the exchange's order id.
    ///
    /// POST /api/spot/v3/orders
    ///
    /// Price and size are sent as decimal strings exactly as `Decimal`
    /// formats them.
    pub async fn place_order(
        &self,
        pair: &str,
        is_sell: bool,
        price: Amount,
        amount: Amount,
    ) -> Result<u64, OkexRestError> {
        validate_pair(pair)?;
        validate_positive("price", price)?;
        validate_positive("amount", amount)?;

        let side = Side::from_is_sell(is_sell);
        let request = PlaceOrderRequest {
            instrument_id: pair,
            side: side.as_okex_str(),
            order_type: "limit",
            price: price.to_string(),
            size: amount.to_string(),
        };

        self.traced(async {
            tracing::info!(
                pair = %pair,
                side = %side,
                price = %price,
                amount = %amount,
                "Placing order"
            );

            let response: PlaceOrderResponse =
                decode(ORDERS_PATH, self.http_post(ORDERS_PATH, &request).await?)?;

            tracing::info!(
                pair = %pair,
                side = %side,
                order_id = response.order_id,
                result = ?response.result,
                "Placed order"
            );

            Ok::<_, OkexRestError>(response.order_id)
        })
        .await
    }

    /// Cancel an order.
    ///
    /// POST /api/spot/v3/cancel_orders/<order_id>
    ///
    /// Returns `true` iff the exchange echoes back the requested order id.
    pub async fn cancel_order(&self, pair: &str, order_id: u64) -> Result<bool, OkexRestError> {
        validate_pair(pair)?;
        let path = format!("/api/spot/v3/cancel_orders/{}", order_id);
        let request = CancelOrderRequest {
            instrument_id: pair,
        };

        self.traced(async {
            tracing::info!(pair = %pair, order_id = order_id, "Cancelling order");

            let response: CancelOrderResponse =
                decode(&path, self.http_post(&path, &request).await?)?;
            let success = response.order_id == order_id;

            if success {
                tracing::info!(order_id = order_id, "Cancelled order");
            } else {
                tracing::warn!(
                    order_id = order_id,
                    echoed_order_id = response.order_id,
                    "Failed to cancel order"
                );
            }

            Ok::<_, OkexRestError>(success)
        })
        .await
    }

    /// Trade history is not offered by OKEx; always fails with
    /// [`OkexRestError::Unsupported`].
    pub async fn get_trades(
        &self,
        _pair: &str,
        _page_number: u32,
    ) -> Result<Vec<Trade>, OkexRestError> {
        Err(OkexRestError::Unsupported("get_trades"))
    }

    /// Trade history is not offered by OKEx; always fails with
    /// [`OkexRestError::Unsupported`].
    pub async fn get_all_trades(
        &self,
        _pair: &str,
        _page_number: u32,
    ) -> Result<Vec<Trade>, OkexRestError> {
        Err(OkexRestError::Unsupported("get_all_trades"))
    }

    // ========================================================================
    // Signing and transport
    // ========================================================================

    fn traced<F: Future>(&self, future: F) -> Instrumented<F> {
        future.instrument(self.span.clone())
    }

    async fn fetch_server_time(&self) -> Result<ServerTime, OkexRestError> {
        let body: Value = self.client.get(SERVER_TIME_PATH, &[]).await?;
        decode(SERVER_TIME_PATH, body)
    }

    /// Build authentication headers using the exchange clock.
    async fn signed_headers(
        &self,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> Result<Vec<(&'static str, String)>, OkexRestError> {
        let timestamp = self.fetch_server_time().await?.iso;

        tracing::debug!(
            prehash = %RequestSigner::prehash(&timestamp, method, request_path, body),
            "Signing request"
        );

        let signer = RequestSigner::new(&self.credentials);
        Ok(signer.auth_headers(&timestamp, method, request_path, body))
    }

    /// Signed GET; `path` includes the query string and is signed as-is.
    async fn http_get(&self, path: &str) -> Result<Value, OkexRestError> {
        let headers = self.signed_headers("GET", path, "").await?;
        let body: Value = self.client.get(path, &headers).await?;

        OkexRestError::check_api_response(path, &body)?;
        Ok(body)
    }

    /// Signed POST; the JSON payload is serialized once and that exact
    /// string is both signed and sent.
    async fn http_post<B: Serialize>(&self, path: &str, payload: &B) -> Result<Value, OkexRestError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| OkexRestError::Validation(format!("request body: {}", e)))?;
        let headers = self.signed_headers("POST", path, &body).await?;
        let response: Value = self.client.post(path, body, &headers).await?;

        OkexRestError::check_api_response(path, &response)?;
        Ok(response)
    }
}

impl std::fmt::Debug for OkexRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OkexRestClient")
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.credentials.api_key())
            .finish()
    }
}

fn book_path(pair: &str) -> String {
    format!("/api/spot/v3/instruments/{}/book", pair)
}

/// Map a decoded body onto a typed schema.
fn decode<T: DeserializeOwned>(endpoint: &str, body: Value) -> Result<T, OkexRestError> {
    serde_json::from_value(body).map_err(|e| OkexRestError::parse(endpoint, e.to_string()))
}

fn invalid_row(endpoint: &str, kind: &str, row: &[Value]) -> OkexRestError {
    OkexRestError::parse(
        endpoint,
        format!("invalid {} {}", kind, Value::from(row.to_vec())),
    )
}

fn parse_levels(endpoint: &str, rows: &[Vec<Value>]) -> Result<Vec<OrderBookLevel>, OkexRestError> {
    rows.iter()
        .map(|row| {
            let price = row.first().and_then(decimal_from_value);
            let amount = row.get(1).and_then(decimal_from_value);

            match (price, amount) {
                (Some(price), Some(amount)) => Ok(OrderBookLevel::new(price, amount)),
                _ => Err(invalid_row(endpoint, "book level", row)),
            }
        })
        .collect()
}

/// `[time, open, high, low, close, volume]` with an ISO 8601 time.
fn parse_candle(endpoint: &str, row: &[Value]) -> Result<Candle, OkexRestError> {
    let timestamp = row
        .first()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.timestamp())
        .ok_or_else(|| invalid_row(endpoint, "candle", row))?;

    let field = |index: usize| {
        row.get(index)
            .and_then(decimal_from_value)
            .ok_or_else(|| invalid_row(endpoint, "candle", row))
    };

    Ok(Candle {
        timestamp,
        open: field(1)?,
        close: field(4)?,
        high: field(2)?,
        low: field(3)?,
        volume: field(5)?,
    })
}

fn parse_order(endpoint: &str, pending: PendingOrderResponse) -> Result<Order, OkexRestError> {
    let side = Side::from_okex_str(&pending.side).ok_or_else(|| {
        OkexRestError::parse(endpoint, format!("unknown order side '{}'", pending.side))
    })?;

    Ok(Order {
        order_id: pending.order_id,
        timestamp: pending.create_date / 1000,
        pair: pending.symbol,
        is_sell: side.is_sell(),
        price: pending.price,
        amount: pending.amount,
        deal_amount: pending.deal_amount,
    })
}

/// Instrument ids look like `BTC-USDT`; anything else would need escaping
/// in the path and the signature.
fn validate_pair(pair: &str) -> Result<(), OkexRestError> {
    if pair.is_empty() {
        return Err(OkexRestError::Validation("pair must not be empty".into()));
    }

    if !pair
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(OkexRestError::Validation(format!("invalid pair '{}'", pair)));
    }

    Ok(())
}

fn validate_positive(name: &str, value: Amount) -> Result<(), OkexRestError> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(OkexRestError::Validation(format!(
            "{} must be positive, got {}",
            name, value
        )));
    }
    Ok(())
}
