//! Types for Bitpin REST API requests and responses

use bitpin_types::{OrderMode, OrderSide, OrderState, Symbol};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Shared Envelopes
// ============================================================================

/// Paginated list envelope used by the listing endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    /// Total number of results, when the server reports it
    pub count: Option<u64>,
    /// URL of the next page
    pub next: Option<String>,
    /// URL of the previous page
    pub previous: Option<String>,
    /// Results on this page
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Check whether another page exists
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Offset/limit pagination parameters
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Pagination {
    /// Number of results to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Maximum number of results to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Pagination {
    /// Page of `limit` results starting at `offset`
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset: Some(offset),
            limit: Some(limit),
        }
    }
}

/// Error body shape returned by the exchange on non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error detail
    pub detail: String,
    /// Machine-readable error code
    pub code: Option<String>,
    /// Per-field validation messages
    pub messages: Option<Vec<HashMap<String, String>>>,
}

// ============================================================================
// Authentication Types
// ============================================================================

/// Token pair returned by the authenticate operation
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    /// Long-lived refresh token
    pub refresh: String,
    /// Short-lived access token used as the bearer credential
    pub access: String,
}

/// Response of the refresh-token operation
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    /// The new access token
    pub access: String,
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Currency listing entry
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyInfo {
    /// Currency code (e.g., "BTC")
    pub currency: String,
    /// Display name
    pub name: String,
    /// Whether the currency can currently be traded
    pub tradable: bool,
    /// Price precision step
    pub precision: Decimal,
}

/// Market (trading pair) listing entry
#[derive(Debug, Clone, Deserialize)]
pub struct MarketInfo {
    /// Market symbol (BASE_QUOTE)
    pub symbol: Symbol,
    /// Display name (e.g., "BTC/Tether")
    pub name: String,
    /// Base currency code
    pub base: String,
    /// Quote currency code
    pub quote: String,
    /// Whether the market is currently tradable
    pub tradable: bool,
    /// Price precision step
    pub price_precision: Decimal,
    /// Base amount precision step
    pub base_amount_precision: Decimal,
    /// Quote amount precision step
    pub quote_amount_precision: Decimal,
}

/// Ticker snapshot for one market
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Market symbol
    pub symbol: Symbol,
    /// Last traded price
    pub price: Decimal,
    /// Absolute price change over the last 24 hours
    pub daily_change_price: Decimal,
    /// 24-hour low
    pub low: Decimal,
    /// 24-hour high
    pub high: Decimal,
    /// Snapshot timestamp (Unix seconds)
    pub timestamp: f64,
}

/// One price level: `[price, amount]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel(pub Decimal, pub Decimal);

impl BookLevel {
    /// Price of this level
    pub fn price(&self) -> Decimal {
        self.0
    }

    /// Amount resting at this price
    pub fn amount(&self) -> Decimal {
        self.1
    }
}

/// Order book snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBook {
    /// Ask levels, best first
    pub asks: Vec<BookLevel>,
    /// Bid levels, best first
    pub bids: Vec<BookLevel>,
}

impl OrderBook {
    /// Get the best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(BookLevel::price)
    }

    /// Get the best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(BookLevel::price)
    }

    /// Get the spread
    pub fn spread(&self) -> Option<Decimal> {
        Some(self.best_ask()? - self.best_bid()?)
    }
}

/// Public trade (match) entry
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    /// Match identifier
    pub id: String,
    /// Execution price
    pub price: Decimal,
    /// Executed base amount
    pub base_amount: Decimal,
    /// Executed quote amount
    pub quote_amount: Decimal,
    /// Taker side
    pub side: OrderSide,
}

// ============================================================================
// Wallet Types
// ============================================================================

/// Wallet entry
#[derive(Debug, Clone, Deserialize)]
pub struct Wallet {
    /// Wallet identifier
    pub id: u64,
    /// Asset code (e.g., "BTC")
    pub asset: String,
    /// Total balance
    pub balance: Decimal,
    /// Amount locked in open orders
    pub frozen: Decimal,
    /// Owning service (e.g., "main")
    pub service: String,
}

impl Wallet {
    /// Balance not locked in open orders
    pub fn available(&self) -> Decimal {
        self.balance - self.frozen
    }
}

/// Filter parameters for the wallet listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetWalletsParams {
    /// Restrict to these assets
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
    /// Restrict to one service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Pagination window
    #[serde(flatten)]
    pub pagination: Pagination,
}

// ============================================================================
// Order Types
// ============================================================================

/// Parameters for creating an order
///
/// Tagged by order mode; each variant carries exactly the price fields
/// valid for that mode. Serializes flat with a `type` tag, e.g.
/// `{"type": "limit", "symbol": "BTC_USDT", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderParams {
    /// Limit order at a fixed price
    Limit {
        /// Market symbol
        symbol: Symbol,
        /// Order side
        side: OrderSide,
        /// Base amount to trade
        base_amount: Decimal,
        /// Limit price
        price: Decimal,
    },
    /// Market order at the best available price
    Market {
        /// Market symbol
        symbol: Symbol,
        /// Order side
        side: OrderSide,
        /// Base amount to trade
        base_amount: Decimal,
    },
    /// Limit order armed once the stop price trades
    StopLimit {
        /// Market symbol
        symbol: Symbol,
        /// Order side
        side: OrderSide,
        /// Base amount to trade
        base_amount: Decimal,
        /// Limit price of the armed order
        price: Decimal,
        /// Trigger price
        stop_price: Decimal,
    },
    /// One-cancels-the-other: linked limit and stop-limit legs
    Oco {
        /// Market symbol
        symbol: Symbol,
        /// Order side
        side: OrderSide,
        /// Base amount to trade
        base_amount: Decimal,
        /// Limit price of the stop leg
        price: Decimal,
        /// Trigger price of the stop leg
        stop_price: Decimal,
        /// Target price of the limit leg
        oco_target_price: Decimal,
    },
}

impl OrderParams {
    /// Create a limit order
    pub fn limit(
        symbol: impl Into<Symbol>,
        side: OrderSide,
        base_amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self::Limit {
            symbol: symbol.into(),
            side,
            base_amount,
            price,
        }
    }

    /// Create a market order
    pub fn market(symbol: impl Into<Symbol>, side: OrderSide, base_amount: Decimal) -> Self {
        Self::Market {
            symbol: symbol.into(),
            side,
            base_amount,
        }
    }

    /// Create a stop-limit order
    pub fn stop_limit(
        symbol: impl Into<Symbol>,
        side: OrderSide,
        base_amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        Self::StopLimit {
            symbol: symbol.into(),
            side,
            base_amount,
            price,
            stop_price,
        }
    }

    /// Create an OCO order
    pub fn oco(
        symbol: impl Into<Symbol>,
        side: OrderSide,
        base_amount: Decimal,
        price: Decimal,
        stop_price: Decimal,
        oco_target_price: Decimal,
    ) -> Self {
        Self::Oco {
            symbol: symbol.into(),
            side,
            base_amount,
            price,
            stop_price,
            oco_target_price,
        }
    }

    /// Market symbol this order targets
    pub fn symbol(&self) -> &Symbol {
        match self {
            Self::Limit { symbol, .. }
            | Self::Market { symbol, .. }
            | Self::StopLimit { symbol, .. }
            | Self::Oco { symbol, .. } => symbol,
        }
    }

    /// Order side
    pub fn side(&self) -> OrderSide {
        match self {
            Self::Limit { side, .. }
            | Self::Market { side, .. }
            | Self::StopLimit { side, .. }
            | Self::Oco { side, .. } => *side,
        }
    }

    /// Order mode matching the serialized `type` tag
    pub fn mode(&self) -> OrderMode {
        match self {
            Self::Limit { .. } => OrderMode::Limit,
            Self::Market { .. } => OrderMode::Market,
            Self::StopLimit { .. } => OrderMode::StopLimit,
            Self::Oco { .. } => OrderMode::Oco,
        }
    }
}

/// Order state and fill progress as reported by the exchange
#[derive(Debug, Clone, Deserialize)]
pub struct OrderStatus {
    /// Order identifier
    pub id: u64,
    /// Market symbol
    pub symbol: Symbol,
    /// Order mode
    #[serde(rename = "type")]
    pub mode: OrderMode,
    /// Order side
    pub side: OrderSide,
    /// Order price
    pub price: Decimal,
    /// Stop price (stop-limit and OCO orders)
    pub stop_price: Option<Decimal>,
    /// OCO target price (OCO orders)
    pub oco_target_price: Option<Decimal>,
    /// Requested base amount
    pub base_amount: Decimal,
    /// Requested quote amount
    pub quote_amount: Decimal,
    /// Caller-supplied identifier
    pub identifier: Option<String>,
    /// Lifecycle state (server-owned: initial -> active -> closed)
    pub state: OrderState,
    /// When the order closed
    pub closed_at: Option<DateTime<Utc>>,
    /// When the order was created
    pub created_at: DateTime<Utc>,
    /// Base amount filled so far
    pub dealed_base_amount: Decimal,
    /// Quote amount filled so far
    pub dealed_quote_amount: Decimal,
    /// Whether a cancel has been requested while active
    pub req_to_cancel: bool,
    /// Commission charged
    pub commission: Decimal,
}

impl OrderStatus {
    /// Base amount still unfilled
    pub fn remaining_base_amount(&self) -> Decimal {
        self.base_amount - self.dealed_base_amount
    }
}

/// Response of the bulk create operation
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCreateResponse {
    /// One status entry per submitted order, in submission order
    pub orders: Vec<OrderStatus>,
}

/// Response of the bulk cancel operation
#[derive(Debug, Clone, Deserialize)]
pub struct BulkCancelResponse {
    /// Order ids that were cancelled
    pub canceled_orders: Vec<String>,
    /// Order ids that could not be cancelled
    pub not_canceled_orders: Vec<String>,
}

/// Order-status lookup: one id or several
///
/// A list renders as a comma-joined path segment (`odr/orders/1,2/`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderQuery {
    /// One order
    Id(String),
    /// Several orders
    Ids(Vec<String>),
}

impl OrderQuery {
    /// Render the path segment for this query
    pub fn path_segment(&self) -> String {
        match self {
            Self::Id(id) => id.clone(),
            Self::Ids(ids) => ids.join(","),
        }
    }
}

impl From<&str> for OrderQuery {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for OrderQuery {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<Vec<String>> for OrderQuery {
    fn from(ids: Vec<String>) -> Self {
        Self::Ids(ids)
    }
}

impl From<&[&str]> for OrderQuery {
    fn from(ids: &[&str]) -> Self {
        Self::Ids(ids.iter().map(|id| id.to_string()).collect())
    }
}

/// Order-status result: one status for a single id, a list otherwise
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderStatusResponse {
    /// Several orders were queried
    Many(Vec<OrderStatus>),
    /// A single order was queried
    One(Box<OrderStatus>),
}

impl OrderStatusResponse {
    /// Flatten into a list regardless of how many ids were queried
    pub fn into_vec(self) -> Vec<OrderStatus> {
        match self {
            Self::Many(orders) => orders,
            Self::One(order) => vec![*order],
        }
    }
}

/// Filter parameters for the user order listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetOrdersParams {
    /// Restrict to one market
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    /// Restrict to one side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    /// Restrict to one lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<OrderState>,
    /// Restrict to one order mode
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mode: Option<OrderMode>,
    /// Match one caller-supplied identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Created at or after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    /// Created at or before
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    /// Restrict to these order ids
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ids_in: Vec<String>,
    /// Restrict to these caller-supplied identifiers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifiers_in: Vec<String>,
    /// Pagination window
    #[serde(flatten)]
    pub pagination: Pagination,
}

// ============================================================================
// Fill Types
// ============================================================================

/// A completed trade execution against one of the user's orders
#[derive(Debug, Clone, Deserialize)]
pub struct Fill {
    /// Fill identifier
    pub id: String,
    /// Market symbol
    pub symbol: Symbol,
    /// Executed base amount
    pub base_amount: Decimal,
    /// Executed quote amount
    pub quote_amount: Decimal,
    /// Execution price
    pub price: Decimal,
    /// Execution time
    pub created_at: DateTime<Utc>,
    /// Commission charged for this fill
    pub commission: Decimal,
    /// Side of the user's order
    pub side: OrderSide,
    /// Currency the commission was charged in
    pub commission_currency: String,
    /// Identifier of the filled order
    pub order_id: u64,
    /// Caller-supplied identifier of the filled order
    pub identifier: Option<String>,
}

/// Filter parameters for the user fill listing
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetFillsParams {
    /// Restrict to one market
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<Symbol>,
    /// Restrict to one side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<OrderSide>,
    /// Pagination window
    #[serde(flatten)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_order_params_limit_serialization() {
        let order = OrderParams::limit("BTC_USDT", OrderSide::Buy, dec!(0.001), dec!(50000));

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "limit");
        assert_eq!(value["symbol"], "BTC_USDT");
        assert_eq!(value["side"], "buy");
        assert!(value.get("stop_price").is_none());
    }

    #[test]
    fn test_order_params_market_has_no_price() {
        let order = OrderParams::market("ETH_IRT", OrderSide::Sell, dec!(2));

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "market");
        assert!(value.get("price").is_none());
    }

    #[test]
    fn test_order_params_oco_carries_all_prices() {
        let order = OrderParams::oco(
            "BTC_USDT",
            OrderSide::Sell,
            dec!(0.5),
            dec!(52000),
            dec!(48000),
            dec!(47500),
        );

        assert_eq!(order.mode(), OrderMode::Oco);
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["type"], "oco");
        assert!(value.get("price").is_some());
        assert!(value.get("stop_price").is_some());
        assert!(value.get("oco_target_price").is_some());
    }

    #[test]
    fn test_order_params_rejects_unknown_tag() {
        let result: Result<OrderParams, _> = serde_json::from_value(json!({
            "type": "iceberg",
            "symbol": "BTC_USDT",
            "side": "buy",
            "base_amount": "1",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_order_status_deserialization() {
        let status: OrderStatus = serde_json::from_value(json!({
            "id": 42,
            "symbol": "BTC_USDT",
            "type": "limit",
            "side": "buy",
            "price": "50000",
            "stop_price": null,
            "oco_target_price": null,
            "base_amount": "0.5",
            "quote_amount": "25000",
            "identifier": null,
            "state": "active",
            "closed_at": null,
            "created_at": "2024-01-01T00:00:00.000+00:00",
            "dealed_base_amount": "0.2",
            "dealed_quote_amount": "10000",
            "req_to_cancel": false,
            "commission": "0.1"
        }))
        .unwrap();

        assert_eq!(status.state, OrderState::Active);
        assert_eq!(status.remaining_base_amount(), dec!(0.3));
        assert!(!status.req_to_cancel);
    }

    #[test]
    fn test_order_query_path_segment() {
        assert_eq!(OrderQuery::from("1").path_segment(), "1");
        assert_eq!(
            OrderQuery::from(vec!["1".to_string(), "2".to_string()]).path_segment(),
            "1,2"
        );
    }

    #[test]
    fn test_order_status_response_shapes() {
        let one: OrderStatusResponse = serde_json::from_value(json!({
            "id": 1, "symbol": "BTC_USDT", "type": "market", "side": "buy",
            "price": "0", "stop_price": null, "oco_target_price": null,
            "base_amount": "1", "quote_amount": "1", "identifier": null,
            "state": "closed", "closed_at": null,
            "created_at": "2024-01-01T00:00:00.000+00:00",
            "dealed_base_amount": "1", "dealed_quote_amount": "1",
            "req_to_cancel": false, "commission": "0"
        }))
        .unwrap();
        assert_eq!(one.into_vec().len(), 1);

        let many: OrderStatusResponse = serde_json::from_value(json!([])).unwrap();
        assert!(many.into_vec().is_empty());
    }

    #[test]
    fn test_book_level_from_string_pairs() {
        let book: OrderBook = serde_json::from_value(json!({
            "asks": [["50100", "0.5"], ["50200", "1.0"]],
            "bids": [["50000", "0.25"]],
        }))
        .unwrap();

        assert_eq!(book.best_ask(), Some(dec!(50100)));
        assert_eq!(book.best_bid(), Some(dec!(50000)));
        assert_eq!(book.spread(), Some(dec!(100)));
    }

    #[test]
    fn test_wallet_available() {
        let wallet: Wallet = serde_json::from_value(json!({
            "id": 7, "asset": "BTC", "balance": "1.5", "frozen": "0.5", "service": "main"
        }))
        .unwrap();
        assert_eq!(wallet.available(), dec!(1.0));
    }

    #[test]
    fn test_get_orders_params_skips_unset_fields() {
        let params = GetOrdersParams {
            symbol: Some(Symbol::new("BTC_USDT")),
            state: Some(OrderState::Active),
            ..Default::default()
        };

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["symbol"], "BTC_USDT");
        assert_eq!(value["state"], "active");
        assert!(value.get("side").is_none());
        assert!(value.get("ids_in").is_none());
        assert!(value.get("offset").is_none());
    }

    #[test]
    fn test_paginated_envelope() {
        let page: Paginated<CurrencyInfo> = serde_json::from_value(json!({
            "count": 2,
            "next": "https://api.bitpin.ir/api/v1/mkt/currencies/?offset=1&limit=1",
            "previous": null,
            "results": [
                {"currency": "BTC", "name": "Bitcoin", "tradable": true, "precision": "0.00000001"}
            ],
        }))
        .unwrap();

        assert!(page.has_next());
        assert_eq!(page.results[0].currency, "BTC");
    }
}
