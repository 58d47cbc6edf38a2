//! REST API client for the Bitpin cryptocurrency exchange
//!
//! This crate provides a typed client for Bitpin's REST API, covering
//! authentication, market data, wallet queries, and the order lifecycle
//! (create/cancel/status, single and bulk).
//!
//! # Authentication
//!
//! Private endpoints use bearer tokens: exchange your API key and secret
//! for an access/refresh token pair via [`BitpinClient::authenticate`],
//! then the client injects `Authorization: Bearer <access>` on every
//! signed call. Access tokens expire; call
//! [`BitpinClient::refresh_access_token`] to obtain a fresh one. The
//! client never refreshes automatically - on an expired-token API error,
//! refresh and retry yourself.
//!
//! # Example
//!
//! ```no_run
//! use bitpin_rest::{BitpinClient, ClientConfig, RequestOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BitpinClient::new();
//!     let tickers = client.get_tickers(RequestOptions::new()).await?;
//!     println!("{} tickers", tickers.len());
//!
//!     // Private endpoints: connect() authenticates when credentials are set
//!     let config = ClientConfig::new().with_credentials("key", "secret");
//!     let client = BitpinClient::connect(config).await?;
//!     let wallets = client
//!         .get_wallets(Default::default(), RequestOptions::new())
//!         .await?;
//!     println!("{} wallets", wallets.results.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every failure surfaces as a [`BitpinError`]: `Api` for non-2xx
//! responses, `Request` when no usable response was received, `Config`
//! for local precondition failures (raised before any network call).
//! The client performs no retries and no backoff.

pub mod client;
mod endpoints;
pub mod error;
pub mod request;
pub mod types;

// Re-export main types
pub use client::{BackgroundProcess, BitpinClient, ClientConfig};
pub use error::{BitpinError, RestResult};
pub use request::RequestOptions;

// Re-export endpoint-specific types
pub use types::{
    // Authentication
    AuthTokens, RefreshedToken,
    // Market data
    BookLevel, CurrencyInfo, MarketInfo, OrderBook, TickerInfo, Trade,
    // Wallets
    GetWalletsParams, Wallet,
    // Orders
    BulkCancelResponse, BulkCreateResponse, Fill, GetFillsParams, GetOrdersParams,
    OrderParams, OrderQuery, OrderStatus, OrderStatusResponse,
    // Shared
    ErrorResponse, Paginated, Pagination,
};

// Re-export the shared domain types
pub use bitpin_types::{OrderMode, OrderSide, OrderState, Symbol, Tld};
