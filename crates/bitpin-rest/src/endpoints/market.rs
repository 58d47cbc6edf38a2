//! Public market data endpoints
//!
//! These endpoints don't require authentication.

use crate::client::BitpinClient;
use crate::error::RestResult;
use crate::request::RequestOptions;
use crate::types::{CurrencyInfo, MarketInfo, OrderBook, Paginated, Pagination, TickerInfo, Trade};
use bitpin_types::Symbol;
use tracing::{debug, instrument};

impl BitpinClient {
    /// Get the currency listing
    #[instrument(skip(self, opts))]
    pub async fn get_currencies(
        &self,
        pagination: Pagination,
        opts: RequestOptions,
    ) -> RestResult<Paginated<CurrencyInfo>> {
        debug!("Fetching currencies");
        let opts = opts.with_data(serde_json::to_value(pagination)?);
        self.get("mkt/currencies/", None, false, opts).await
    }

    /// Get the market (trading pair) listing
    #[instrument(skip(self, opts))]
    pub async fn get_markets(
        &self,
        pagination: Pagination,
        opts: RequestOptions,
    ) -> RestResult<Paginated<MarketInfo>> {
        debug!("Fetching markets");
        let opts = opts.with_data(serde_json::to_value(pagination)?);
        self.get("mkt/markets/", None, false, opts).await
    }

    /// Get ticker snapshots for all markets
    #[instrument(skip(self, opts))]
    pub async fn get_tickers(&self, opts: RequestOptions) -> RestResult<Vec<TickerInfo>> {
        debug!("Fetching tickers");
        self.get("mkt/tickers/", None, false, opts).await
    }

    /// Get the order book snapshot for one market
    #[instrument(skip(self, opts))]
    pub async fn get_order_book(
        &self,
        symbol: &Symbol,
        opts: RequestOptions,
    ) -> RestResult<OrderBook> {
        debug!(symbol = %symbol, "Fetching order book");
        self.get(&format!("mth/orderbook/{}/", symbol), None, false, opts)
            .await
    }

    /// Get recent public trades for one market
    #[instrument(skip(self, opts))]
    pub async fn get_recent_trades(
        &self,
        symbol: &Symbol,
        opts: RequestOptions,
    ) -> RestResult<Vec<Trade>> {
        debug!(symbol = %symbol, "Fetching recent trades");
        self.get(&format!("mth/matches/{}/", symbol), None, false, opts)
            .await
    }
}
