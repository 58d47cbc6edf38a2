//! Wallet endpoints (require authentication)

use crate::client::BitpinClient;
use crate::error::RestResult;
use crate::request::RequestOptions;
use crate::types::{GetWalletsParams, Paginated, Wallet};
use tracing::{debug, instrument};

impl BitpinClient {
    /// Get the user's wallets
    ///
    /// Filters serialize into the query string; comma-joined for list
    /// fields (`assets=BTC,USDT`).
    #[instrument(skip(self, params, opts))]
    pub async fn get_wallets(
        &self,
        params: GetWalletsParams,
        opts: RequestOptions,
    ) -> RestResult<Paginated<Wallet>> {
        debug!("Fetching wallets");
        let opts = opts.with_data(serde_json::to_value(&params)?);
        self.get("wlt/wallets/", None, true, opts).await
    }
}
