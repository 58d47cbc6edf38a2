//! Order lifecycle endpoints (require authentication)

use crate::client::BitpinClient;
use crate::error::{BitpinError, RestResult};
use crate::request::RequestOptions;
use crate::types::{
    BulkCancelResponse, BulkCreateResponse, Fill, GetFillsParams, GetOrdersParams, OrderParams,
    OrderQuery, OrderStatus, OrderStatusResponse, Paginated,
};
use serde_json::json;
use tracing::{debug, instrument};

impl BitpinClient {
    /// Create a single order
    #[instrument(skip(self, order, opts))]
    pub async fn create_order(
        &self,
        order: &OrderParams,
        opts: RequestOptions,
    ) -> RestResult<OrderStatus> {
        debug!(symbol = %order.symbol(), side = %order.side(), mode = %order.mode(), "Creating order");
        let opts = opts.with_data(serde_json::to_value(order)?);
        self.post("odr/orders/", None, true, opts).await
    }

    /// Create several orders in one request
    ///
    /// The response carries one status per submitted order, in
    /// submission order. Rejects an empty batch locally.
    #[instrument(skip(self, orders, opts))]
    pub async fn create_orders_bulk(
        &self,
        orders: &[OrderParams],
        opts: RequestOptions,
    ) -> RestResult<BulkCreateResponse> {
        if orders.is_empty() {
            return Err(BitpinError::Config(
                "bulk order creation requires at least one order".into(),
            ));
        }
        debug!(count = orders.len(), "Creating orders in bulk");

        let opts = opts.with_data(json!({ "orders": orders }));
        self.post("odr/orders/bulk/", None, true, opts).await
    }

    /// Get the user's orders, filtered
    #[instrument(skip(self, params, opts))]
    pub async fn get_orders(
        &self,
        params: GetOrdersParams,
        opts: RequestOptions,
    ) -> RestResult<Paginated<OrderStatus>> {
        debug!("Fetching orders");
        let opts = opts.with_data(serde_json::to_value(&params)?);
        self.get("odr/orders/", None, true, opts).await
    }

    /// Get the status of one or several orders by id
    ///
    /// A single id returns one status; a list renders as a comma-joined
    /// path segment and returns a list. [`OrderStatusResponse::into_vec`]
    /// flattens both shapes.
    #[instrument(skip(self, query, opts))]
    pub async fn get_order_status(
        &self,
        query: impl Into<OrderQuery>,
        opts: RequestOptions,
    ) -> RestResult<OrderStatusResponse> {
        let query = query.into();
        debug!(ids = %query.path_segment(), "Fetching order status");
        self.get(
            &format!("odr/orders/{}/", query.path_segment()),
            None,
            true,
            opts,
        )
        .await
    }

    /// Cancel one order by id
    ///
    /// The cancel is a request, not a guarantee: an order can fill
    /// before the cancel lands. The raw response body is returned as-is.
    #[instrument(skip(self, opts))]
    pub async fn cancel_order(
        &self,
        order_id: &str,
        opts: RequestOptions,
    ) -> RestResult<serde_json::Value> {
        debug!(order_id = %order_id, "Cancelling order");
        self.delete(&format!("odr/orders/{}/", order_id), None, true, opts)
            .await
    }

    /// Cancel several orders in one request
    ///
    /// The response splits the ids into cancelled and not-cancelled
    /// sets. Rejects an empty batch locally.
    #[instrument(skip(self, order_ids, opts))]
    pub async fn cancel_orders_bulk(
        &self,
        order_ids: &[String],
        opts: RequestOptions,
    ) -> RestResult<BulkCancelResponse> {
        if order_ids.is_empty() {
            return Err(BitpinError::Config(
                "bulk order cancellation requires at least one order id".into(),
            ));
        }
        debug!(count = order_ids.len(), "Cancelling orders in bulk");

        let opts = opts.with_data(json!({ "ids": order_ids }));
        self.post("odr/orders/bulk/cancel/", None, true, opts).await
    }

    /// Get the user's fills, filtered
    #[instrument(skip(self, params, opts))]
    pub async fn get_fills(
        &self,
        params: GetFillsParams,
        opts: RequestOptions,
    ) -> RestResult<Paginated<Fill>> {
        debug!("Fetching fills");
        let opts = opts.with_data(serde_json::to_value(&params)?);
        self.get("odr/fills/", None, true, opts).await
    }
}
