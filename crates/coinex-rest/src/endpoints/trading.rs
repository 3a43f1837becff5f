//! Order placement, cancellation and history endpoints

use crate::client::CoinExRestClient;
use crate::error::RestResult;
use crate::request::{QueryParams, RequestDescriptor};
use crate::types::{CancelOrderBody, OrderRequest};
use serde_json::Value;
use tracing::{debug, instrument};

/// Default number of orders returned by the history endpoint
pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    client: &'a CoinExRestClient,
}

impl<'a> TradingEndpoints<'a> {
    pub fn new(client: &'a CoinExRestClient) -> Self {
        Self { client }
    }

    /// Place a new order
    ///
    /// Fails with a validation error, without touching the network, when a
    /// price-bearing order type has no price.
    #[instrument(
        skip(self, order),
        fields(market = %order.market, side = %order.side, order_type = %order.order_type)
    )]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        let body = order.to_body()?;
        let request = RequestDescriptor::post("/spot/order").with_json_body(&body)?;

        debug!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.amount, order.market
        );

        self.client.execute(request).await
    }

    /// Cancel an order
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, market: &str, order_id: u64) -> RestResult<Value> {
        let request = RequestDescriptor::post("/spot/cancel-order")
            .with_json_body(&CancelOrderBody { market, order_id })?;
        self.client.execute(request).await
    }

    /// Get the fills of one order
    #[instrument(skip(self))]
    pub async fn get_order_deals(&self, market: &str, order_id: u64) -> RestResult<Value> {
        let query = QueryParams::new()
            .push("market", market)
            .push("order_id", order_id);
        let request = RequestDescriptor::get("/spot/order-deals").with_query(&query)?;
        self.client.execute(request).await
    }

    /// Get finished orders for a market
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of orders (default 50)
    #[instrument(skip(self))]
    pub async fn get_order_history(&self, market: &str, limit: Option<u32>) -> RestResult<Value> {
        let query = QueryParams::new()
            .push("market", market)
            .push("limit", limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
        let request = RequestDescriptor::get("/spot/order/history").with_query(&query)?;
        self.client.execute(request).await
    }
}
