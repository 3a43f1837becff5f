//! Spot market data endpoints

use crate::client::CoinExRestClient;
use crate::error::RestResult;
use crate::request::{QueryParams, RequestDescriptor};
use crate::types::KlinePeriod;
use serde_json::Value;
use tracing::{debug, instrument};

/// Default number of depth levels
pub const DEFAULT_DEPTH_LIMIT: u32 = 10;
/// Default number of candles
pub const DEFAULT_KLINE_LIMIT: u32 = 100;

/// Spot market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a CoinExRestClient,
}

impl<'a> MarketEndpoints<'a> {
    pub fn new(client: &'a CoinExRestClient) -> Self {
        Self { client }
    }

    /// Get info for every spot market
    #[instrument(skip(self))]
    pub async fn get_markets(&self) -> RestResult<Value> {
        debug!("Fetching market list");
        self.client.execute(RequestDescriptor::get("/spot/market")).await
    }

    /// Get info for one spot market
    #[instrument(skip(self))]
    pub async fn get_spot_market(&self, market: &str) -> RestResult<Value> {
        let query = QueryParams::new().push("market", market);
        let request = RequestDescriptor::get("/spot/market").with_query(&query)?;
        self.client.execute(request).await
    }

    /// Get ticker information
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTCUSDT")
    #[instrument(skip(self))]
    pub async fn get_market_ticker(&self, market: &str) -> RestResult<Value> {
        debug!("Fetching ticker for {}", market);

        let query = QueryParams::new().push("market", market);
        let request = RequestDescriptor::get("/spot/ticker").with_query(&query)?;
        self.client.execute(request).await
    }

    /// Get tickers for all markets
    #[instrument(skip(self))]
    pub async fn get_all_tickers(&self) -> RestResult<Value> {
        self.client
            .execute(RequestDescriptor::get("/spot/allTickers"))
            .await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of price levels (default 10)
    #[instrument(skip(self))]
    pub async fn get_market_depth(&self, market: &str, limit: Option<u32>) -> RestResult<Value> {
        debug!("Fetching depth for {}", market);

        let query = QueryParams::new()
            .push("market", market)
            .push("limit", limit.unwrap_or(DEFAULT_DEPTH_LIMIT));
        let request = RequestDescriptor::get("/spot/depth").with_query(&query)?;
        self.client.execute(request).await
    }

    /// Get candlestick data
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `period` - Candle period (default 1min)
    /// * `limit` - Number of candles (default 100)
    #[instrument(skip(self))]
    pub async fn get_market_kline(
        &self,
        market: &str,
        period: Option<KlinePeriod>,
        limit: Option<u32>,
    ) -> RestResult<Value> {
        let query = QueryParams::new()
            .push("market", market)
            .push("type", period.unwrap_or_default())
            .push("limit", limit.unwrap_or(DEFAULT_KLINE_LIMIT));
        let request = RequestDescriptor::get("/spot/kline").with_query(&query)?;
        self.client.execute(request).await
    }
}
