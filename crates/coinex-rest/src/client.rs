//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::{default_headers, RequestDescriptor};
use crate::transport::{decode_response, HttpRequest, HttpTransport, ReqwestTransport};
use crate::types::{KlinePeriod, OrderRequest};
use coinex_auth::{Credentials, RequestSigner};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// CoinEx v2 API base URL
pub const BASE_URL: &str = "https://api.coinex.com/v2";

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CoinEx spot REST API client
///
/// Every request is signed. The client holds no mutable state, so one
/// instance can be cloned and shared across tasks.
///
/// # Example
///
/// ```no_run
/// use coinex_rest::{CoinExRestClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let creds = Credentials::from_env()?;
///     let client = CoinExRestClient::new(creds)?;
///
///     let ticker = client.get_market_ticker("BTCUSDT").await?;
///     println!("{}", ticker);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinExRestClient {
    credentials: Credentials,
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    headers: HeaderMap,
}

impl CoinExRestClient {
    /// Create a client with default configuration
    pub fn new(credentials: Credentials) -> RestResult<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with credentials read from the environment
    ///
    /// Reads `COINEX_ACCESS_ID` and `COINEX_SECRET_KEY`.
    pub fn from_env() -> RestResult<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(credentials, config, Arc::new(transport)))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(
        credentials: Credentials,
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        info!(base_url = %base_url, "Created CoinEx REST client");

        Self {
            credentials,
            transport,
            base_url,
            headers: default_headers(),
        }
    }

    /// Access id this client signs with
    pub fn access_id(&self) -> &str {
        self.credentials.access_id()
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Request Pipeline
    // ========================================================================

    /// Sign, send and unwrap one request
    ///
    /// Returns the envelope's `data` field on success. Exactly one HTTP call
    /// is made; failures are returned as-is and never retried.
    pub async fn execute(&self, request: RequestDescriptor) -> RestResult<Value> {
        let signer = RequestSigner::new(&self.credentials);
        let signed = request.sign(&signer, &self.headers)?;

        debug!(method = %signed.method, path = %signed.full_path, "Sending signed request");

        let response = self
            .transport
            .send(HttpRequest {
                url: format!("{}{}", self.base_url, signed.full_path),
                method: signed.method,
                headers: signed.headers,
                body: signed.body,
            })
            .await?;

        debug!(status = response.status, "Received response");

        decode_response(response)
    }

    /// Like [`execute`](Self::execute), decoding `data` into `T`
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> RestResult<T> {
        let data = self.execute(request).await?;
        serde_json::from_value(data)
            .map_err(|e| RestError::Decode(format!("Unexpected data shape: {}", e)))
    }

    // ========================================================================
    // Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self)
    }

    /// Get ticker for a market
    ///
    /// # Arguments
    /// * `market` - Market name (e.g., "BTCUSDT")
    pub async fn get_market_ticker(&self, market: &str) -> RestResult<Value> {
        self.market().get_market_ticker(market).await
    }

    /// Get tickers for every market
    pub async fn get_all_tickers(&self) -> RestResult<Value> {
        self.market().get_all_tickers().await
    }

    /// Get order book depth
    ///
    /// # Arguments
    /// * `market` - Market name
    /// * `limit` - Number of price levels (default 10)
    pub async fn get_market_depth(&self, market: &str, limit: Option<u32>) -> RestResult<Value> {
        self.market().get_market_depth(market, limit).await
    }

    /// Get candlestick data
    pub async fn get_market_kline(
        &self,
        market: &str,
        period: Option<KlinePeriod>,
        limit: Option<u32>,
    ) -> RestResult<Value> {
        self.market().get_market_kline(market, period, limit).await
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self)
    }

    /// Get spot balances
    pub async fn get_spot_balance(&self) -> RestResult<Value> {
        self.account().get_spot_balance().await
    }

    // ========================================================================
    // Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self)
    }

    /// Place a new order
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Value> {
        self.trading().place_order(order).await
    }

    /// Cancel an order
    pub async fn cancel_order(&self, market: &str, order_id: u64) -> RestResult<Value> {
        self.trading().cancel_order(market, order_id).await
    }
}

impl std::fmt::Debug for CoinExRestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinExRestClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
