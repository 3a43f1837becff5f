//! REST API client for CoinEx spot trading
//!
//! This crate provides a signed REST client for the CoinEx v2 API,
//! covering market data, balances, and order execution.
//!
//! # Features
//!
//! - **Market Data**: Markets, tickers, depth, klines
//! - **Account**: Coin info, spot balances, deposit addresses
//! - **Trading**: Place and cancel orders, fills, order history
//!
//! # Authentication
//!
//! Every request is signed with HMAC-SHA256 over
//! `method + path_with_query + body + timestamp`, using the secret key.
//! See [`coinex_auth`] for the signing details.
//!
//! # Example
//!
//! ```no_run
//! use coinex_rest::{CoinExRestClient, Credentials, OrderRequest, OrderSide};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env()?;
//!     let client = CoinExRestClient::new(creds)?;
//!
//!     let ticker = client.get_market_ticker("BTCUSDT").await?;
//!     println!("BTCUSDT: {}", ticker);
//!
//!     let amount = Decimal::new(1, 3);
//!     let order = OrderRequest::limit("BTCUSDT", OrderSide::Buy, amount, Decimal::from(30000));
//!     let placed = client.place_order(&order).await?;
//!     println!("Placed: {}", placed);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Every operation may fail with any [`ErrorKind`]: validation before the
//! request is built, transport (non-200 status or network failure), decode
//! (body is not a usable envelope) or application (non-zero envelope code).
//! Nothing is retried; backoff is left to the caller.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod transport;
pub mod types;

// Re-export main types
pub use client::{ClientConfig, CoinExRestClient, BASE_URL};
pub use coinex_auth::Credentials;
pub use error::{ErrorKind, RestError, RestResult};
pub use request::{QueryParams, RequestDescriptor};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

// Re-export endpoint-specific types
pub use types::{ApiResponse, KlinePeriod, MarketType, OrderRequest, OrderSide, OrderType};
