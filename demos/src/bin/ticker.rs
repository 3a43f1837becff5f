//! Demo: fetch the BTCUSDT ticker
//!
//! Run: COINEX_ACCESS_ID=... COINEX_SECRET_KEY=... cargo run --bin ticker [MARKET]
//!
//! Both variables are required even though the ticker is a public endpoint:
//! every request is signed, and empty credentials are rejected at startup.

use coinex_rest::CoinExRestClient;
use colored::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());
    let client = CoinExRestClient::from_env()?;

    match client.get_market_ticker(&market).await {
        Ok(ticker) => {
            println!("{} {}", "✓".green(), market.bold());
            println!("{}", serde_json::to_string_pretty(&ticker)?);
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    }

    Ok(())
}
