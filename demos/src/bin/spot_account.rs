//! Demo: spot balances and recent order history
//!
//! Run: COINEX_ACCESS_ID=... COINEX_SECRET_KEY=... cargo run --bin spot_account [MARKET]

use coinex_rest::{CoinExRestClient, ErrorKind};
use colored::*;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let market = std::env::args().nth(1).unwrap_or_else(|| "BTCUSDT".to_string());
    let client = CoinExRestClient::from_env()?;

    println!("{}", "--- Spot Balances ---".cyan().bold());
    match client.get_spot_balance().await {
        Ok(Value::Array(balances)) => {
            for balance in balances {
                println!(
                    "  {:<8} available {:>20}  frozen {:>20}",
                    balance["ccy"].as_str().unwrap_or("?"),
                    balance["available"].as_str().unwrap_or("0"),
                    balance["frozen"].as_str().unwrap_or("0"),
                );
            }
        }
        Ok(other) => println!("  {}", other),
        Err(e) => report(&e),
    }
    println!();

    println!("{}", format!("--- Order History ({}) ---", market).cyan().bold());
    match client.trading().get_order_history(&market, Some(10)).await {
        Ok(orders) => println!("{}", serde_json::to_string_pretty(&orders)?),
        Err(e) => report(&e),
    }

    Ok(())
}

fn report(err: &coinex_rest::RestError) {
    let label = match err.kind() {
        ErrorKind::Validation => "Invalid request:",
        ErrorKind::Transport => "Request failed:",
        ErrorKind::Decode => "Unreadable response:",
        ErrorKind::Application => "Exchange rejected:",
    };
    println!("  {} {}", label.red(), err);
}
