//! Asset and balance endpoints

use crate::client::CoinExRestClient;
use crate::error::RestResult;
use crate::request::{QueryParams, RequestDescriptor};
use serde_json::Value;
use tracing::instrument;

/// Asset and balance endpoints
pub struct AccountEndpoints<'a> {
    client: &'a CoinExRestClient,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a CoinExRestClient) -> Self {
        Self { client }
    }

    /// Get coin info, for one currency or all of them
    ///
    /// # Arguments
    /// * `ccy` - Currency (e.g., "USDT"); `None` returns every coin
    #[instrument(skip(self))]
    pub async fn get_coin_info(&self, ccy: Option<&str>) -> RestResult<Value> {
        let query = QueryParams::new().push_opt("ccy", ccy);
        let request = RequestDescriptor::get("/assets/info").with_query(&query)?;
        self.client.execute(request).await
    }

    /// Get spot account balances
    #[instrument(skip(self))]
    pub async fn get_spot_balance(&self) -> RestResult<Value> {
        self.client
            .execute(RequestDescriptor::get("/assets/spot/balance"))
            .await
    }

    /// Get the deposit address for a currency on a chain
    ///
    /// # Arguments
    /// * `ccy` - Currency (e.g., "USDT")
    /// * `chain` - Chain name (e.g., "CSC", "TRC20")
    #[instrument(skip(self))]
    pub async fn get_deposit_address(&self, ccy: &str, chain: &str) -> RestResult<Value> {
        let query = QueryParams::new().push("ccy", ccy).push("chain", chain);
        let request = RequestDescriptor::get("/assets/deposit-address").with_query(&query)?;
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::{ClientConfig, CoinExRestClient};
    use crate::transport::testing::StubTransport;
    use coinex_auth::Credentials;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_account_requests() {
        let stub = Arc::new(StubTransport::ok(json!([{"ccy": "USDT", "available": "10"}])));
        let creds = Credentials::new("test-access-id", "secret").unwrap();
        let client = CoinExRestClient::with_transport(creds, ClientConfig::default(), stub.clone());
        let account = client.account();

        let balances = account.get_spot_balance().await.unwrap();
        assert_eq!(balances[0]["ccy"], "USDT");
        assert_eq!(
            stub.last_request().url,
            "https://api.coinex.com/v2/assets/spot/balance"
        );

        account.get_coin_info(None).await.unwrap();
        assert_eq!(stub.last_request().url, "https://api.coinex.com/v2/assets/info");

        account.get_coin_info(Some("BTC")).await.unwrap();
        assert_eq!(
            stub.last_request().url,
            "https://api.coinex.com/v2/assets/info?ccy=BTC"
        );

        account.get_deposit_address("USDT", "CSC").await.unwrap();
        assert_eq!(
            stub.last_request().url,
            "https://api.coinex.com/v2/assets/deposit-address?ccy=USDT&chain=CSC"
        );

        assert!(stub.requests().iter().all(|r| r.body.is_none()));
    }
}
