//! Common test utilities for coinex-rest integration tests

use coinex_rest::{ClientConfig, CoinExRestClient, Credentials};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const ACCESS_ID: &str = "test-access-id";
pub const SECRET_KEY: &str = "test-secret-key";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Test credentials
pub fn credentials() -> Credentials {
    Credentials::new(ACCESS_ID, SECRET_KEY).expect("valid test credentials")
}

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> CoinExRestClient {
    let config = ClientConfig::new()
        .with_base_url(server.uri())
        .with_timeout(5);
    CoinExRestClient::with_config(credentials(), config).expect("client builds")
}

/// Successful envelope around `data`
pub fn ok_envelope(data: Value) -> Value {
    json!({"code": 0, "data": data, "message": "OK"})
}
