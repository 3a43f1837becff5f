//! HTTP transport and envelope decoding
//!
//! The transport performs exactly one HTTP exchange per call and never
//! retries. [`decode_response`] then applies the status, JSON and envelope
//! checks in that order.

use crate::client::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::types::ApiResponse;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// A fully signed request as handed to the transport
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Raw response as received from the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes one HTTP exchange
///
/// Implementations must not retry; connection pooling, TLS and timeouts are
/// theirs to manage.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse>;
}

/// Default transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport honoring the timeout and user agent in `config`
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client })
    }

    /// Wrap an existing `reqwest` client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

const DEFAULT_USER_AGENT: &str = concat!("coinex-rest/", env!("CARGO_PKG_VERSION"));

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

/// Validate a raw response and unwrap the envelope payload
///
/// 1. Status other than 200 → [`RestError::Status`], body left undecoded
/// 2. Body not JSON → [`RestError::Json`]
/// 3. Envelope `code != 0` → [`RestError::Api`]
pub fn decode_response(response: HttpResponse) -> RestResult<Value> {
    if response.status != 200 {
        return Err(RestError::Status {
            status: response.status,
            body: response.body,
        });
    }

    let envelope = ApiResponse::from_body(&response.body)?;
    debug!(code = ?envelope.code, "Decoded response envelope");

    envelope.into_result()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Transport stub returning a canned response and recording requests
    #[derive(Debug)]
    pub struct StubTransport {
        response: HttpResponse,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl StubTransport {
        pub fn new(status: u16, body: impl Into<String>) -> Self {
            Self {
                response: HttpResponse::new(status, body),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(data: Value) -> Self {
            let envelope = serde_json::json!({"code": 0, "data": data, "message": "OK"});
            Self::new(200, envelope.to_string())
        }

        pub fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last_request(&self) -> HttpRequest {
            self.requests().pop().expect("no request was sent")
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn send(&self, request: HttpRequest) -> RestResult<HttpResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self.response.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_success_returns_data() {
        let response = HttpResponse::new(200, r#"{"code":0,"data":{"foo":1}}"#);
        let data = decode_response(response).unwrap();
        assert_eq!(data, json!({"foo": 1}));
    }

    #[test]
    fn test_non_200_skips_json_decode() {
        // valid success envelope, still a transport error
        let response = HttpResponse::new(500, r#"{"code":0,"data":{}}"#);
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(
            matches!(err, RestError::Status { status: 500, ref body } if body.contains("code"))
        );

        let response = HttpResponse::new(404, "<html>not found</html>");
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_other_2xx_is_rejected() {
        let err = decode_response(HttpResponse::new(204, "")).unwrap_err();
        assert!(matches!(err, RestError::Status { status: 204, .. }));
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let response = HttpResponse::new(200, "<html>gateway</html>");
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_non_object_body_is_decode_error() {
        // serde would otherwise map an array onto the envelope fields by position
        for body in [r#"[0,"ok",{"foo":1}]"#, "0", r#""OK""#, "null"] {
            let err = decode_response(HttpResponse::new(200, body)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Decode, "body {body}");
            assert!(matches!(err, RestError::Decode(_)), "body {body}");
        }
    }

    #[test]
    fn test_api_error_carries_code_and_message() {
        let response = HttpResponse::new(200, r#"{"code":40,"message":"bad"}"#);
        let err = decode_response(response).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Application);
        assert_eq!(err.api_code(), Some(40));
        assert_eq!(err.to_string(), "API error 40: bad");
    }

    #[test]
    fn test_reqwest_transport_builds_from_config() {
        let config = ClientConfig::new().with_timeout(5).with_user_agent("test-agent");
        assert!(ReqwestTransport::new(&config).is_ok());
    }
}
