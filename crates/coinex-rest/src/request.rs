//! Request building and signing
//!
//! A [`RequestDescriptor`] is built fresh for every call. Its query string is
//! encoded exactly once and that same string feeds both the signature and the
//! wire URL, so the two can never drift apart.

use crate::error::{RestError, RestResult};
use coinex_auth::{AuthError, RequestSigner};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

const HEADER_KEY: &str = "x-coinex-key";
const HEADER_SIGN: &str = "x-coinex-sign";
const HEADER_TIMESTAMP: &str = "x-coinex-timestamp";

/// Headers shared by every request
///
/// Treated as read-only; each call copies it before adding auth headers.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Ordered query parameters with absent values dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn push(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    /// Append a parameter only if it has a value
    pub fn push_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-encode the parameters in insertion order
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| RestError::Validation(format!("Failed to encode query: {}", e)))
    }
}

/// Serialize a payload as JSON with every object's keys sorted
///
/// Key order depends only on key names, never on field declaration or
/// insertion order, so the same logical payload always yields the same bytes.
pub fn canonical_json<T: Serialize + ?Sized>(payload: &T) -> RestResult<String> {
    let value = serde_json::to_value(payload)
        .map_err(|e| RestError::Validation(format!("Failed to serialize body: {}", e)))?;
    serde_json::to_string(&Canonical(&value))
        .map_err(|e| RestError::Validation(format!("Failed to serialize body: {}", e)))
}

struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut entries: Vec<(&String, &Value)> = map.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));

                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(key, &Canonical(value))?;
                }
                out.end()
            }
            Value::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(&Canonical(item))?;
                }
                out.end()
            }
            other => other.serialize(serializer),
        }
    }
}

/// Logical description of one API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: Option<String>,
    body: Option<String>,
}

impl RequestDescriptor {
    /// Create a descriptor for any method
    ///
    /// # Errors
    /// Returns [`RestError::UnsupportedMethod`] for anything but GET or POST.
    pub fn new(method: Method, path: impl Into<String>) -> RestResult<Self> {
        if method != Method::GET && method != Method::POST {
            return Err(RestError::UnsupportedMethod(method));
        }

        Ok(Self {
            method,
            path: path.into(),
            query: None,
            body: None,
        })
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            query: None,
            body: None,
        }
    }

    /// Attach query parameters, encoding them once
    pub fn with_query(mut self, params: &QueryParams) -> RestResult<Self> {
        self.query = if params.is_empty() {
            None
        } else {
            Some(params.encode()?)
        };
        Ok(self)
    }

    /// Attach a canonical JSON body
    ///
    /// Bodies only travel with POST; on GET this is a validation error.
    pub fn with_json_body<T: Serialize + ?Sized>(mut self, payload: &T) -> RestResult<Self> {
        if self.method != Method::POST {
            return Err(RestError::Validation(format!(
                "{} requests cannot carry a body",
                self.method
            )));
        }
        self.body = Some(canonical_json(payload)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Path plus `?`-prefixed query string, if any
    pub fn full_path(&self) -> String {
        match &self.query {
            Some(query) => format!("{}?{}", self.path, query),
            None => self.path.clone(),
        }
    }

    /// Sign the request and produce everything needed to send it
    pub fn sign(
        self,
        signer: &RequestSigner<'_>,
        template: &HeaderMap,
    ) -> RestResult<SignedRequest> {
        let full_path = self.full_path();
        // GET never signs a body; query parameters are part of the path
        let signing_body = if self.method == Method::POST {
            self.body.as_deref().unwrap_or("")
        } else {
            ""
        };
        let signature = signer.sign(self.method.as_str(), &full_path, signing_body);

        let mut headers = template.clone();
        headers.insert(
            HeaderName::from_static(HEADER_KEY),
            header_value(signer.access_id(), "access id")?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_SIGN),
            header_value(&signature, "signature")?,
        );
        headers.insert(
            HeaderName::from_static(HEADER_TIMESTAMP),
            header_value(signer.timestamp(), "timestamp")?,
        );

        Ok(SignedRequest {
            method: self.method,
            full_path,
            headers,
            body: self.body,
        })
    }
}

fn header_value(value: &str, what: &str) -> RestResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        RestError::Auth(AuthError::InvalidCredentials(format!(
            "{} is not a valid header value",
            what
        )))
    })
}

/// A request ready for the transport
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: Method,
    /// Exactly the path and query that were signed
    pub full_path: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinex_auth::Credentials;
    use serde_json::json;

    const TIMESTAMP: &str = "1700000000000";

    fn creds() -> Credentials {
        Credentials::new("test-access-id", "secret").unwrap()
    }

    #[test]
    fn test_none_values_are_dropped() {
        let params = QueryParams::new()
            .push("market", "BTCUSDT")
            .push_opt::<u32>("limit", None)
            .push_opt("ccy", Some("USDT"));

        let encoded = params.encode().unwrap();
        assert_eq!(encoded, "market=BTCUSDT&ccy=USDT");
        assert!(!encoded.contains("limit"));
    }

    #[test]
    fn test_query_preserves_insertion_order() {
        let params = QueryParams::new()
            .push("market", "BTCUSDT")
            .push("type", "1min")
            .push("limit", 100);
        assert_eq!(params.encode().unwrap(), "market=BTCUSDT&type=1min&limit=100");
    }

    #[test]
    fn test_query_is_form_encoded() {
        let params = QueryParams::new().push("client_id", "a b&c=d");
        assert_eq!(params.encode().unwrap(), "client_id=a+b%26c%3Dd");
    }

    #[test]
    fn test_empty_query_leaves_bare_path() {
        let request = RequestDescriptor::get("/spot/allTickers")
            .with_query(&QueryParams::new().push_opt::<&str>("market", None))
            .unwrap();
        assert_eq!(request.full_path(), "/spot/allTickers");
    }

    #[test]
    fn test_canonical_json_sorts_keys() {
        let body = canonical_json(&json!({
            "type": "limit",
            "amount": "1",
            "market": "BTCUSDT",
            "nested": {"z": 1, "a": [ {"y": 2, "b": 3} ]}
        }))
        .unwrap();

        assert_eq!(
            body,
            r#"{"amount":"1","market":"BTCUSDT","nested":{"a":[{"b":3,"y":2}],"z":1},"type":"limit"}"#
        );
    }

    #[test]
    fn test_canonical_json_ignores_field_order() {
        #[derive(Serialize)]
        struct Forward {
            market: &'static str,
            amount: &'static str,
        }
        #[derive(Serialize)]
        struct Backward {
            amount: &'static str,
            market: &'static str,
        }

        let forward = Forward {
            market: "BTCUSDT",
            amount: "2",
        };
        let backward = Backward {
            amount: "2",
            market: "BTCUSDT",
        };

        let a = canonical_json(&forward).unwrap();
        let b = canonical_json(&backward).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, canonical_json(&forward).unwrap());
    }

    #[test]
    fn test_unsupported_method_rejected() {
        let err = RequestDescriptor::new(Method::DELETE, "/spot/order").unwrap_err();
        assert!(matches!(err, RestError::UnsupportedMethod(m) if m == Method::DELETE));
        assert!(RequestDescriptor::new(Method::GET, "/spot/market").is_ok());
    }

    #[test]
    fn test_get_cannot_carry_body() {
        let err = RequestDescriptor::get("/spot/market")
            .with_json_body(&json!({"market": "BTCUSDT"}))
            .unwrap_err();
        assert!(matches!(err, RestError::Validation(_)));
    }

    #[test]
    fn test_get_signs_path_with_query_and_empty_body() {
        let creds = creds();
        let signer = RequestSigner::with_timestamp(&creds, TIMESTAMP);
        let signed = RequestDescriptor::get("/spot/ticker")
            .with_query(&QueryParams::new().push("market", "BTCUSDT"))
            .unwrap()
            .sign(&signer, &default_headers())
            .unwrap();

        assert_eq!(signed.full_path, "/spot/ticker?market=BTCUSDT");
        assert!(signed.body.is_none());
        assert_eq!(
            signed.headers.get("x-coinex-sign").unwrap(),
            creds.sign("GET", "/spot/ticker?market=BTCUSDT", "", TIMESTAMP).as_str()
        );
    }

    #[test]
    fn test_post_signs_exact_body() {
        let creds = creds();
        let signer = RequestSigner::with_timestamp(&creds, TIMESTAMP);
        let signed = RequestDescriptor::post("/spot/cancel-order")
            .with_json_body(&json!({"order_id": 42, "market": "BTCUSDT"}))
            .unwrap()
            .sign(&signer, &default_headers())
            .unwrap();

        let body = signed.body.as_deref().unwrap();
        assert_eq!(body, r#"{"market":"BTCUSDT","order_id":42}"#);
        assert_eq!(
            signed.headers.get("x-coinex-sign").unwrap(),
            "0039781ef7f1a4af8a6288344efa4b67a07fdc15f6b4546d291107bf485d87d1"
        );
    }

    #[test]
    fn test_headers_overlay_template() {
        let creds = creds();
        let signer = RequestSigner::with_timestamp(&creds, TIMESTAMP);
        let template = default_headers();
        let signed = RequestDescriptor::get("/spot/market")
            .sign(&signer, &template)
            .unwrap();

        assert_eq!(
            signed.headers.get(CONTENT_TYPE).unwrap(),
            "application/json; charset=utf-8"
        );
        assert_eq!(signed.headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(signed.headers.get("x-coinex-key").unwrap(), "test-access-id");
        assert_eq!(signed.headers.get("x-coinex-timestamp").unwrap(), TIMESTAMP);

        // template untouched
        assert_eq!(template.len(), 2);
        assert!(template.get("x-coinex-key").is_none());
    }
}
