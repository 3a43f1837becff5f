//! Credentials and HMAC-SHA256 signing for CoinEx v2
//!
//! # Security
//!
//! The secret key is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Environment variable holding the access id
pub const ACCESS_ID_ENV: &str = "COINEX_ACCESS_ID";
/// Environment variable holding the secret key
pub const SECRET_KEY_ENV: &str = "COINEX_SECRET_KEY";

/// Current time as decimal milliseconds since the Unix epoch
pub fn generate_timestamp() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis();
    millis.to_string()
}

/// API credentials for authenticated requests
///
/// Immutable once constructed. The secret key is zeroized when the
/// credentials are dropped.
pub struct Credentials {
    /// Access id (public)
    access_id: String,
    /// Secret key used as the HMAC key
    secret_key: SecretString,
}

impl Credentials {
    /// Create new credentials from an access id and secret key
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidCredentials`] if either value is empty.
    pub fn new(access_id: impl Into<String>, secret_key: impl Into<String>) -> AuthResult<Self> {
        let access_id = access_id.into();
        let secret_key = secret_key.into();

        if access_id.is_empty() {
            return Err(AuthError::InvalidCredentials("access id is empty".to_string()));
        }
        if secret_key.is_empty() {
            return Err(AuthError::InvalidCredentials("secret key is empty".to_string()));
        }

        Ok(Self {
            access_id,
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINEX_ACCESS_ID` and `COINEX_SECRET_KEY` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let access_id = std::env::var(ACCESS_ID_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(ACCESS_ID_ENV.to_string()))?;
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_KEY_ENV.to_string()))?;

        Self::new(access_id, secret_key)
    }

    /// Get the access id
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// Sign a request for the CoinEx v2 API
    ///
    /// Signature algorithm:
    /// 1. message = method + full_path + body + timestamp
    /// 2. HMAC-SHA256(secret_key, message)
    /// 3. Lowercase hex encode
    ///
    /// # Arguments
    /// * `method` - Uppercase HTTP verb ("GET" or "POST")
    /// * `full_path` - Request path including the encoded query string, if any
    /// * `body` - Exact POST payload, or "" for GET and empty POST
    /// * `timestamp` - Epoch milliseconds sent in `X-COINEX-TIMESTAMP`
    pub fn sign(&self, method: &str, full_path: &str, body: &str, timestamp: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(method.as_bytes());
        mac.update(full_path.as_bytes());
        mac.update(body.as_bytes());
        mac.update(timestamp.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            access_id: self.access_id.clone(),
            secret_key: SecretString::from(self.secret_key.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .access_id
            .char_indices()
            .nth(8)
            .map_or(self.access_id.as_str(), |(idx, _)| &self.access_id[..idx]);

        f.debug_struct("Credentials")
            .field("access_id", &format!("{}...", visible))
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

/// Signs a single request with one fixed timestamp
///
/// The timestamp is captured at construction, so the value embedded in the
/// signature and the value sent in the header are the same string.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer stamped with the current time
    pub fn new(credentials: &'a Credentials) -> Self {
        Self::with_timestamp(credentials, generate_timestamp())
    }

    /// Create a request signer with an explicit timestamp
    pub fn with_timestamp(credentials: &'a Credentials, timestamp: impl Into<String>) -> Self {
        Self {
            credentials,
            timestamp: timestamp.into(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the access id
    pub fn access_id(&self) -> &str {
        self.credentials.access_id()
    }

    /// Sign the request
    pub fn sign(&self, method: &str, full_path: &str, body: &str) -> String {
        self.credentials
            .sign(method, full_path, body, &self.timestamp)
    }
}
