//! Credentials and request signing for the CoinEx v2 API
//!
//! Every CoinEx v2 request carries three authentication headers:
//!
//! - `X-COINEX-KEY`: the access id
//! - `X-COINEX-SIGN`: lowercase hex HMAC-SHA256 of the canonical string
//! - `X-COINEX-TIMESTAMP`: epoch milliseconds, identical to the signed value
//!
//! The canonical string is `method + path_with_query + body + timestamp`
//! with no separators. GET requests always sign an empty body.
//!
//! # Example
//!
//! ```no_run
//! use coinex_auth::{Credentials, RequestSigner};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let signer = RequestSigner::new(&creds);
//!
//! let signature = signer.sign("GET", "/spot/ticker?market=BTCUSDT", "");
//! println!("{} signed at {}", signature, signer.timestamp());
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;

pub use credentials::{generate_timestamp, Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
