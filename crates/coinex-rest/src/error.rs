//! Error types for REST API operations

use coinex_auth::AuthError;
use reqwest::Method;

/// Broad failure category of a [`RestError`]
///
/// Every public operation can fail with any of these kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rejected locally before any network call
    Validation,
    /// Non-200 status or the HTTP exchange itself failed
    Transport,
    /// HTTP 200 but the body is not a usable envelope
    Decode,
    /// Envelope carried a non-zero `code`
    Application,
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request parameters failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Only GET and POST are signed by this client
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    /// Credentials could not be loaded or attached
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Server answered with a status other than 200
    #[error("Request error {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Raw response text
        body: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not valid JSON
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Response JSON does not have the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Exchange returned a non-zero envelope code
    #[error("API error {code}: {message}")]
    Api {
        /// Exchange error code
        code: i64,
        /// Exchange error message
        message: String,
    },
}

impl RestError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::UnsupportedMethod(_) | Self::Auth(_) => {
                ErrorKind::Validation
            }
            Self::Status { .. } | Self::Http(_) => ErrorKind::Transport,
            Self::Json(_) | Self::Decode(_) => ErrorKind::Decode,
            Self::Api { .. } => ErrorKind::Application,
        }
    }

    /// HTTP status for transport errors that carry one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Exchange error code for application errors
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            RestError::Validation("Limit orders require a price".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            RestError::UnsupportedMethod(Method::DELETE).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            RestError::Status {
                status: 500,
                body: "oops".into(),
            }
            .kind(),
            ErrorKind::Transport
        );
        assert_eq!(RestError::Decode("missing code".into()).kind(), ErrorKind::Decode);
        assert_eq!(
            RestError::Api {
                code: 40,
                message: "bad".into(),
            }
            .kind(),
            ErrorKind::Application
        );
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: RestError = serde_json::from_str::<serde_json::Value>("not json")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_accessors() {
        let status = RestError::Status {
            status: 502,
            body: String::new(),
        };
        assert_eq!(status.status(), Some(502));
        assert_eq!(status.api_code(), None);

        let api = RestError::Api {
            code: 3109,
            message: "balance not enough".into(),
        };
        assert_eq!(api.api_code(), Some(3109));
        assert_eq!(api.status(), None);
        assert_eq!(api.to_string(), "API error 3109: balance not enough");
    }

    #[test]
    fn test_auth_error_is_validation() {
        let err: RestError = AuthError::EnvVarNotSet("COINEX_SECRET_KEY".into()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("COINEX_SECRET_KEY"));
    }
}
