//! Error types for REST API operations

use crate::types::ErrorResponse;
use serde_json::Value;

/// Errors that can occur during REST API operations
///
/// The set is closed and every failure is fatal to the calling operation:
/// the client never retries internally. Anything that is not an HTTP
/// outcome or a local precondition failure propagates unmodified.
#[derive(Debug, thiserror::Error)]
pub enum BitpinError {
    /// The exchange responded with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided detail message
        message: String,
        /// Machine-readable error code, when the server sent one
        code: Option<String>,
        /// Raw JSON error body for detailed introspection
        body: Option<Value>,
    },

    /// The request produced no usable response
    ///
    /// Covers both "no response received" (network/timeout failure) and
    /// "error sending request" (the request could not be built or sent).
    #[error("Request error: {message}")]
    Request {
        /// What went wrong
        message: String,
        /// Underlying transport error, when one exists
        #[source]
        source: Option<reqwest::Error>,
    },

    /// A local precondition failed before any network activity
    ///
    /// Missing credentials for authenticate, missing access token for a
    /// signed call, missing refresh token for a token refresh. Never
    /// involves a network call.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BitpinError {
    /// Classify a non-2xx response into an API error
    ///
    /// The body is expected to be `{detail, code?, messages?}`; anything
    /// else falls back to the raw text, then to the bare status.
    pub(crate) fn from_error_response(status: u16, body_text: &str) -> Self {
        let body: Option<Value> = serde_json::from_str(body_text).ok();
        let parsed = body
            .as_ref()
            .and_then(|v| serde_json::from_value::<ErrorResponse>(v.clone()).ok());

        let message = match &parsed {
            Some(e) => e.detail.clone(),
            None if body_text.trim().is_empty() => format!("HTTP {}", status),
            None => body_text.to_string(),
        };

        Self::Api {
            status,
            message,
            code: parsed.and_then(|e| e.code),
            body,
        }
    }

    /// Classify a transport failure
    ///
    /// Timeouts and connection failures mean the request went out but no
    /// response came back; everything else failed before or during send.
    pub(crate) fn from_transport(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() || error.is_connect() {
            "no response received from Bitpin"
        } else if error.is_decode() {
            "error decoding response from Bitpin"
        } else {
            "error sending request to Bitpin"
        };

        Self::Request {
            message: message.to_string(),
            source: Some(error),
        }
    }

    /// Get the HTTP status code, if this is an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is an API error (server responded with non-2xx)
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Check if this is a request/transport error
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Check if this is a local configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<serde_json::Error> for BitpinError {
    fn from(error: serde_json::Error) -> Self {
        Self::Request {
            message: format!("error building request: {}", error),
            source: None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, BitpinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_with_detail() {
        let err = BitpinError::from_error_response(429, r#"{"detail": "rate limited"}"#);
        match &err {
            BitpinError::Api {
                status,
                message,
                body,
                ..
            } => {
                assert_eq!(*status, 429);
                assert_eq!(message, "rate limited");
                assert!(body.is_some());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(err.status(), Some(429));
        assert!(err.is_api());
    }

    #[test]
    fn test_error_response_with_code_and_messages() {
        let err = BitpinError::from_error_response(
            400,
            r#"{"detail": "invalid order", "code": "invalid", "messages": [{"price": "required"}]}"#,
        );
        match err {
            BitpinError::Api { code, body, .. } => {
                assert_eq!(code.as_deref(), Some("invalid"));
                let body = body.unwrap();
                assert_eq!(body["messages"][0]["price"], "required");
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_non_json_body() {
        let err = BitpinError::from_error_response(502, "Bad Gateway");
        match err {
            BitpinError::Api {
                status,
                message,
                body,
                ..
            } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
                assert!(body.is_none());
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_error_response_empty_body() {
        let err = BitpinError::from_error_response(500, "");
        match err {
            BitpinError::Api { message, .. } => assert_eq!(message, "HTTP 500"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = BitpinError::Config("access token is required for signed requests".into());
        assert!(err.is_config());
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
