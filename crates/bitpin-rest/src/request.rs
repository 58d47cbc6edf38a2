//! Request construction pipeline
//!
//! Merges per-call options with client defaults, injects the bearer
//! token for signed calls, and shapes the payload (GET requests never
//! carry a body). The pipeline is a pure function over [`RequestOptions`]
//! so it can be exercised without any network.

use crate::error::{BitpinError, RestResult};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Reserved body key whose contents are spliced into the request options
///
/// A caller may embed `{"requests_params": {...}}` inside a JSON body to
/// pass extra HTTP options (headers, query params, a timeout override)
/// alongside the payload. The key is removed before dispatch and never
/// reaches the wire.
pub const SPLICE_KEY: &str = "requests_params";

/// Per-call HTTP options, merged with the client's defaults
///
/// Recognized splice fields under [`SPLICE_KEY`]: `headers` (object of
/// string values), `params` (object merged into the query string), and
/// `timeout` (milliseconds). Anything else is ignored.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: Vec<(String, String)>,
    /// Extra query parameters
    pub query: Vec<(String, String)>,
    /// Per-call timeout override
    pub timeout: Option<Duration>,
    /// JSON payload (moved to the query string for GET requests)
    pub data: Option<Value>,
}

impl RequestOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a request header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the JSON payload
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Produce the final options to dispatch
///
/// Steps, in order: default the timeout, splice `requests_params` out of
/// the body, inject the bearer token for signed calls (failing without
/// one - no network is attempted), and move a GET payload into the query
/// string.
pub(crate) fn build(
    method: &Method,
    signed: bool,
    access_token: Option<&str>,
    default_timeout: Duration,
    mut opts: RequestOptions,
) -> RestResult<RequestOptions> {
    if opts.timeout.is_none() {
        opts.timeout = Some(default_timeout);
    }

    if let Some(Value::Object(data)) = opts.data.as_mut() {
        if let Some(spliced) = data.remove(SPLICE_KEY) {
            apply_spliced(&mut opts, &spliced);
        }
    }

    if signed {
        let token = access_token.ok_or_else(|| {
            BitpinError::Config("access token is required for signed requests".into())
        })?;
        // Only the Authorization header is overwritten; caller headers survive
        opts.headers
            .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
        opts.headers
            .push(("Authorization".to_string(), format!("Bearer {}", token)));
    }

    if *method == Method::GET && opts.data.is_some() {
        match opts.data.take() {
            Some(Value::Object(data)) => {
                for (key, value) in data {
                    opts.query.push((key, query_value(&value)));
                }
            }
            // A non-object payload has no query representation
            Some(_) => {
                return Err(BitpinError::Config(
                    "GET request data must be a JSON object".into(),
                ))
            }
            None => {}
        }
    }

    Ok(opts)
}

/// Merge a `requests_params` object into the top-level options
fn apply_spliced(opts: &mut RequestOptions, spliced: &Value) {
    let Value::Object(map) = spliced else {
        return;
    };

    if let Some(Value::Object(headers)) = map.get("headers") {
        for (name, value) in headers {
            if let Value::String(value) = value {
                opts.headers.push((name.clone(), value.clone()));
            }
        }
    }

    if let Some(Value::Object(params)) = map.get("params") {
        for (key, value) in params {
            opts.query.push((key.clone(), query_value(value)));
        }
    }

    if let Some(ms) = map.get("timeout").and_then(Value::as_u64) {
        opts.timeout = Some(Duration::from_millis(ms));
    }
}

/// Render a JSON value as a query-string value
///
/// Strings pass through verbatim and arrays are comma-joined (the same
/// contract as the comma-joined order-status path parameter).
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(query_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DEFAULT: Duration = Duration::from_secs(50);

    #[test]
    fn test_default_timeout_applied() {
        let opts = build(&Method::POST, false, None, DEFAULT, RequestOptions::new()).unwrap();
        assert_eq!(opts.timeout, Some(DEFAULT));
    }

    #[test]
    fn test_caller_timeout_preserved() {
        let opts = RequestOptions::new().with_timeout(Duration::from_secs(5));
        let opts = build(&Method::POST, false, None, DEFAULT, opts).unwrap();
        assert_eq!(opts.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_signed_without_token_fails() {
        let err = build(&Method::GET, true, None, DEFAULT, RequestOptions::new()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_signed_injects_bearer_header() {
        let opts = build(&Method::GET, true, Some("TOKEN"), DEFAULT, RequestOptions::new()).unwrap();
        assert!(opts
            .headers
            .contains(&("Authorization".to_string(), "Bearer TOKEN".to_string())));
    }

    #[test]
    fn test_signed_overwrites_authorization_only() {
        let opts = RequestOptions::new()
            .with_header("authorization", "Bearer stale")
            .with_header("X-Custom", "kept");
        let opts = build(&Method::GET, true, Some("fresh"), DEFAULT, opts).unwrap();

        let auth: Vec<_> = opts
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "Bearer fresh");
        assert!(opts
            .headers
            .contains(&("X-Custom".to_string(), "kept".to_string())));
    }

    #[test]
    fn test_get_moves_data_to_query() {
        let opts = RequestOptions::new().with_data(json!({
            "symbol": "BTC_USDT",
            "limit": 10,
            "ids_in": ["1", "2", "3"],
        }));
        let opts = build(&Method::GET, false, None, DEFAULT, opts).unwrap();

        assert!(opts.data.is_none());
        assert!(opts
            .query
            .contains(&("symbol".to_string(), "BTC_USDT".to_string())));
        assert!(opts.query.contains(&("limit".to_string(), "10".to_string())));
        assert!(opts
            .query
            .contains(&("ids_in".to_string(), "1,2,3".to_string())));
    }

    #[test]
    fn test_get_rejects_non_object_data() {
        let opts = RequestOptions::new().with_data(json!(["not", "an", "object"]));
        let err = build(&Method::GET, false, None, DEFAULT, opts).unwrap_err();
        assert!(err.is_config());

        // POST passes the same payload through untouched
        let opts = RequestOptions::new().with_data(json!(["not", "an", "object"]));
        let opts = build(&Method::POST, false, None, DEFAULT, opts).unwrap();
        assert_eq!(opts.data, Some(json!(["not", "an", "object"])));
    }

    #[test]
    fn test_post_keeps_body() {
        let opts = RequestOptions::new().with_data(json!({"price": "100"}));
        let opts = build(&Method::POST, false, None, DEFAULT, opts).unwrap();
        assert_eq!(opts.data, Some(json!({"price": "100"})));
        assert!(opts.query.is_empty());
    }

    #[test]
    fn test_splice_key_merged_and_removed() {
        let opts = RequestOptions::new().with_data(json!({
            "price": "100",
            SPLICE_KEY: {
                "headers": {"X-Trace": "abc"},
                "params": {"dry_run": true},
                "timeout": 2000,
            },
        }));
        let opts = build(&Method::POST, false, None, DEFAULT, opts).unwrap();

        // Spliced options land at the top level
        assert!(opts
            .headers
            .contains(&("X-Trace".to_string(), "abc".to_string())));
        assert!(opts
            .query
            .contains(&("dry_run".to_string(), "true".to_string())));
        assert_eq!(opts.timeout, Some(Duration::from_millis(2000)));

        // The sentinel key never reaches the wire
        let body = opts.data.unwrap();
        assert_eq!(body, json!({"price": "100"}));
    }

    #[test]
    fn test_spliced_authorization_cannot_shadow_signing() {
        let opts = RequestOptions::new().with_data(json!({
            SPLICE_KEY: {"headers": {"Authorization": "Bearer forged"}},
        }));
        let opts = build(&Method::POST, true, Some("real"), DEFAULT, opts).unwrap();

        let auth: Vec<_> = opts
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("authorization"))
            .collect();
        assert_eq!(auth.len(), 1);
        assert_eq!(auth[0].1, "Bearer real");
    }

    #[test]
    fn test_get_splice_then_query_move() {
        let opts = RequestOptions::new().with_data(json!({
            "side": "buy",
            SPLICE_KEY: {"headers": {"X-Trace": "abc"}},
        }));
        let opts = build(&Method::GET, false, None, DEFAULT, opts).unwrap();

        assert!(opts.data.is_none());
        assert!(opts.query.contains(&("side".to_string(), "buy".to_string())));
        // The splice key must not leak into the query string either
        assert!(!opts.query.iter().any(|(k, _)| k == SPLICE_KEY));
        assert!(opts
            .headers
            .contains(&("X-Trace".to_string(), "abc".to_string())));
    }
}
