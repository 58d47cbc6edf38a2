//! Main REST client implementation

use crate::error::{BitpinError, RestResult};
use crate::request::{self, RequestOptions};
use bitpin_types::Tld;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::{debug, info};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 50;

/// Default API version segment
const DEFAULT_API_VERSION: &str = "v1";

/// Session token pair, shared across clones of the client
#[derive(Debug, Default)]
struct TokenCell {
    access: Option<String>,
    refresh: Option<String>,
}

/// Bitpin REST API client
///
/// Provides access to both public and private endpoints. The client is
/// cheap to clone; clones share the same HTTP connection pool and token
/// pair, so a token refresh on one clone is visible to all of them.
///
/// # Example
///
/// ```no_run
/// use bitpin_rest::{BitpinClient, ClientConfig, RequestOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BitpinClient::new();
///     let tickers = client.get_tickers(RequestOptions::new()).await?;
///
///     // With authentication for private endpoints
///     let config = ClientConfig::new().with_credentials("key", "secret");
///     let client = BitpinClient::connect(config).await?;
///     let wallets = client
///         .get_wallets(Default::default(), RequestOptions::new())
///         .await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct BitpinClient {
    http_client: Client,
    base_url: String,
    api_version: String,
    timeout: Duration,
    api_key: Option<String>,
    secret_key: Option<String>,
    tokens: Arc<RwLock<TokenCell>>,
    background: BackgroundProcess,
}

impl BitpinClient {
    /// Create a new client without credentials
    ///
    /// Only public endpoints will be available until tokens are set.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .default_headers(default_headers)
            .user_agent(config.user_agent.as_deref().unwrap_or("bitpin-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        let base_url = config
            .base_url
            .unwrap_or_else(|| format!("https://api.bitpin.{}", config.tld.as_str()));

        info!(base_url = %base_url, "Created Bitpin REST client");

        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version,
            timeout: Duration::from_secs(config.timeout_secs),
            api_key: config.api_key,
            secret_key: config.secret_key,
            tokens: Arc::new(RwLock::new(TokenCell {
                access: config.access_token,
                refresh: config.refresh_token,
            })),
            background: config.background,
        }
    }

    /// Create a client and authenticate when credentials are configured
    ///
    /// With an API key and secret set this performs the token exchange
    /// before returning, so the client is ready for signed calls. Without
    /// credentials it behaves like [`BitpinClient::with_config`].
    pub async fn connect(config: ClientConfig) -> RestResult<Self> {
        let client = Self::with_config(config);
        if client.api_key.is_some() && client.secret_key.is_some() {
            client.authenticate(RequestOptions::new()).await?;
        }
        Ok(client)
    }

    /// Check if the client holds credentials for the token exchange
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    /// Get the configured API key
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Get the configured secret key
    pub fn secret_key(&self) -> Option<&str> {
        self.secret_key.as_deref()
    }

    /// Get the current access token
    pub fn access_token(&self) -> Option<String> {
        self.read_tokens().access.clone()
    }

    /// Get the current refresh token
    pub fn refresh_token(&self) -> Option<String> {
        self.read_tokens().refresh.clone()
    }

    /// Get the background scheduling hints
    pub fn background(&self) -> &BackgroundProcess {
        &self.background
    }

    /// Replace the session token pair
    pub(crate) fn store_tokens(&self, access: String, refresh: String) {
        let mut cell = self.write_tokens();
        cell.access = Some(access);
        cell.refresh = Some(refresh);
    }

    /// Replace the access token, keeping the refresh token
    pub(crate) fn store_access_token(&self, access: String) {
        self.write_tokens().access = Some(access);
    }

    fn read_tokens(&self) -> RwLockReadGuard<'_, TokenCell> {
        // A poisoned lock only means a writer panicked mid-assignment of
        // two Options; the cell stays usable.
        self.tokens.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_tokens(&self) -> RwLockWriteGuard<'_, TokenCell> {
        self.tokens.write().unwrap_or_else(|e| e.into_inner())
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Send a request and deserialize the response body
    ///
    /// Builds the final options (timeout, splice, bearer injection, GET
    /// body-to-query move), dispatches exactly once, and classifies the
    /// outcome. A `version` of `None` uses the client's configured
    /// version segment.
    pub(crate) async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        version: Option<&str>,
        signed: bool,
        opts: RequestOptions,
    ) -> RestResult<T> {
        let access = if signed { self.access_token() } else { None };
        let opts = request::build(&method, signed, access.as_deref(), self.timeout, opts)?;

        let url = format!(
            "{}/api/{}/{}",
            self.base_url,
            version.unwrap_or(&self.api_version),
            path.trim_start_matches('/')
        );
        debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.http_client.request(method, &url);
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        for (name, value) in &opts.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                BitpinError::Config(format!("invalid header name {:?}: {}", name, e))
            })?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| BitpinError::Config(format!("invalid header value: {}", e)))?;
            builder = builder.header(name, value);
        }
        if !opts.query.is_empty() {
            builder = builder.query(&opts.query);
        }
        if let Some(data) = &opts.data {
            builder = builder.json(data);
        }

        let response = builder.send().await.map_err(BitpinError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BitpinError::from_error_response(status.as_u16(), &body));
        }

        response.json().await.map_err(BitpinError::from_transport)
    }

    /// Send a GET request
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        version: Option<&str>,
        signed: bool,
        opts: RequestOptions,
    ) -> RestResult<T> {
        self.request(Method::GET, path, version, signed, opts).await
    }

    /// Send a POST request
    pub(crate) async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        version: Option<&str>,
        signed: bool,
        opts: RequestOptions,
    ) -> RestResult<T> {
        self.request(Method::POST, path, version, signed, opts)
            .await
    }

    /// Send a DELETE request
    pub(crate) async fn delete<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        version: Option<&str>,
        signed: bool,
        opts: RequestOptions,
    ) -> RestResult<T> {
        self.request(Method::DELETE, path, version, signed, opts)
            .await
    }
}

impl Default for BitpinClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BitpinClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitpinClient")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("has_credentials", &self.has_credentials())
            .field("has_access_token", &self.read_tokens().access.is_some())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for the token exchange (optional)
    pub api_key: Option<String>,
    /// Secret key for the token exchange (optional)
    pub secret_key: Option<String>,
    /// Pre-obtained access token (optional)
    pub access_token: Option<String>,
    /// Pre-obtained refresh token (optional)
    pub refresh_token: Option<String>,
    /// Which top-level domain of the exchange to talk to
    pub tld: Tld,
    /// Override the full base URL, bypassing the TLD (used for testing)
    pub base_url: Option<String>,
    /// API version segment
    pub api_version: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Background token-maintenance scheduling hints
    pub background: BackgroundProcess,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            access_token: None,
            refresh_token: None,
            tld: Tld::default(),
            base_url: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            background: BackgroundProcess::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key and secret for the token exchange
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Seed the client with a pre-obtained token pair
    pub fn with_tokens(
        mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Select the exchange domain
    pub fn with_tld(mut self, tld: Tld) -> Self {
        self.tld = tld;
        self
    }

    /// Override the full base URL (e.g., a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API version segment
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the background scheduling hints
    pub fn with_background(mut self, background: BackgroundProcess) -> Self {
        self.background = background;
        self
    }
}

/// Scheduling hints for caller-driven token maintenance
///
/// The client never refreshes tokens on its own. Callers that want a
/// keep-alive loop read these intervals and drive the refresh themselves
/// (access tokens expire well before the refresh token does).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundProcess {
    /// How often to refresh the access token
    pub refresh_interval: Duration,
    /// How often to re-authenticate from scratch
    pub reauth_interval: Duration,
}

impl Default for BackgroundProcess {
    fn default() -> Self {
        Self {
            // Access tokens last 15 minutes, refresh tokens 7 days
            refresh_interval: Duration::from_secs(10 * 60),
            reauth_interval: Duration::from_secs(6 * 24 * 60 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_without_credentials() {
        let client = BitpinClient::new();
        assert!(!client.has_credentials());
        assert!(client.access_token().is_none());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_tld(Tld::Org)
            .with_timeout(10)
            .with_api_version("v2")
            .with_user_agent("test-agent");

        assert_eq!(config.tld, Tld::Org);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.api_version, "v2");
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
    }

    #[test]
    fn test_default_base_url_from_tld() {
        let client = BitpinClient::with_config(ClientConfig::new().with_tld(Tld::Org));
        assert!(format!("{:?}", client).contains("https://api.bitpin.org"));
    }

    #[test]
    fn test_seeded_tokens_shared_across_clones() {
        let client =
            BitpinClient::with_config(ClientConfig::new().with_tokens("A", "R"));
        let clone = client.clone();

        client.store_access_token("B".to_string());
        assert_eq!(clone.access_token().as_deref(), Some("B"));
        assert_eq!(clone.refresh_token().as_deref(), Some("R"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let client = BitpinClient::with_config(
            ClientConfig::new().with_credentials("my-key", "my-secret"),
        );
        let debug = format!("{:?}", client);
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
    }
}
