//! Authentication endpoints
//!
//! Bitpin exchanges an API key/secret pair for bearer tokens. The access
//! token signs private calls; the refresh token mints new access tokens
//! without re-sending the credentials.

use crate::client::BitpinClient;
use crate::error::{BitpinError, RestResult};
use crate::request::RequestOptions;
use crate::types::{AuthTokens, RefreshedToken};
use serde_json::json;
use tracing::{debug, instrument};

impl BitpinClient {
    /// Exchange the configured API key and secret for a token pair
    ///
    /// Stores both tokens on the client, so subsequent signed calls and
    /// token refreshes work without further setup. Fails with a
    /// configuration error when either credential is missing.
    #[instrument(skip(self, opts))]
    pub async fn authenticate(&self, opts: RequestOptions) -> RestResult<AuthTokens> {
        let (api_key, secret_key) = match (self.api_key(), self.secret_key()) {
            (Some(api_key), Some(secret_key)) => (api_key, secret_key),
            _ => {
                return Err(BitpinError::Config(
                    "api_key and secret_key are required to authenticate".into(),
                ))
            }
        };
        debug!("Authenticating");

        let opts = opts.with_data(json!({
            "api_key": api_key,
            "secret_key": secret_key,
        }));
        let tokens: AuthTokens = self.post("usr/authenticate/", None, false, opts).await?;

        self.store_tokens(tokens.access.clone(), tokens.refresh.clone());
        Ok(tokens)
    }

    /// Obtain a fresh access token
    ///
    /// Uses the supplied refresh token, or the stored one when `refresh`
    /// is `None`. The new access token replaces the stored one; the
    /// refresh token is unchanged. Fails with a configuration error when
    /// no refresh token is available.
    #[instrument(skip(self, refresh, opts))]
    pub async fn refresh_access_token(
        &self,
        refresh: Option<&str>,
        opts: RequestOptions,
    ) -> RestResult<RefreshedToken> {
        let refresh = match refresh {
            Some(token) => token.to_string(),
            None => self.refresh_token().ok_or_else(|| {
                BitpinError::Config("a refresh token is required to refresh the access token".into())
            })?,
        };
        debug!("Refreshing access token");

        let opts = opts.with_data(json!({ "refresh": refresh }));
        let token: RefreshedToken = self.post("usr/refresh_token/", None, false, opts).await?;

        self.store_access_token(token.access.clone());
        Ok(token)
    }
}
