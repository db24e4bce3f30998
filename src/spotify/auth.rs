use reqwest::Client;
use tokio::sync::OnceCell;

use crate::{
    error::{Error, Result},
    types::AnonymousTokenResponse,
};

/// Access token shared by every Web API call of one run.
///
/// The token is requested lazily on first use and then reused for the rest
/// of the run. It is never refreshed: a run is assumed to finish well within
/// the token lifetime.
///
/// # Concurrency
///
/// Concurrent callers of [`AuthContext::access_token`] wait on the same
/// in-flight request, so the token endpoint is hit at most once even when
/// several resolvers start at the same time.
///
/// # Example
///
/// ```
/// let auth = AuthContext::new(Client::new(), config::spotify_apitoken_url());
/// let token = auth.access_token().await?;
/// ```
pub struct AuthContext {
    client: Client,
    token_url: String,
    token: OnceCell<String>,
}

impl AuthContext {
    pub fn new(client: Client, token_url: impl Into<String>) -> Self {
        AuthContext {
            client,
            token_url: token_url.into(),
            token: OnceCell::new(),
        }
    }

    /// Returns the cached token, fetching it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] when the token endpoint is unreachable, answers
    /// with a non-success status, or the payload carries no token. A failed
    /// fetch is not cached, so a later call tries again.
    pub async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.fetch_token())
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.token.initialized()
    }

    async fn fetch_token(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.token_url)
            .send()
            .await
            .map_err(|e| Error::Auth(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::Auth(e.to_string()))?;

        let json = response
            .json::<AnonymousTokenResponse>()
            .await
            .map_err(|e| Error::Auth(format!("malformed token response: {e}")))?;

        match json.access_token {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::Auth("token endpoint returned no token".to_string())),
        }
    }
}
