//! OAuth2 client-credentials tokens
//!
//! A [`TokenCache`] holds at most one access token and asks its
//! [`TokenSource`] for a new one only when the cached token is missing or
//! expired. The production source is [`ClientCredentialsSource`], which
//! exchanges the application id and cert id for an application access token.

use std::fmt;
use std::time::Duration;

use browsekit_domain::constants::TOKEN_EXPIRY_LEEWAY_SECS;
use browsekit_domain::{BrowseConfig, BrowseError, Result};
use oauth2::basic::BasicClient;
use oauth2::{AuthType, ClientId, ClientSecret, Scope, TokenResponse, TokenUrl};
use tracing::{debug, info};

use super::expiring::Expiring;
use crate::errors::InfraError;

/// Anything that can mint a fresh access token
///
/// This is the seam tests use to count or fake token fetches.
pub trait TokenSource: Send {
    /// Fetch a new token. Called once per cache refresh.
    fn fetch_token(&self) -> Result<IssuedToken>;
}

/// Token as returned by the authorization server
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub access_token: String,
    /// Lifetime reported by the server, if any
    pub expires_in: Option<Duration>,
}

impl IssuedToken {
    pub fn new(access_token: impl Into<String>, expires_in: Option<Duration>) -> Self {
        Self { access_token: access_token.into(), expires_in }
    }
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("access_token", &"[redacted]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Client-credentials grant against the eBay identity service
pub struct ClientCredentialsSource {
    client_id: Option<String>,
    client_secret: Option<String>,
    token_url: String,
    scope: String,
    http_client: reqwest::blocking::Client,
}

impl ClientCredentialsSource {
    /// Create a source from the connection configuration
    ///
    /// Credentials are not checked here; a missing app id or cert id surfaces
    /// on the first token fetch.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client for the token endpoint cannot be built
    pub fn new(config: &BrowseConfig) -> Result<Self> {
        // Token responses must never follow redirects.
        let mut builder = reqwest::blocking::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(config.timeout);

        builder = match config.proxy_url() {
            Some(proxy) => builder.proxy(reqwest::Proxy::all(&proxy).map_err(|err| {
                BrowseError::Config(format!("Invalid proxy {proxy}: {err}"))
            })?),
            None => builder.no_proxy(),
        };

        let http_client = builder.build().map_err(|err| BrowseError::from(InfraError::from(err)))?;

        Ok(Self {
            client_id: config.appid.clone().filter(|id| !id.is_empty()),
            client_secret: config.certid.clone().filter(|secret| !secret.is_empty()),
            token_url: config.token_endpoint(),
            scope: config.api_scope(),
            http_client,
        })
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok((id, secret)),
            _ => Err(BrowseError::Config(
                "appid (client id) and certid (client secret) are required for OAuth".into(),
            )),
        }
    }
}

impl TokenSource for ClientCredentialsSource {
    fn fetch_token(&self) -> Result<IssuedToken> {
        let (client_id, client_secret) = self.credentials()?;

        let token_url = TokenUrl::new(self.token_url.clone()).map_err(|e| {
            BrowseError::Config(format!("Invalid token endpoint {}: {e}", self.token_url))
        })?;

        let client = BasicClient::new(ClientId::new(client_id.to_string()))
            .set_client_secret(ClientSecret::new(client_secret.to_string()))
            .set_auth_type(AuthType::BasicAuth)
            .set_token_uri(token_url);

        debug!(token_url = %self.token_url, scope = %self.scope, "Requesting application token");

        let response = client
            .exchange_client_credentials()
            .add_scope(Scope::new(self.scope.clone()))
            .request(&self.http_client)
            .map_err(|err| BrowseError::from(InfraError::from(err)))?;

        Ok(IssuedToken::new(response.access_token().secret().clone(), response.expires_in()))
    }
}

/// Lazily refreshed single-token cache
///
/// Owned by one connection; not shared across threads.
pub struct TokenCache {
    source: Box<dyn TokenSource>,
    token: Option<Expiring<String>>,
    leeway: Duration,
}

impl TokenCache {
    pub fn new(source: impl TokenSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            token: None,
            leeway: Duration::from_secs(TOKEN_EXPIRY_LEEWAY_SECS),
        }
    }

    /// Treat tokens as expired `leeway` before their reported expiry.
    ///
    /// Tokens living no longer than the leeway keep their full lifetime.
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Get a valid access token, fetching one if needed
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Config` when credentials are missing (before any
    /// network call) and `BrowseError::Connection` when the token request
    /// fails.
    pub fn access_token(&mut self) -> Result<&str> {
        let token = match self.token.take() {
            Some(token) if !token.is_expired() => token,
            _ => self.refresh()?,
        };

        Ok(self.token.insert(token).value().as_str())
    }

    fn refresh(&self) -> Result<Expiring<String>> {
        let issued = self.source.fetch_token()?;
        info!(expires_in = ?issued.expires_in, "Access token refreshed");

        Ok(match issued.expires_in {
            Some(ttl) => {
                let ttl = ttl.checked_sub(self.leeway).filter(|t| !t.is_zero()).unwrap_or(ttl);
                Expiring::new(issued.access_token, ttl)
            }
            None => Expiring::never(issued.access_token),
        })
    }

    /// Install a token obtained elsewhere.
    pub fn seed(&mut self, access_token: impl Into<String>, ttl: Option<Duration>) {
        let access_token = access_token.into();
        self.token = Some(match ttl {
            Some(ttl) => Expiring::new(access_token, ttl),
            None => Expiring::never(access_token),
        });
    }

    /// Drop the cached token so the next access fetches a new one.
    pub fn invalidate(&mut self) {
        self.token = None;
    }

    /// The cached token, expired or not.
    pub fn cached(&self) -> Option<&Expiring<String>> {
        self.token.as_ref()
    }
}
