//! Browse API connection
//!
//! A [`Connection`] owns the configuration, the HTTP transport and the token
//! cache, and remembers the last request and response so callers can inspect
//! them after a call.

use browsekit_domain::{BrowseConfig, BrowseError, Result, Verb};
use reqwest::StatusCode;
use tracing::{debug, info, instrument, warn};

use super::auth::{ClientCredentialsSource, TokenCache, TokenSource};
use super::request::{Params, PreparedRequest, RequestBuilder};
use super::response::ApiResponse;
use crate::http::HttpClient;

/// Blocking connection to the Browse API
///
/// Calls are issued one at a time; the connection is not meant to be shared
/// across threads.
pub struct Connection {
    config: BrowseConfig,
    http_client: HttpClient,
    tokens: TokenCache,
    last_request: Option<PreparedRequest>,
    last_response: Option<ApiResponse>,
}

impl Connection {
    /// Create a connection that obtains tokens with the client-credentials
    /// grant
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Config` if the proxy settings are invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: BrowseConfig) -> Result<Self> {
        let source = ClientCredentialsSource::new(&config)?;
        Self::with_token_source(config, source)
    }

    /// Create a connection with a custom token source
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Config` if the HTTP client cannot be built.
    pub fn with_token_source(
        config: BrowseConfig,
        source: impl TokenSource + 'static,
    ) -> Result<Self> {
        let http_client =
            HttpClient::builder().timeout(config.timeout).proxy(config.proxy_url()).build()?;

        Ok(Self {
            config,
            http_client,
            tokens: TokenCache::new(source),
            last_request: None,
            last_response: None,
        })
    }

    pub fn config(&self) -> &BrowseConfig {
        &self.config
    }

    /// Token cache backing this connection
    pub fn tokens(&mut self) -> &mut TokenCache {
        &mut self.tokens
    }

    /// Current access token, fetched if needed.
    ///
    /// # Errors
    ///
    /// See [`TokenCache::access_token`].
    pub fn access_token(&mut self) -> Result<&str> {
        self.tokens.access_token()
    }

    /// Execute `verb` by name, e.g. `"getItem"`.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Validation` for an unknown verb name, otherwise
    /// as [`Connection::execute`].
    pub fn execute_str(&mut self, verb: &str, params: &Params) -> Result<&ApiResponse> {
        let verb: Verb = verb.parse().map_err(BrowseError::Validation)?;
        self.execute(verb, params)
    }

    /// Execute one API call
    ///
    /// Non-200 statuses and body errors do not fail the call; they are
    /// available through [`Connection::error`] and the returned response.
    ///
    /// # Errors
    ///
    /// - `BrowseError::Validation` if a required path parameter is missing
    /// - `BrowseError::Config` / `BrowseError::Connection` if no token can be
    ///   obtained
    /// - `BrowseError::Network` if the request cannot be sent
    #[instrument(skip_all, fields(verb = %verb))]
    pub fn execute(&mut self, verb: Verb, params: &Params) -> Result<&ApiResponse> {
        self.last_request = None;
        self.last_response = None;

        let request = RequestBuilder::new(&self.config).build(verb, params, &mut self.tokens)?;
        let url = request.full_url()?;
        debug!(
            method = %request.method,
            %url,
            headers = ?request.headers,
            body = %request.body,
            "Prepared API request"
        );

        let mut builder =
            self.http_client.request(request.method, url).headers(request.headers.clone());
        if verb.has_body() {
            builder = builder.body(request.body.clone());
        }
        self.last_request = Some(request);

        let http_response = self.http_client.send(builder)?;
        let response =
            ApiResponse::new(verb, http_response, self.config.warnings, self.config.errors);

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("API rejected the access token; it will be refetched on the next call");
            self.tokens.invalidate();
        }
        if let Some(reason) = response.response_error() {
            debug!(status = response.status_code(), reason, "API call returned an error status");
        }

        // Run extraction now so body errors and warnings are logged per call.
        let errors = response.body_errors().len();
        info!(
            status = response.status_code(),
            elapsed = ?response.elapsed(),
            errors,
            warnings = response.body_warnings().len(),
            "API call completed"
        );
        debug!(body = response.text(), "API response body");

        Ok(self.last_response.insert(response))
    }

    /// `"<verb>: <msg>, <msg>"` for the last call, or `None` if it had no
    /// status error and no body errors.
    pub fn error(&self) -> Option<String> {
        self.last_response.as_ref().and_then(ApiResponse::error)
    }

    /// Turn the last call's errors into an `Err`, if error reporting is
    /// enabled.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Api` with the text of [`Connection::error`].
    pub fn error_check(&self) -> Result<()> {
        if !self.config.errors {
            return Ok(());
        }
        match self.error() {
            Some(message) => Err(BrowseError::Api(message)),
            None => Ok(()),
        }
    }

    /// Error ids from the last response body.
    pub fn response_codes(&self) -> &[String] {
        match &self.last_response {
            Some(response) => response.response_codes(),
            None => &[],
        }
    }

    /// The last response, if the last call got one.
    pub fn response(&self) -> Option<&ApiResponse> {
        self.last_response.as_ref()
    }

    /// The last request, if the last call got far enough to build one.
    pub fn request(&self) -> Option<&PreparedRequest> {
        self.last_request.as_ref()
    }
}
