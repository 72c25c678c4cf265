use std::time::{Duration, Instant};

use browsekit_domain::constants::DEFAULT_TIMEOUT_SECS;
use browsekit_domain::{BrowseError, HttpMethod, Result};
use reqwest::blocking::{Client as ReqwestClient, RequestBuilder};
use reqwest::header::HeaderMap;
use reqwest::{Method, Proxy, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::InfraError;

/// Blocking HTTP client used for API calls.
///
/// Each `send` is exactly one request: there is no retry or backoff layer.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: HttpMethod, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        let method = match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        self.client.request(method, url)
    }

    /// Execute the provided request builder and buffer the response body.
    pub fn send(&self, builder: RequestBuilder) -> Result<HttpResponse> {
        let request = builder.build().map_err(|err| BrowseError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let started = Instant::now();
        let response = self.client.execute(request).map_err(|err| {
            debug!(%method, %url, error = %err, "HTTP request failed");
            BrowseError::from(InfraError::from(err))
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(|err| BrowseError::from(InfraError::from(err)))?;
        let elapsed = started.elapsed();
        debug!(%method, %url, %status, ?elapsed, "received HTTP response");

        Ok(HttpResponse { status, headers, body, elapsed })
    }
}

/// Buffered HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    elapsed: Duration,
}

impl HttpResponse {
    /// Build a response by hand (used by tests and stub transports).
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<String>) -> Self {
        Self { status, headers, body: body.into(), elapsed: Duration::ZERO }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Canonical reason phrase for the status code.
    pub fn reason(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Unknown Status")
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    /// Returns `BrowseError::Parse` if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| BrowseError::Parse(format!("Failed to parse response body: {e}")))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    proxy: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS), proxy: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route all traffic through `proxy` (e.g. `http://proxy.local:3128`).
    pub fn proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        builder = match self.proxy {
            Some(proxy) => builder.proxy(Proxy::all(&proxy).map_err(|err| {
                BrowseError::Config(format!("Invalid proxy {proxy}: {err}"))
            })?),
            None => builder.no_proxy(),
        };

        let client = builder.build().map_err(|err| BrowseError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
