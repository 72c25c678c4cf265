//! Request construction
//!
//! Maps a [`Verb`] plus an untyped parameter mapping onto method, URL, query,
//! body and headers. GET verbs carry their parameters as query pairs; POST
//! verbs carry the whole mapping as a JSON body and no query.

use browsekit_domain::constants::{JSON_CONTENT_TYPE, MARKETPLACE_ID_HEADER, USER_AGENT};
use browsekit_domain::{BrowseConfig, BrowseError, HttpMethod, Result, Verb};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use serde_json::{Map, Value};
use url::Url;

use super::auth::TokenCache;

/// Untyped request parameters
pub type Params = Map<String, Value>;

/// A fully-built API request, ready to hand to the transport
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub verb: Verb,
    pub method: HttpMethod,
    /// URL without query string
    pub url: String,
    pub query: Vec<(String, String)>,
    /// JSON body for POST verbs, empty otherwise
    pub body: String,
    pub headers: HeaderMap,
}

impl PreparedRequest {
    /// URL including the encoded query string.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Config` if the configured domain or uri do not
    /// form a valid URL.
    pub fn full_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| BrowseError::Config(format!("Invalid request URL {}: {e}", self.url)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Builds [`PreparedRequest`]s for one configuration
pub struct RequestBuilder<'a> {
    config: &'a BrowseConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a BrowseConfig) -> Self {
        Self { config }
    }

    /// Build the request for `verb`
    ///
    /// The URL is resolved before the token is requested, so a missing path
    /// parameter fails without touching the token endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Validation` for a missing path parameter and
    /// propagates token errors from `tokens`.
    pub fn build(
        &self,
        verb: Verb,
        params: &Params,
        tokens: &mut TokenCache,
    ) -> Result<PreparedRequest> {
        let url = build_url(self.config, verb, params)?;
        let query = build_query(verb, params);
        let body = build_body(verb, params)?;
        let headers = build_headers(self.config, tokens.access_token()?)?;

        Ok(PreparedRequest { verb, method: verb.method(), url, query, body, headers })
    }
}

/// Target URL for `verb`
///
/// # Errors
///
/// Returns `BrowseError::Validation` when the verb needs `item_id` and it is
/// absent, null, or not a string/number.
pub fn build_url(config: &BrowseConfig, verb: Verb, params: &Params) -> Result<String> {
    let template = verb.path_template();

    let path = match verb.path_param() {
        Some(name) => {
            let value = path_value(verb, name, params)?;
            template.replace(&format!("{{{name}}}"), &urlencoding::encode(&value))
        }
        None => template.to_string(),
    };

    Ok(format!("{}{}", config.base_url(), path))
}

fn path_value(verb: Verb, name: &str, params: &Params) -> Result<String> {
    match params.get(name) {
        Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
        Some(Value::Number(value)) => Ok(value.to_string()),
        Some(Value::Null | Value::String(_)) | None => {
            Err(BrowseError::Validation(format!("{name} is required for {verb}")))
        }
        Some(other) => Err(BrowseError::Validation(format!(
            "{name} for {verb} must be a string or number, got {other}"
        ))),
    }
}

/// Query pairs for `verb`
///
/// Empty for POST verbs. For GET verbs every non-null parameter is included
/// except the one already substituted into the path. Strings are passed
/// verbatim; other values use their JSON text.
pub fn build_query(verb: Verb, params: &Params) -> Vec<(String, String)> {
    if verb.has_body() {
        return Vec::new();
    }

    let consumed = verb.path_param();
    params
        .iter()
        .filter(|(key, _)| Some(key.as_str()) != consumed)
        .filter_map(|(key, value)| query_value(value).map(|value| (key.clone(), value)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

/// JSON body for `verb`: the whole parameter mapping for POST verbs, empty
/// for GET verbs.
///
/// # Errors
///
/// Returns `BrowseError::Parse` if the mapping cannot be serialized.
pub fn build_body(verb: Verb, params: &Params) -> Result<String> {
    if !verb.has_body() {
        return Ok(String::new());
    }

    serde_json::to_string(params)
        .map_err(|e| BrowseError::Parse(format!("Failed to serialize request body: {e}")))
}

/// Static JSON headers plus marketplace id and bearer token.
///
/// # Errors
///
/// Returns `BrowseError::Config` for a site id that is not a valid header
/// value and `BrowseError::Validation` for a malformed token.
pub fn build_headers(config: &BrowseConfig, access_token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));

    let mut authorization = HeaderValue::from_str(&format!("Bearer {access_token}"))
        .map_err(|_| BrowseError::Validation("access token is not a valid header value".into()))?;
    authorization.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, authorization);

    let marketplace = HeaderName::from_bytes(MARKETPLACE_ID_HEADER.as_bytes())
        .map_err(|e| BrowseError::Config(format!("Invalid marketplace header name: {e}")))?;
    let siteid = HeaderValue::from_str(&config.siteid)
        .map_err(|_| BrowseError::Config(format!("Invalid siteid: {:?}", config.siteid)))?;
    headers.insert(marketplace, siteid);

    Ok(headers)
}
