//! Client configuration
//!
//! [`BrowseConfig`] is the fully-resolved configuration a connection runs
//! with. [`ConfigOverrides`] is one layer of optional values (explicit
//! arguments, environment, a config file section); layers are applied on top
//! of the defaults with [`BrowseConfig::apply`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSecondsWithFrac};

use crate::constants::{
    API_SCOPE_PATH, DEFAULT_DOMAIN, DEFAULT_SERVICE, DEFAULT_SITE_ID, DEFAULT_TIMEOUT_SECS,
    DEFAULT_URI, DEFAULT_VERSION, DOC_URL, TOKEN_PATH,
};

/// Resolved configuration for a Browse API connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseConfig {
    /// API host, e.g. `api.ebay.com` or `api.sandbox.ebay.com`
    pub domain: String,
    /// Path prefix of the Browse API
    pub uri: String,
    /// Marketplace id sent with every request
    pub siteid: String,
    /// Use `https` for API calls
    pub https: bool,
    /// Log warnings found in response bodies
    pub warnings: bool,
    /// Log errors found in response bodies
    pub errors: bool,
    /// Application id (OAuth client id)
    pub appid: Option<String>,
    /// Certificate id (OAuth client secret)
    pub certid: Option<String>,
    /// Developer id; carried for parity with other eBay APIs, unused here
    pub devid: Option<String>,
    /// API version reported in logs and the user agent
    pub version: String,
    /// Service name, `BrowseAPI`
    pub service: String,
    /// Link to the API reference
    pub doc_url: String,
    /// Per-request timeout enforced by the HTTP client
    pub timeout: Duration,
    /// HTTP proxy host for API and token calls
    pub proxy_host: Option<String>,
    /// Proxy port; 80 when only a host is given
    pub proxy_port: Option<u16>,
    /// Token endpoint override; derived from `domain` when unset
    pub token_url: Option<String>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN.to_string(),
            uri: DEFAULT_URI.to_string(),
            siteid: DEFAULT_SITE_ID.to_string(),
            https: true,
            warnings: true,
            errors: true,
            appid: None,
            certid: None,
            devid: None,
            version: DEFAULT_VERSION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            doc_url: DOC_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            proxy_host: None,
            proxy_port: None,
            token_url: None,
        }
    }
}

impl BrowseConfig {
    /// Start building a configuration from explicit values.
    pub fn builder() -> BrowseConfigBuilder {
        BrowseConfigBuilder::default()
    }

    /// Apply one layer of overrides; `None` fields leave the current value.
    #[must_use]
    pub fn apply(mut self, layer: &ConfigOverrides) -> Self {
        fn set<T: Clone>(slot: &mut T, value: Option<&T>) {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        fn set_opt<T: Clone>(slot: &mut Option<T>, value: Option<&T>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }

        set(&mut self.domain, layer.domain.as_ref());
        set(&mut self.uri, layer.uri.as_ref());
        set(&mut self.siteid, layer.siteid.as_ref());
        set(&mut self.https, layer.https.as_ref());
        set(&mut self.warnings, layer.warnings.as_ref());
        set(&mut self.errors, layer.errors.as_ref());
        set_opt(&mut self.appid, layer.appid.as_ref());
        set_opt(&mut self.certid, layer.certid.as_ref());
        set_opt(&mut self.devid, layer.devid.as_ref());
        set(&mut self.version, layer.version.as_ref());
        set(&mut self.timeout, layer.timeout.as_ref());
        set_opt(&mut self.proxy_host, layer.proxy_host.as_ref());
        set_opt(&mut self.proxy_port, layer.proxy_port.as_ref());
        set_opt(&mut self.token_url, layer.token_url.as_ref());
        self
    }

    /// URL scheme for API calls.
    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    /// `<scheme>://<domain><uri>`, the prefix every verb path is appended to.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.scheme(), self.domain, self.uri)
    }

    /// OAuth2 token endpoint. Always `https` unless overridden.
    pub fn token_endpoint(&self) -> String {
        match &self.token_url {
            Some(url) => url.clone(),
            None => format!("https://{}{}", self.domain, TOKEN_PATH),
        }
    }

    /// OAuth2 scope requested with the client-credentials grant.
    pub fn api_scope(&self) -> String {
        format!("https://{}{}", self.domain, API_SCOPE_PATH)
    }

    /// Proxy URL built from `proxy_host` and `proxy_port` (default port 80).
    pub fn proxy_url(&self) -> Option<String> {
        self.proxy_host
            .as_ref()
            .map(|host| format!("http://{}:{}", host, self.proxy_port.unwrap_or(80)))
    }
}

/// One layer of optional configuration values
///
/// Deserializes from a config file section; unknown keys (settings for other
/// eBay APIs sharing the same file) are ignored.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub siteid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Timeout; seconds (fractions allowed) in config files
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,
}

/// Builder for explicit configuration values
///
/// Values set here win over environment variables and config files when
/// resolved through the infra loader; [`BrowseConfigBuilder::build`] applies
/// them to the defaults directly.
#[derive(Debug, Clone, Default)]
pub struct BrowseConfigBuilder {
    overrides: ConfigOverrides,
}

impl BrowseConfigBuilder {
    /// API host, e.g. `api.sandbox.ebay.com`.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.overrides.domain = Some(domain.into());
        self
    }

    /// Path prefix of the Browse API.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.overrides.uri = Some(uri.into());
        self
    }

    /// Marketplace id, e.g. `EBAY-GB`.
    pub fn siteid(mut self, siteid: impl Into<String>) -> Self {
        self.overrides.siteid = Some(siteid.into());
        self
    }

    /// Use `https` (default) or plain `http` for API calls.
    pub fn https(mut self, https: bool) -> Self {
        self.overrides.https = Some(https);
        self
    }

    /// Log body warnings.
    pub fn warnings(mut self, enabled: bool) -> Self {
        self.overrides.warnings = Some(enabled);
        self
    }

    /// Log body errors and let `error_check` raise them.
    pub fn errors(mut self, enabled: bool) -> Self {
        self.overrides.errors = Some(enabled);
        self
    }

    /// Application id (OAuth client id).
    pub fn appid(mut self, appid: impl Into<String>) -> Self {
        self.overrides.appid = Some(appid.into());
        self
    }

    /// Certificate id (OAuth client secret).
    pub fn certid(mut self, certid: impl Into<String>) -> Self {
        self.overrides.certid = Some(certid.into());
        self
    }

    /// Developer id.
    pub fn devid(mut self, devid: impl Into<String>) -> Self {
        self.overrides.devid = Some(devid.into());
        self
    }

    /// Per-request timeout, kept at full precision.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.overrides.timeout = Some(timeout);
        self
    }

    /// Send API and token calls through `http://host:port`.
    pub fn proxy(mut self, host: impl Into<String>, port: u16) -> Self {
        self.overrides.proxy_host = Some(host.into());
        self.overrides.proxy_port = Some(port);
        self
    }

    /// Token endpoint to use instead of the one derived from the domain.
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.overrides.token_url = Some(url.into());
        self
    }

    /// The explicit layer collected so far.
    pub fn overrides(&self) -> &ConfigOverrides {
        &self.overrides
    }

    /// Consume the builder, returning the explicit layer.
    pub fn into_overrides(self) -> ConfigOverrides {
        self.overrides
    }

    /// Apply the explicit values to the defaults.
    pub fn build(self) -> BrowseConfig {
        BrowseConfig::default().apply(&self.overrides)
    }
}
