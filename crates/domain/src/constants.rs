//! API constants
//!
//! Defaults and fixed endpoint fragments for the Browse API.

// Connection defaults
pub const DEFAULT_DOMAIN: &str = "api.ebay.com";
pub const DEFAULT_URI: &str = "/buy/browse/v1";
pub const DEFAULT_SITE_ID: &str = "EBAY-US";
pub const DEFAULT_VERSION: &str = "v1";
pub const DEFAULT_SERVICE: &str = "BrowseAPI";
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CONFIG_FILE: &str = "ebay.yaml";
pub const DOC_URL: &str = "https://developer.ebay.com/api-docs/buy/browse/overview.html";

// OAuth
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
pub const API_SCOPE_PATH: &str = "/oauth/api_scope";
/// Tokens are treated as expired this many seconds before the server says so.
pub const TOKEN_EXPIRY_LEEWAY_SECS: u64 = 60;

// Request parameters
pub const ITEM_ID_PARAM: &str = "item_id";

// Headers
pub const MARKETPLACE_ID_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const USER_AGENT: &str = concat!("browsekit/", env!("CARGO_PKG_VERSION"));

// Environment variables
pub const ENV_APPID: &str = "EBAY_APPID";
pub const ENV_CERTID: &str = "EBAY_CERTID";
pub const ENV_DEVID: &str = "EBAY_DEVID";
pub const ENV_DOMAIN: &str = "EBAY_DOMAIN";
pub const ENV_SITEID: &str = "EBAY_SITEID";
pub const ENV_CONFIG_FILE: &str = "EBAY_YAML";
