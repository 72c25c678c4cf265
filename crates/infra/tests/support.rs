//! Shared helpers for integration tests against a mock eBay server.

#![allow(dead_code)]

use browsekit_domain::BrowseConfig;
use browsekit_infra::Params;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const APPID: &str = "test_appid";
pub const CERTID: &str = "test_certid";
pub const ACCESS_TOKEN: &str = "test_token";
pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";

/// `base64("test_appid:test_certid")`
pub const BASIC_AUTH: &str = "Basic dGVzdF9hcHBpZDp0ZXN0X2NlcnRpZA==";

/// Configuration pointing both the API and the token endpoint at `server`.
pub fn config_for(server: &MockServer) -> BrowseConfig {
    BrowseConfig::builder()
        .domain(server.address().to_string())
        .https(false)
        .appid(APPID)
        .certid(CERTID)
        .token_url(format!("{}{}", server.uri(), TOKEN_PATH))
        .build()
}

/// Token response with the given lifetime in seconds.
pub fn token_body(expires_in: u64) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "token_type": "Application Access Token",
        "expires_in": expires_in,
    })
}

/// Mount a client-credentials token endpoint expected to be hit `times` times.
pub async fn mount_token_endpoint(server: &MockServer, expires_in: u64, times: u64) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(header("authorization", BASIC_AUTH))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(expires_in)))
        .expect(times)
        .mount(server)
        .await;
}

/// Build a parameter map from a JSON object literal.
pub fn params(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
