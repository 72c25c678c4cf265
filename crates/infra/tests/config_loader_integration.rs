//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of resolving configuration from files and
//! explicit values.

use std::fs;
use std::path::Path;
use std::time::Duration;

use browsekit_domain::{BrowseConfig, BrowseError, ConfigOverrides};
use browsekit_infra::config;
use tempfile::TempDir;

const EBAY_YAML: &str = r"
name: ebay_api_config

api.ebay.com:
    appid: prod-app
    certid: prod-cert
    siteid: EBAY-GB

api.sandbox.ebay.com:
    appid: sbx-app
    certid: sbx-cert
    siteid: EBAY-DE
    timeout: 7
    proxy_host: proxy.local
";

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("Failed to write config file");
    path
}

#[test]
fn test_load_selects_section_for_domain() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "ebay.yaml", EBAY_YAML);

    let explicit = BrowseConfig::builder().domain("api.sandbox.ebay.com").into_overrides();
    let config = config::load(&explicit, Some(&path)).expect("config should load");

    assert_eq!(config.domain, "api.sandbox.ebay.com");
    assert_eq!(config.appid.as_deref(), Some("sbx-app"));
    assert_eq!(config.certid.as_deref(), Some("sbx-cert"));
    assert_eq!(config.siteid, "EBAY-DE");
    assert_eq!(config.timeout, Duration::from_secs(7));
    assert_eq!(config.proxy_url().as_deref(), Some("http://proxy.local:80"));
    // Untouched settings keep their defaults
    assert_eq!(config.uri, "/buy/browse/v1");
    assert!(config.https);
}

#[test]
fn test_explicit_values_win_over_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "ebay.yml", EBAY_YAML);

    let explicit = BrowseConfig::builder()
        .domain("api.ebay.com")
        .appid("arg-app")
        .warnings(false)
        .into_overrides();
    let config = config::load(&explicit, Some(&path)).expect("config should load");

    assert_eq!(config.appid.as_deref(), Some("arg-app"));
    assert_eq!(config.certid.as_deref(), Some("prod-cert"));
    assert_eq!(config.siteid, "EBAY-GB");
    assert!(!config.warnings);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("absent.yaml");

    let explicit = BrowseConfig::builder().domain("api.ebay.com").appid("a").into_overrides();
    let config = config::load(&explicit, Some(&missing)).expect("missing file is not an error");

    assert_eq!(config.appid.as_deref(), Some("a"));
    assert_eq!(config.siteid, "EBAY-US");
}

#[test]
fn test_load_from_toml_and_json_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let toml = write(
        &dir,
        "ebay.toml",
        "name = \"ebay_api_config\"\n\n[\"api.ebay.com\"]\nappid = \"toml-app\"\nhttps = false\n",
    );
    let layer = config::load_from_file(&toml, "api.ebay.com").expect("toml should parse");
    assert_eq!(layer.appid.as_deref(), Some("toml-app"));
    assert_eq!(layer.https, Some(false));

    let json = write(&dir, "ebay.json", r#"{"api.ebay.com": {"certid": "json-cert"}}"#);
    let layer = config::load_from_file(&json, "api.ebay.com").expect("json should parse");
    assert_eq!(layer.certid.as_deref(), Some("json-cert"));
    assert_eq!(layer.appid, None);
}

#[test]
fn test_invalid_file_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "ebay.yaml", "api.ebay.com: [unclosed\n");

    let result = config::load(&ConfigOverrides::default(), Some(&path));
    assert!(matches!(result, Err(BrowseError::Config(_))));
}

#[test]
fn test_unreadable_path_is_config_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = config::load_from_file(dir.path(), "api.ebay.com");
    assert!(matches!(result, Err(BrowseError::Config(msg)) if msg.contains("read")));
}

#[test]
fn test_probe_finds_existing_absolute_path() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = write(&dir, "ebay.yaml", EBAY_YAML);

    assert_eq!(config::probe_config_paths(&path), Some(path.clone()));
    assert!(config::probe_config_paths(Path::new("/no/such/dir/ebay.yaml")).is_none());
}
