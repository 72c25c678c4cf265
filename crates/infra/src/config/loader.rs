//! Configuration loader
//!
//! Resolves a [`BrowseConfig`] from explicit values, environment variables
//! and a config file.
//!
//! ## Loading Strategy
//! 1. Start from the built-in defaults
//! 2. Apply the section of the config file matching the target domain
//! 3. Apply environment variables
//! 4. Apply explicit values (constructor arguments, CLI flags)
//!
//! ## Environment Variables
//! - `EBAY_APPID`: Application id (OAuth client id)
//! - `EBAY_CERTID`: Certificate id (OAuth client secret)
//! - `EBAY_DEVID`: Developer id
//! - `EBAY_DOMAIN`: API domain
//! - `EBAY_SITEID`: Marketplace id
//! - `EBAY_YAML`: Config file to use when none is given explicitly
//!
//! ## File Format
//! Config files are keyed by domain, so one file can hold production and
//! sandbox credentials side by side:
//!
//! ```yaml
//! name: ebay_api_config
//!
//! api.ebay.com:
//!     appid: MyApp-PRD-123
//!     certid: PRD-abc
//!     siteid: EBAY-US
//!
//! api.sandbox.ebay.com:
//!     appid: MyApp-SBX-123
//!     certid: SBX-abc
//! ```
//!
//! YAML, TOML and JSON are accepted (detected by file extension).
//!
//! ## File Locations
//! A relative file name is probed in the following directories (in order):
//! 1. The current working directory
//! 2. The user's home directory
//! 3. `/etc`

use std::path::{Path, PathBuf};

use browsekit_domain::constants::{
    ENV_APPID, ENV_CERTID, ENV_CONFIG_FILE, ENV_DEVID, ENV_DOMAIN, ENV_SITEID,
};
use browsekit_domain::{BrowseConfig, BrowseError, ConfigOverrides, Result};
use serde_json::Value;

use crate::errors::InfraError;

/// Resolve the full configuration
///
/// `config_file` names the file to read; when `None`, the `EBAY_YAML`
/// environment variable is consulted. A file that cannot be found is skipped,
/// not an error.
///
/// # Errors
/// Returns `BrowseError::Config` if the config file exists but cannot be read
/// or parsed.
pub fn load(explicit: &ConfigOverrides, config_file: Option<&Path>) -> Result<BrowseConfig> {
    let env = load_from_env();

    let domain = explicit
        .domain
        .clone()
        .or_else(|| env.domain.clone())
        .unwrap_or_else(|| BrowseConfig::default().domain);

    let env_file = std::env::var(ENV_CONFIG_FILE).ok().filter(|v| !v.is_empty()).map(PathBuf::from);
    let requested = config_file.map(Path::to_path_buf).or(env_file);

    let file_layer = match requested.as_deref().and_then(probe_config_paths) {
        Some(path) => load_from_file(&path, &domain)?,
        None => {
            if let Some(name) = requested {
                tracing::debug!(file = %name.display(), "Config file not found, using defaults");
            }
            ConfigOverrides::default()
        }
    };

    let config = BrowseConfig::default().apply(&file_layer).apply(&env).apply(explicit);
    tracing::debug!(domain = %config.domain, siteid = %config.siteid, "Configuration resolved");
    Ok(config)
}

/// Load the override layer from environment variables
///
/// Unset and empty variables are ignored.
pub fn load_from_env() -> ConfigOverrides {
    overrides_from_vars(|name| std::env::var(name).ok())
}

fn overrides_from_vars(lookup: impl Fn(&str) -> Option<String>) -> ConfigOverrides {
    let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

    ConfigOverrides {
        appid: var(ENV_APPID),
        certid: var(ENV_CERTID),
        devid: var(ENV_DEVID),
        domain: var(ENV_DOMAIN),
        siteid: var(ENV_SITEID),
        ..Default::default()
    }
}

/// Load the section for `domain` from a config file
///
/// # Errors
/// Returns `BrowseError::Config` if:
/// - The file cannot be read
/// - The format is unsupported or invalid
/// - The domain section has values of the wrong type
pub fn load_from_file(path: &Path, domain: &str) -> Result<ConfigOverrides> {
    tracing::info!(path = %path.display(), domain, "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| BrowseError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path, domain)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.yaml`/`.yml`, `.toml`, `.json`).
///
/// # Errors
/// Returns `BrowseError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path, domain: &str) -> Result<ConfigOverrides> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let document: Value = match extension {
        "yaml" | "yml" => serde_yaml::from_str(contents).map_err(InfraError::from)?,
        "toml" => toml::from_str(contents).map_err(InfraError::from)?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| BrowseError::Config(format!("Invalid JSON format: {e}")))?,
        _ => {
            return Err(BrowseError::Config(format!("Unsupported config format: {extension}")))
        }
    };

    match document.get(domain) {
        Some(section @ Value::Object(_)) => {
            Ok(serde_json::from_value(section.clone()).map_err(InfraError::from)?)
        }
        Some(Value::Null) | None => {
            tracing::debug!(domain, "Config file has no section for domain");
            Ok(ConfigOverrides::default())
        }
        Some(_) => Err(BrowseError::Config(format!("Config section for {domain} is not a mapping"))),
    }
}

/// Locate a config file
///
/// Absolute paths (and relative paths with more than one component) are
/// returned as-is when they exist. A bare file name is searched for in the
/// current directory, the home directory and `/etc`.
///
/// # Returns
/// The first existing candidate, or `None` if no file exists.
pub fn probe_config_paths(name: &Path) -> Option<PathBuf> {
    if name.is_absolute() || name.components().count() > 1 {
        return name.exists().then(|| name.to_path_buf());
    }

    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(name));
    }

    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        candidates.push(PathBuf::from(home).join(name));
    }

    candidates.push(Path::new("/etc").join(name));

    candidates.into_iter().find(|path| {
        let exists = path.exists();
        if exists {
            tracing::debug!(path = %path.display(), "Found config file");
        }
        exists
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use super::*;

    const YAML: &str = r"
name: ebay_api_config

api.ebay.com:
    appid: prod-app
    certid: prod-cert
    siteid: EBAY-GB

api.sandbox.ebay.com:
    appid: sbx-app
    certid: sbx-cert
    https: false
    timeout: 5
";

    #[test]
    fn parses_section_for_requested_domain() {
        let layer = parse_config(YAML, Path::new("ebay.yaml"), "api.sandbox.ebay.com").unwrap();
        assert_eq!(layer.appid.as_deref(), Some("sbx-app"));
        assert_eq!(layer.certid.as_deref(), Some("sbx-cert"));
        assert_eq!(layer.https, Some(false));
        assert_eq!(layer.timeout, Some(Duration::from_secs(5)));
        assert!(layer.siteid.is_none());
    }

    #[test]
    fn missing_domain_section_is_empty_layer() {
        let layer = parse_config(YAML, Path::new("ebay.yml"), "api.other.ebay.com").unwrap();
        assert_eq!(layer, ConfigOverrides::default());
    }

    #[test]
    fn parses_toml_and_json() {
        let toml = "[\"api.ebay.com\"]\nappid = \"toml-app\"\nwarnings = false\n";
        let layer = parse_config(toml, Path::new("ebay.toml"), "api.ebay.com").unwrap();
        assert_eq!(layer.appid.as_deref(), Some("toml-app"));
        assert_eq!(layer.warnings, Some(false));

        let json = r#"{"api.ebay.com": {"certid": "json-cert", "proxy_port": 8080}}"#;
        let layer = parse_config(json, Path::new("ebay.json"), "api.ebay.com").unwrap();
        assert_eq!(layer.certid.as_deref(), Some("json-cert"));
        assert_eq!(layer.proxy_port, Some(8080));
    }

    #[test]
    fn rejects_unsupported_extension() {
        let err = parse_config(YAML, Path::new("ebay.ini"), "api.ebay.com").unwrap_err();
        assert!(matches!(err, BrowseError::Config(msg) if msg.contains("Unsupported")));
    }

    #[test]
    fn rejects_wrongly_typed_values() {
        let yaml = "api.ebay.com:\n    https: sometimes\n";
        let err = parse_config(yaml, Path::new("ebay.yaml"), "api.ebay.com").unwrap_err();
        assert!(matches!(err, BrowseError::Config(_)));
    }

    #[test]
    fn rejects_scalar_section() {
        let yaml = "api.ebay.com: 42\n";
        let err = parse_config(yaml, Path::new("ebay.yaml"), "api.ebay.com").unwrap_err();
        assert!(matches!(err, BrowseError::Config(msg) if msg.contains("not a mapping")));
    }

    #[test]
    fn env_layer_skips_empty_values() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_APPID, "env-app"), (ENV_CERTID, ""), (ENV_SITEID, "EBAY_DE")]);
        let layer = overrides_from_vars(|name| vars.get(name).map(|v| (*v).to_string()));

        assert_eq!(layer.appid.as_deref(), Some("env-app"));
        assert!(layer.certid.is_none());
        assert_eq!(layer.siteid.as_deref(), Some("EBAY_DE"));
        assert!(layer.domain.is_none());
    }

    #[test]
    fn probe_returns_none_for_missing_absolute_path() {
        assert!(probe_config_paths(Path::new("/definitely/not/here/ebay.yaml")).is_none());
    }
}
