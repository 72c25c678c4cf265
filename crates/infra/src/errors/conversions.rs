//! Conversions from external infrastructure errors into domain errors.

use browsekit_domain::BrowseError;
use oauth2::basic::BasicErrorResponse;
use oauth2::{HttpClientError, RequestTokenError};
use reqwest::Error as HttpError;

/// Token request failure as produced by the blocking reqwest OAuth client.
pub type TokenRequestError = RequestTokenError<HttpClientError<HttpError>, BasicErrorResponse>;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub BrowseError);

impl From<InfraError> for BrowseError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<BrowseError> for InfraError {
    fn from(value: BrowseError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoBrowseError {
    fn into_browse(self) -> BrowseError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → BrowseError */
/* -------------------------------------------------------------------------- */

impl IntoBrowseError for HttpError {
    fn into_browse(self) -> BrowseError {
        if self.is_builder() {
            return BrowseError::Config(format!("invalid HTTP client settings: {self}"));
        }

        if self.is_timeout() {
            return BrowseError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return BrowseError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return BrowseError::Parse(format!("failed to read HTTP response: {self}"));
        }

        BrowseError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_browse())
    }
}

/* -------------------------------------------------------------------------- */
/* OAuth2 token errors → BrowseError */
/* -------------------------------------------------------------------------- */

impl IntoBrowseError for TokenRequestError {
    fn into_browse(self) -> BrowseError {
        let detail = match &self {
            RequestTokenError::ServerResponse(response) => match response.error_description() {
                Some(description) => format!("{}: {}", response.error(), description),
                None => response.error().to_string(),
            },
            RequestTokenError::Request(err) => format!("request failed: {err}"),
            RequestTokenError::Parse(err, _body) => {
                format!("failed to parse token response: {err}")
            }
            RequestTokenError::Other(message) => message.clone(),
        };

        BrowseError::Connection(format!("Failed to get access token: {detail}"))
    }
}

impl From<TokenRequestError> for InfraError {
    fn from(value: TokenRequestError) -> Self {
        InfraError(value.into_browse())
    }
}

/* -------------------------------------------------------------------------- */
/* Config file formats → BrowseError */
/* -------------------------------------------------------------------------- */

impl IntoBrowseError for serde_yaml::Error {
    fn into_browse(self) -> BrowseError {
        BrowseError::Config(format!("Invalid YAML format: {self}"))
    }
}

impl From<serde_yaml::Error> for InfraError {
    fn from(value: serde_yaml::Error) -> Self {
        InfraError(value.into_browse())
    }
}

impl IntoBrowseError for toml::de::Error {
    fn into_browse(self) -> BrowseError {
        BrowseError::Config(format!("Invalid TOML format: {self}"))
    }
}

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        InfraError(value.into_browse())
    }
}

impl IntoBrowseError for serde_json::Error {
    fn into_browse(self) -> BrowseError {
        if self.is_data() {
            BrowseError::Config(format!("Invalid configuration value: {self}"))
        } else {
            BrowseError::Parse(format!("Invalid JSON: {self}"))
        }
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        InfraError(value.into_browse())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use oauth2::basic::BasicErrorResponseType;
    use oauth2::StandardErrorResponse;

    use super::*;

    #[test]
    fn oauth_server_error_maps_to_connection_error() {
        let response = StandardErrorResponse::new(
            BasicErrorResponseType::InvalidClient,
            Some("client authentication failed".to_string()),
            None,
        );
        let err: TokenRequestError = RequestTokenError::ServerResponse(response);

        let mapped: BrowseError = InfraError::from(err).into();
        match mapped {
            BrowseError::Connection(msg) => {
                assert!(msg.starts_with("Failed to get access token"));
                assert!(msg.contains("invalid_client"));
                assert!(msg.contains("client authentication failed"));
            }
            other => panic!("expected connection error, got {:?}", other),
        }
    }

    #[test]
    fn oauth_other_error_keeps_message() {
        let err: TokenRequestError = RequestTokenError::Other("unexpected status".into());
        let mapped: BrowseError = InfraError::from(err).into();
        assert_eq!(
            mapped,
            BrowseError::Connection("Failed to get access token: unexpected status".into())
        );
    }

    #[test]
    fn malformed_yaml_maps_to_config_error() {
        let err = serde_yaml::from_str::<serde_json::Value>("a: [unclosed").unwrap_err();
        let mapped: BrowseError = InfraError::from(err).into();
        assert!(matches!(mapped, BrowseError::Config(msg) if msg.contains("YAML")));
    }

    #[test]
    fn json_syntax_error_maps_to_parse_error() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped: BrowseError = InfraError::from(err).into();
        assert!(matches!(mapped, BrowseError::Parse(_)));
    }

    #[test]
    fn connection_refused_maps_to_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = reqwest::blocking::Client::builder().no_proxy().build().unwrap();
        let err = client.get(format!("http://{addr}")).send().unwrap_err();

        let mapped: BrowseError = InfraError::from(err).into();
        assert!(matches!(mapped, BrowseError::Network(_)));
    }
}
