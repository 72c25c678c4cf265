//! API responses and error extraction
//!
//! eBay reports call-level problems two ways: a non-200 status, and
//! `errors`/`warnings` arrays inside an otherwise successful JSON body. Both
//! are collected here without failing the call; callers decide what to do
//! with them.

use std::time::Duration;

use browsekit_domain::{Result, Verb};
use once_cell::unsync::OnceCell;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::http::HttpResponse;

/// Shape of the error container in eBay REST responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
    #[serde(default)]
    warnings: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    error_id: Option<Value>,
    category: Option<String>,
    message: Option<String>,
}

impl ErrorDetail {
    fn code(&self) -> Option<String> {
        match self.error_id.as_ref()? {
            Value::Null => None,
            Value::String(code) => Some(code.clone()),
            other => Some(other.to_string()),
        }
    }

    fn describe(&self) -> String {
        format!(
            "Category: {}, Code: {}, {}",
            self.category.as_deref().unwrap_or("unknown"),
            self.code().as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("unknown"),
        )
    }
}

#[derive(Debug, Clone, Default)]
struct BodyMessages {
    errors: Vec<String>,
    warnings: Vec<String>,
    codes: Vec<String>,
}

/// Response to one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    verb: Verb,
    http: HttpResponse,
    log_warnings: bool,
    log_errors: bool,
    messages: OnceCell<BodyMessages>,
}

impl ApiResponse {
    /// Wrap a transport response.
    ///
    /// `log_warnings`/`log_errors` control whether body warnings and errors
    /// are logged when they are first extracted.
    pub fn new(verb: Verb, http: HttpResponse, log_warnings: bool, log_errors: bool) -> Self {
        Self { verb, http, log_warnings, log_errors, messages: OnceCell::new() }
    }

    pub fn verb(&self) -> Verb {
        self.verb
    }

    pub fn status(&self) -> StatusCode {
        self.http.status()
    }

    pub fn status_code(&self) -> u16 {
        self.http.status_code()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.http.headers()
    }

    /// Raw response body
    pub fn text(&self) -> &str {
        self.http.text()
    }

    pub fn elapsed(&self) -> Duration {
        self.http.elapsed()
    }

    /// Decode the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Parse` if the body does not decode.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.http.json()
    }

    /// Reason phrase of a non-200 status, `None` on 200.
    pub fn response_error(&self) -> Option<&'static str> {
        (self.http.status() != StatusCode::OK).then(|| self.http.reason())
    }

    /// Formatted entries of the body's `errors` array
    pub fn body_errors(&self) -> &[String] {
        &self.messages().errors
    }

    /// Formatted entries of the body's `warnings` array
    pub fn body_warnings(&self) -> &[String] {
        &self.messages().warnings
    }

    /// Distinct error ids seen in `errors` and `warnings`, in first-seen order
    pub fn response_codes(&self) -> &[String] {
        &self.messages().codes
    }

    /// `"<verb>: <msg>, <msg>"` over the status error and body errors, or
    /// `None` when there are neither.
    pub fn error(&self) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(reason) = self.response_error() {
            parts.push(reason);
        }
        parts.extend(self.body_errors().iter().map(String::as_str));

        if parts.is_empty() {
            None
        } else {
            Some(format!("{}: {}", self.verb, parts.join(", ")))
        }
    }

    fn messages(&self) -> &BodyMessages {
        self.messages.get_or_init(|| self.extract())
    }

    fn extract(&self) -> BodyMessages {
        if self.http.status() != StatusCode::OK {
            return BodyMessages::default();
        }

        let envelope: ErrorEnvelope = match serde_json::from_str(self.http.text()) {
            Ok(envelope) => envelope,
            Err(err) => {
                debug!(verb = %self.verb, error = %err, "Response body has no readable error container");
                return BodyMessages::default();
            }
        };

        let mut messages = BodyMessages::default();
        for (details, target) in [
            (&envelope.errors, &mut messages.errors),
            (&envelope.warnings, &mut messages.warnings),
        ] {
            for detail in details {
                if let Some(code) = detail.code() {
                    if !messages.codes.contains(&code) {
                        messages.codes.push(code);
                    }
                }
                target.push(detail.describe());
            }
        }

        if self.log_warnings && !messages.warnings.is_empty() {
            warn!(verb = %self.verb, warnings = %messages.warnings.join("\n"), "API returned warnings");
        }
        if self.log_errors && !messages.errors.is_empty() {
            error!(verb = %self.verb, errors = %messages.errors.join("\n"), "API returned errors");
        }

        messages
    }
}
