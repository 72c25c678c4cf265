//! Browse API client
//!
//! This module turns a [`Verb`](browsekit_domain::Verb) and a parameter
//! mapping into an authenticated HTTP call and collects the errors and
//! warnings eBay reports in the response.
//!
//! # Architecture
//!
//! - [`request`]: verb to method, URL, query, body and headers
//! - [`auth`]: client-credentials tokens behind a single-entry cache
//! - [`response`]: status and body error extraction
//! - [`client`]: the [`Connection`] tying them together over the blocking
//!   [`HttpClient`](crate::http::HttpClient)

pub mod auth;
pub mod client;
pub mod expiring;
pub mod request;
pub mod response;

pub use auth::{ClientCredentialsSource, IssuedToken, TokenCache, TokenSource};
pub use client::Connection;
pub use expiring::Expiring;
pub use request::{
    build_body, build_headers, build_query, build_url, Params, PreparedRequest, RequestBuilder,
};
pub use response::ApiResponse;
