//! # browsekit infrastructure
//!
//! Blocking client for the eBay Browse REST API.
//!
//! This crate contains:
//! - The API [`Connection`] with request building and response error
//!   extraction
//! - OAuth2 client-credentials token caching
//! - The blocking HTTP transport
//! - Configuration loading from files and the environment
//!
//! ```no_run
//! use browsekit_infra::{config, Connection, Params};
//! use browsekit_domain::{ConfigOverrides, Verb};
//!
//! # fn main() -> browsekit_domain::Result<()> {
//! let config = config::load(&ConfigOverrides::default(), None)?;
//! let mut conn = Connection::new(config)?;
//!
//! let mut params = Params::new();
//! params.insert("q".into(), "drone".into());
//! params.insert("limit".into(), 3.into());
//!
//! let response = conn.execute(Verb::Search, &params)?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

pub use api::{ApiResponse, Connection, Params, PreparedRequest, TokenCache, TokenSource};
pub use errors::InfraError;
pub use http::{HttpClient, HttpResponse};
