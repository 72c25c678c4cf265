//! # browsekit domain
//!
//! Plain data types shared by the Browse API client.
//!
//! This crate contains:
//! - The supported API verbs and their HTTP method/path mapping
//! - Client configuration and its layered overrides
//! - Error types and the `Result` alias
//! - API constants (default domain, endpoint paths, header names)
//!
//! ## Architecture
//! - No dependencies on other browsekit crates
//! - No I/O: everything that touches the network or filesystem lives in
//!   `browsekit-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod verb;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use verb::*;
