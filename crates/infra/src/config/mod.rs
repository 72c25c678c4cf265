//! Configuration loading
//!
//! Layers explicit values, environment variables and a per-domain config
//! file section on top of the built-in defaults.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
