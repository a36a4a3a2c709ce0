//! Configuration loading
//!
//! Populates the domain [`Config`](edulink_domain::Config) from environment
//! variables, falling back to a TOML/JSON file probed from standard
//! locations.

pub mod loader;

pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
