//! Configuration for GraphQL schema reconstruction runs.
//!
//! A config file names the target endpoint, extra request headers and the
//! number of candidate identifiers probed per request. YAML, JSON and TOML
//! files are supported.

mod config;
mod error;
mod loader;

pub use config::{ReconConfig, DEFAULT_BUCKET_SIZE};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
