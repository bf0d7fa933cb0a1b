//! Shared configuration for SpaceHub interfaces.

pub mod config;
pub mod error;

pub use config::{default_data_dir, SpaceHubConfig};
pub use error::{ConfigError, Result};
