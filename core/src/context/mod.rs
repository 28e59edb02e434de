//! Application context: persisted configuration.

mod config;
mod error;

pub use config::AppConfig;
pub use error::ConfigError;
