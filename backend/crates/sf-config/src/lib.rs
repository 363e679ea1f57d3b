mod config;
mod database_config;
mod error;
mod identity_provider_config;
mod log_level;
mod logging_config;
mod retry_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_provider_config::IdentityProviderConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;

const CONFIG_DIR_ENV: &str = "SF_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".storefront";
const CONFIG_FILENAME: &str = "config.toml";
const DEFAULT_DATABASE_FILENAME: &str = "data.db";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
