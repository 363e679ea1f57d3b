use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, IdentityProviderConfig, LoggingConfig, RetryConfig,
};

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub identity_provider: IdentityProviderConfig,
    pub logging: LoggingConfig,
    pub retry: RetryConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Config directory from SF_CONFIG_DIR, else ./.storefront/
    /// 2. config.toml inside it if present, else defaults
    /// 3. SF_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_path = Self::config_dir()?.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SF_CONFIG_DIR env var > ./.storefront/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = env::current_dir().map_err(ConfigError::working_directory)?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() so a bad setting fails before any lookup or write.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.database.validate()?;
        self.identity_provider.validate()?;
        self.retry.validate()?;

        Ok(())
    }

    /// Absolute path to the SQLite database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(self.database.resolve(&Self::config_dir()?))
    }

    /// Absolute path to the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match self.logging.file {
            Some(ref filename) => {
                let log_dir = Self::config_dir()?.join(&self.logging.dir);
                Ok(Some(log_dir.join(filename)))
            }
            None => Ok(None),
        }
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  database: {}", self.database.path);
        info!(
            "  identity_provider: {} (service key {}, page_size={}, max_pages={}, timeout={}s)",
            self.identity_provider.url.as_deref().unwrap_or("<unset>"),
            if self.identity_provider.service_key.is_some() {
                "set"
            } else {
                "missing"
            },
            self.identity_provider.page_size,
            self.identity_provider.max_pages,
            self.identity_provider.timeout_secs
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("<stderr>")
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );
    }

    fn apply_env_overrides(&mut self) {
        let db = &mut self.database;
        override_parsed("SF_DATABASE_PATH", &mut db.path);

        let idp = &mut self.identity_provider;
        override_optional("SF_IDP_URL", &mut idp.url);
        override_optional("SF_IDP_SERVICE_KEY", &mut idp.service_key);
        override_parsed("SF_IDP_PAGE_SIZE", &mut idp.page_size);
        override_parsed("SF_IDP_MAX_PAGES", &mut idp.max_pages);
        override_parsed("SF_IDP_TIMEOUT_SECS", &mut idp.timeout_secs);

        let logging = &mut self.logging;
        override_parsed("SF_LOG_LEVEL", &mut logging.level);
        override_flag("SF_LOG_COLORED", &mut logging.colored);
        override_optional("SF_LOG_FILE", &mut logging.file);

        let retry = &mut self.retry;
        override_parsed("SF_RETRY_MAX_ATTEMPTS", &mut retry.max_attempts);
        override_parsed("SF_RETRY_INITIAL_DELAY_MS", &mut retry.initial_delay_ms);
        override_parsed("SF_RETRY_MAX_DELAY_SECS", &mut retry.max_delay_secs);
        override_parsed("SF_RETRY_BACKOFF_MULTIPLIER", &mut retry.backoff_multiplier);
        override_flag("SF_RETRY_JITTER", &mut retry.jitter);
    }
}

/// Unparseable values are ignored and the previous value kept.
fn override_parsed<T: FromStr>(var: &str, target: &mut T) {
    if let Some(parsed) = env::var(var).ok().and_then(|raw| raw.trim().parse().ok()) {
        *target = parsed;
    }
}

fn override_optional(var: &str, target: &mut Option<String>) {
    if let Ok(raw) = env::var(var) {
        *target = Some(raw);
    }
}

/// `true`, `1`, `yes` and `on` (any case) enable; anything else disables.
fn override_flag(var: &str, target: &mut bool) {
    if let Ok(raw) = env::var(var) {
        *target = matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        );
    }
}
