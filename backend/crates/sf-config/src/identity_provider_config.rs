use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

pub const MIN_MAX_PAGES: u32 = 1;
pub const MAX_MAX_PAGES: u32 = 1000;
pub const DEFAULT_MAX_PAGES: u32 = 50;

pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the external authentication provider's admin API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityProviderConfig {
    /// Base URL, e.g. `https://project.example.co`
    pub url: Option<String>,
    /// Service-role key sent as both `apikey` and bearer token. Never logged.
    pub service_key: Option<String>,
    /// Users requested per page of the admin listing
    pub page_size: u32,
    /// Upper bound on pages scanned before giving up with "not found"
    pub max_pages: u32,
    /// Per-request timeout enforced by the HTTP client
    pub timeout_secs: u64,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            url: None,
            service_key: None,
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl IdentityProviderConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match self.url.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(ConfigError::identity_provider(
                    "identity_provider.url is required (or set SF_IDP_URL)",
                ));
            }
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                return Err(ConfigError::identity_provider(format!(
                    "identity_provider.url must start with http:// or https://, got {}",
                    url
                )));
            }
            Some(_) => {}
        }

        if self
            .service_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(ConfigError::identity_provider(
                "identity_provider.service_key is required (or set SF_IDP_SERVICE_KEY)",
            ));
        }

        if self.page_size < MIN_PAGE_SIZE || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::identity_provider(format!(
                "identity_provider.page_size must be {}-{}, got {}",
                MIN_PAGE_SIZE, MAX_PAGE_SIZE, self.page_size
            )));
        }

        if self.max_pages < MIN_MAX_PAGES || self.max_pages > MAX_MAX_PAGES {
            return Err(ConfigError::identity_provider(format!(
                "identity_provider.max_pages must be {}-{}, got {}",
                MIN_MAX_PAGES, MAX_MAX_PAGES, self.max_pages
            )));
        }

        if self.timeout_secs < MIN_TIMEOUT_SECS || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::identity_provider(format!(
                "identity_provider.timeout_secs must be {}-{}, got {}",
                MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}
