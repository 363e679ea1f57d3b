use crate::{IdentityProvider, IdpError, IdpResult};

use sf_config::IdentityProviderConfig;
use sf_core::ExternalIdentity;

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::Value;

const LIST_USERS_PATH: &str = "/auth/v1/admin/users";

#[derive(Deserialize)]
struct ListUsersResponse {
    #[serde(default)]
    users: Vec<ExternalIdentity>,
}

/// HTTP client for the provider's admin API, authenticated with a
/// service-role key.
pub struct AuthAdminClient {
    pub base_url: String,
    service_key: String,
    client: ReqwestClient,
}

impl AuthAdminClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Provider URL (e.g., "https://project.example.co")
    /// * `service_key` - Service-role key, sent as `apikey` and bearer token
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, service_key: &str, timeout: Duration) -> IdpResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
            client,
        })
    }

    pub fn from_config(config: &IdentityProviderConfig) -> IdpResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| IdpError::configuration("identity provider url is not set"))?;
        let key = config
            .service_key
            .as_deref()
            .ok_or_else(|| IdpError::configuration("identity provider service key is not set"))?;

        Self::new(url, key, Duration::from_secs(config.timeout_secs))
    }

    /// Pulls a human-readable message out of the provider's error body, which
    /// uses `msg`, `message` or `error_description` depending on the endpoint.
    fn error_message(body: &str, fallback: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|value| {
                ["msg", "message", "error_description", "error"]
                    .iter()
                    .find_map(|key| value.get(*key).and_then(Value::as_str).map(String::from))
            })
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[async_trait]
impl IdentityProvider for AuthAdminClient {
    async fn list_users(&self, page: u32, per_page: u32) -> IdpResult<Vec<ExternalIdentity>> {
        let url = format!(
            "{}{}?page={}&per_page={}",
            self.base_url, LIST_USERS_PATH, page, per_page
        );
        debug!("Listing provider users: page={} per_page={}", page, per_page);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let fallback = status.canonical_reason().unwrap_or("request failed");
            return Err(IdpError::from_status(
                status.as_u16(),
                Self::error_message(&body, fallback),
            ));
        }

        let parsed: ListUsersResponse = serde_json::from_str(&body)?;

        Ok(parsed.users)
    }
}
