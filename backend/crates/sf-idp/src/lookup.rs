use crate::{IdentityProvider, IdpResult};

use sf_config::IdentityProviderConfig;
use sf_core::{IdentityId, NormalizedEmail};

use log::{debug, info};

/// Bounded search of the provider's user listing for one email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderLookup {
    pub page_size: u32,
    pub max_pages: u32,
}

impl ProviderLookup {
    /// A zero page size or page bound is raised to one.
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    pub fn from_config(config: &IdentityProviderConfig) -> Self {
        Self::new(config.page_size, config.max_pages)
    }

    /// Identifier of the first provider user whose email matches, ignoring
    /// case.
    ///
    /// Walks pages `1..=max_pages` and stops early only on an empty page.
    /// Providers may cap `per_page` below the requested size, so a short page
    /// is not the end of the listing. Running out of pages is `Ok(None)`, not
    /// an error. Provider errors are returned as-is; this never retries.
    pub async fn find_user_id(
        &self,
        provider: &dyn IdentityProvider,
        email: &NormalizedEmail,
    ) -> IdpResult<Option<IdentityId>> {
        for page in 1..=self.max_pages {
            let users = provider.list_users(page, self.page_size).await?;

            if users.is_empty() {
                debug!("Provider listing exhausted after {} page(s)", page - 1);
                return Ok(None);
            }

            if let Some(found) = users
                .into_iter()
                .find(|user| user.email.as_deref().is_some_and(|e| email.matches(e)))
            {
                info!("Provider identity {} found on page {}", found.id, page);
                return Ok(Some(found.id));
            }
        }

        info!(
            "No provider identity for {} within {} page(s) of {}",
            email, self.max_pages, self.page_size
        );
        Ok(None)
    }
}
