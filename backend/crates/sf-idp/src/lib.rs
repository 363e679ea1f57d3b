//! Read-only access to the external identity provider.
//!
//! The provider has no email index, so [`ProviderLookup`] walks its paginated
//! admin user listing up to a fixed number of pages.

pub(crate) mod auth_admin_client;
pub(crate) mod error;
pub(crate) mod lookup;
pub(crate) mod provider;
pub mod retry;

#[cfg(test)]
mod tests;

pub use auth_admin_client::AuthAdminClient;
pub use error::{IdpError, Result as IdpResult};
pub use lookup::ProviderLookup;
pub use provider::IdentityProvider;
pub use retry::{IsRetryable, RetryPolicy, with_retry};
