use crate::IdpResult;

use sf_core::ExternalIdentity;

use async_trait::async_trait;

/// Paginated user listing of an external authentication system.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// One page of users. Pages are numbered from 1; a page shorter than
    /// `per_page` is the last one.
    async fn list_users(&self, page: u32, per_page: u32) -> IdpResult<Vec<ExternalIdentity>>;
}
