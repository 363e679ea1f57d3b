use crate::{ReconcileError, ReconcileResult, Stage};

use sf_core::{IdentityId, NormalizedEmail};
use sf_db::IdentityRepository;

use log::info;
use sqlx::SqlitePool;

/// Removes duplicate rows once nothing references them and settles the
/// canonical row's email on its normalized form.
pub struct DuplicateCleaner {
    identities: IdentityRepository,
}

impl DuplicateCleaner {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            identities: IdentityRepository::new(pool),
        }
    }

    /// Returns the number of duplicate rows deleted.
    pub async fn clean(
        &self,
        canonical: &IdentityId,
        duplicates: &[IdentityId],
        email: &NormalizedEmail,
    ) -> ReconcileResult<u64> {
        let deleted = self
            .identities
            .delete_many(duplicates)
            .await
            .map_err(ReconcileError::store(Stage::Cleanup))?;

        // Also restores the real email on a canonical row that was parked
        // under a placeholder.
        self.identities
            .update_email(canonical, email.as_str())
            .await
            .map_err(ReconcileError::store(Stage::Cleanup))?;

        info!(
            "Removed {} duplicate row(s); {} now holds {}",
            deleted, canonical, email
        );

        Ok(deleted)
    }
}
