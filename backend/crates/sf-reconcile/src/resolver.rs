use crate::{LocalScan, ReconcileError, ReconcileResult, Stage};

use sf_core::{CanonicalSource, IdentityId, NormalizedEmail};
use sf_db::IdentityRepository;

use log::info;
use sqlx::SqlitePool;

/// What the resolver chose, before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The provider knows the email; its id wins.
    Provider(IdentityId),
    /// No provider identity; the newest local row wins.
    Local(IdentityId),
    /// Nobody knows the email; a new row must be created.
    Synthesize,
}

impl Decision {
    /// Picks the canonical id.
    ///
    /// Provider identities take precedence over local rows. Among local rows
    /// the newest by creation time wins, ties going to the greater id.
    pub fn from_inputs(provider_id: Option<IdentityId>, scan: &LocalScan) -> Self {
        match (provider_id, scan.newest()) {
            (Some(id), _) => Decision::Provider(id),
            (None, Some(newest)) => Decision::Local(newest.id.clone()),
            (None, None) => Decision::Synthesize,
        }
    }

    pub fn source(&self) -> CanonicalSource {
        match self {
            Decision::Provider(_) => CanonicalSource::Provider,
            Decision::Local(_) => CanonicalSource::Local,
            Decision::Synthesize => CanonicalSource::New,
        }
    }

    pub fn canonical_id(&self) -> Option<&IdentityId> {
        match self {
            Decision::Provider(id) | Decision::Local(id) => Some(id),
            Decision::Synthesize => None,
        }
    }
}

/// The identity that represents the email from now on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub id: IdentityId,
    pub source: CanonicalSource,
}

/// Turns a [`Decision`] into a concrete canonical id.
pub struct CanonicalResolver {
    identities: IdentityRepository,
}

impl CanonicalResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            identities: IdentityRepository::new(pool),
        }
    }

    /// Resolves the canonical identity. The only write is creating a fresh
    /// row when neither the provider nor the store knows the email.
    pub async fn resolve(
        &self,
        email: &NormalizedEmail,
        provider_id: Option<IdentityId>,
        scan: &LocalScan,
    ) -> ReconcileResult<Canonical> {
        let decision = Decision::from_inputs(provider_id, scan);
        let source = decision.source();

        let id = match decision {
            Decision::Provider(id) | Decision::Local(id) => id,
            Decision::Synthesize => {
                let created = self
                    .identities
                    .create_for_email(email)
                    .await
                    .map_err(ReconcileError::store(Stage::Resolve))?;
                created.id
            }
        };

        info!("Canonical identity for {}: {} ({})", email, id, source);

        Ok(Canonical { id, source })
    }
}
