use crate::{
    CanonicalResolver, ConflictSafeInserter, Decision, DuplicateCleaner, LocalRecordScanner,
    LocalScan, ReconcileError, ReconcilePlan, ReconcileReport, ReconcileResult, ReferenceMigrator,
    RelationReferences, Stage,
};

use sf_core::{CanonicalSource, DependentRelation, IdentityId, NormalizedEmail};
use sf_db::{ReferenceRepository, RelationRepository};
use sf_idp::{IdentityProvider, ProviderLookup, RetryPolicy, with_retry};

use std::sync::Arc;

use log::info;
use sqlx::SqlitePool;

/// Runs reconciliations against one store and one identity provider.
///
/// Both collaborators are passed in, so tests can swap the provider for a
/// fake and the store for an in-memory database.
pub struct Reconciler {
    pool: SqlitePool,
    provider: Arc<dyn IdentityProvider>,
    lookup: ProviderLookup,
    retry: RetryPolicy,
}

impl Reconciler {
    pub fn new(
        pool: SqlitePool,
        provider: Arc<dyn IdentityProvider>,
        lookup: ProviderLookup,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            pool,
            provider,
            lookup,
            retry,
        }
    }

    /// Folds every identity row for `email` into one canonical identity.
    pub async fn run(&self, email: &NormalizedEmail) -> ReconcileResult<ReconcileReport> {
        info!("Reconciling identity {}", email);

        let scan = LocalRecordScanner::new(self.pool.clone()).scan(email).await?;
        let provider_id = self.find_provider_id(email).await?;
        // Loaded before the first write so a bad registry aborts cleanly.
        let relations = self.dependent_relations().await?;

        let canonical = CanonicalResolver::new(self.pool.clone())
            .resolve(email, provider_id, &scan)
            .await?;

        let outcome = ConflictSafeInserter::new(self.pool.clone())
            .ensure(&canonical, email, &scan)
            .await?;
        let duplicates = outcome.duplicates();

        let migrated = ReferenceMigrator::new(self.pool.clone())
            .migrate(&relations, duplicates, &canonical.id)
            .await?;

        let merged = if canonical.source == CanonicalSource::New {
            0
        } else {
            DuplicateCleaner::new(self.pool.clone())
                .clean(&canonical.id, duplicates, email)
                .await?
        };

        info!(
            "Reconciled {}: canonical {} ({}), merged {}",
            email, canonical.id, canonical.source, merged
        );

        Ok(ReconcileReport {
            email: email.clone(),
            canonical_id: canonical.id,
            canonical_source: canonical.source,
            merged,
            migrated,
        })
    }

    /// Computes what [`run`](Self::run) would do without writing anything.
    pub async fn plan(&self, email: &NormalizedEmail) -> ReconcileResult<ReconcilePlan> {
        info!("Planning reconciliation of {} (dry run)", email);

        let scan = LocalRecordScanner::new(self.pool.clone()).scan(email).await?;
        let provider_id = self.find_provider_id(email).await?;
        let relations = self.dependent_relations().await?;

        let decision = Decision::from_inputs(provider_id, &scan);
        let duplicates = planned_duplicates(&decision, &scan);
        let references = self.count_references(&relations, &duplicates).await?;

        Ok(ReconcilePlan {
            email: email.clone(),
            canonical_id: decision.canonical_id().cloned(),
            canonical_source: decision.source(),
            duplicates,
            stranded: scan.stranded.iter().map(|r| r.id.clone()).collect(),
            references,
        })
    }

    /// Provider lookup, retried here on transient failures.
    async fn find_provider_id(
        &self,
        email: &NormalizedEmail,
    ) -> ReconcileResult<Option<IdentityId>> {
        let provider = self.provider.as_ref();
        let lookup = self.lookup;

        let found = with_retry(&self.retry, "Identity provider lookup", || {
            lookup.find_user_id(provider, email)
        })
        .await?;

        Ok(found)
    }

    async fn dependent_relations(&self) -> ReconcileResult<Vec<DependentRelation>> {
        let relations = RelationRepository::new(self.pool.clone())
            .list()
            .await
            .map_err(ReconcileError::store(Stage::Resolve))?;

        if relations.is_empty() {
            return Err(ReconcileError::no_dependent_relations());
        }

        Ok(relations)
    }

    async fn count_references(
        &self,
        relations: &[DependentRelation],
        duplicates: &[IdentityId],
    ) -> ReconcileResult<Vec<RelationReferences>> {
        let references = ReferenceRepository::new(self.pool.clone());
        let mut counts = Vec::with_capacity(relations.len());

        for relation in relations {
            let rows = references
                .count_referencing(relation, duplicates)
                .await
                .map_err(|source| ReconcileError::Migration {
                    relation: relation.to_string(),
                    source,
                })?;

            counts.push(RelationReferences {
                table: relation.table().to_string(),
                column: relation.column().to_string(),
                rows,
            });
        }

        Ok(counts)
    }
}

/// Rows a run would delete for `decision`, without performing any insert.
pub(crate) fn planned_duplicates(decision: &Decision, scan: &LocalScan) -> Vec<IdentityId> {
    match decision.canonical_id() {
        Some(canonical) => scan.ids().into_iter().filter(|id| id != canonical).collect(),
        None => Vec::new(),
    }
}
