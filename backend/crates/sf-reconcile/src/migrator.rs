use crate::{ReconcileError, ReconcileResult, RelationMigration};

use sf_core::{DependentRelation, IdentityId};
use sf_db::ReferenceRepository;

use log::{debug, info};
use sqlx::SqlitePool;

/// Repoints every registered foreign-key column from duplicate ids to the
/// canonical id.
///
/// Relations are independent and processed in list order. The first failure
/// stops the run and names its relation; relations already processed stay
/// migrated, which is harmless because a repeat pass finds nothing to change.
pub struct ReferenceMigrator {
    references: ReferenceRepository,
}

impl ReferenceMigrator {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            references: ReferenceRepository::new(pool),
        }
    }

    pub async fn migrate(
        &self,
        relations: &[DependentRelation],
        duplicates: &[IdentityId],
        canonical: &IdentityId,
    ) -> ReconcileResult<Vec<RelationMigration>> {
        if duplicates.is_empty() {
            debug!("No duplicates; skipping reference migration");
            return Ok(Vec::new());
        }

        let mut migrated = Vec::with_capacity(relations.len());

        for relation in relations {
            let rows = self
                .references
                .reassign(relation, duplicates, canonical)
                .await
                .map_err(|source| ReconcileError::Migration {
                    relation: relation.to_string(),
                    source,
                })?;

            debug!("Migrated {} row(s) in {}", rows, relation);
            migrated.push(RelationMigration {
                relation: relation.clone(),
                rows,
            });
        }

        info!(
            "Migrated {} reference(s) across {} relation(s) to {}",
            migrated.iter().map(|m| m.rows).sum::<u64>(),
            relations.len(),
            canonical
        );

        Ok(migrated)
    }
}
