use crate::{Canonical, LocalScan, ReconcileError, ReconcileResult};

use sf_core::{CanonicalSource, IdentityId, IdentityRecord, NormalizedEmail};
use sf_db::{DbError, IdentityRepository};

use log::{info, warn};
use sqlx::SqlitePool;

/// How the canonical row came to exist, and which rows are now duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The resolver just created the row; nothing else existed.
    Synthesized,
    /// A scanned row already carried the canonical id.
    AlreadyPresent { duplicates: Vec<IdentityId> },
    /// The email slot was freed and a new canonical row inserted.
    Created { duplicates: Vec<IdentityId> },
    /// A row with the canonical id existed under another email; the slot was
    /// freed and that row took over the email.
    Adopted { duplicates: Vec<IdentityId> },
}

impl InsertOutcome {
    pub fn duplicates(&self) -> &[IdentityId] {
        match self {
            InsertOutcome::Synthesized => &[],
            InsertOutcome::AlreadyPresent { duplicates }
            | InsertOutcome::Created { duplicates }
            | InsertOutcome::Adopted { duplicates } => duplicates,
        }
    }
}

/// Guarantees a row with the canonical id holds the real email, even when
/// other rows currently occupy the unique email slot.
///
/// Not transactional: a failure after the first placeholder rename leaves
/// renamed rows and no canonical row. The error lists the renamed ids, and the
/// next scan picks those rows up again.
pub struct ConflictSafeInserter {
    identities: IdentityRepository,
}

impl ConflictSafeInserter {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            identities: IdentityRepository::new(pool),
        }
    }

    pub async fn ensure(
        &self,
        canonical: &Canonical,
        email: &NormalizedEmail,
        scan: &LocalScan,
    ) -> ReconcileResult<InsertOutcome> {
        if canonical.source == CanonicalSource::New {
            return Ok(InsertOutcome::Synthesized);
        }

        let others = || -> Vec<IdentityId> {
            scan.all()
                .filter(|record| record.id != canonical.id)
                .map(|record| record.id.clone())
                .collect()
        };

        if scan.contains(&canonical.id) {
            let duplicates = others();
            info!(
                "Canonical {} already stored; {} duplicate(s)",
                canonical.id,
                duplicates.len()
            );
            return Ok(InsertOutcome::AlreadyPresent { duplicates });
        }

        let renamed = self.park_slot_holders(canonical, email, scan).await?;

        let conflict = |source: DbError| ReconcileError::ConflictResolution {
            canonical_id: canonical.id.clone(),
            renamed: renamed.clone(),
            source,
        };

        let existing = self
            .identities
            .find_by_id(&canonical.id)
            .await
            .map_err(conflict)?;

        let duplicates = others();

        match existing {
            Some(row) => {
                warn!(
                    "Canonical {} exists under email {}; moving it to {}",
                    canonical.id, row.email, email
                );
                self.identities
                    .update_email(&canonical.id, email.as_str())
                    .await
                    .map_err(conflict)?;
                Ok(InsertOutcome::Adopted { duplicates })
            }
            None => {
                let name = scan.newest().and_then(|record| record.name.clone());
                let record = IdentityRecord::new(canonical.id.clone(), email).with_name(name);
                self.identities.create(&record).await.map_err(conflict)?;
                info!(
                    "Inserted canonical {} for {}; {} duplicate(s)",
                    canonical.id,
                    email,
                    duplicates.len()
                );
                Ok(InsertOutcome::Created { duplicates })
            }
        }
    }

    /// Moves every live row holding the email to `<email>+dup-<rowId>`.
    /// Rows already parked by an earlier run are left as they are.
    async fn park_slot_holders(
        &self,
        canonical: &Canonical,
        email: &NormalizedEmail,
        scan: &LocalScan,
    ) -> ReconcileResult<Vec<IdentityId>> {
        let mut renamed = Vec::with_capacity(scan.rows.len());

        for record in &scan.rows {
            let placeholder = email.placeholder_for(&record.id);

            if let Err(source) = self
                .identities
                .update_email(&record.id, &placeholder)
                .await
            {
                return Err(ReconcileError::ConflictResolution {
                    canonical_id: canonical.id.clone(),
                    renamed,
                    source,
                });
            }

            info!("Parked row {} under {}", record.id, placeholder);
            renamed.push(record.id.clone());
        }

        Ok(renamed)
    }
}
