use crate::{ReconcileError, ReconcileResult, Stage};

use sf_core::{IdentityId, IdentityRecord, NormalizedEmail};
use sf_db::IdentityRepository;

use log::{info, warn};
use sqlx::SqlitePool;

/// Identity rows found for one email.
#[derive(Debug, Clone, Default)]
pub struct LocalScan {
    /// Rows whose email matches ignoring case, newest first.
    pub rows: Vec<IdentityRecord>,
    /// Rows still parked under a placeholder by an interrupted run, newest
    /// first.
    pub stranded: Vec<IdentityRecord>,
}

impl LocalScan {
    /// Every scanned row, live rows before stranded ones.
    pub fn all(&self) -> impl Iterator<Item = &IdentityRecord> {
        self.rows.iter().chain(self.stranded.iter())
    }

    pub fn ids(&self) -> Vec<IdentityId> {
        self.all().map(|record| record.id.clone()).collect()
    }

    pub fn contains(&self, id: &IdentityId) -> bool {
        self.all().any(|record| &record.id == id)
    }

    /// The most recently created row. Live rows win over stranded ones.
    pub fn newest(&self) -> Option<&IdentityRecord> {
        self.rows.first().or_else(|| self.stranded.first())
    }
}

/// Reads every identity row that belongs to an email.
pub struct LocalRecordScanner {
    identities: IdentityRepository,
}

impl LocalRecordScanner {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            identities: IdentityRepository::new(pool),
        }
    }

    pub async fn scan(&self, email: &NormalizedEmail) -> ReconcileResult<LocalScan> {
        let rows = self
            .identities
            .find_by_email(email)
            .await
            .map_err(ReconcileError::store(Stage::Scan))?;

        let stranded = self
            .identities
            .find_placeholders(email)
            .await
            .map_err(ReconcileError::store(Stage::Scan))?;

        for record in &stranded {
            warn!(
                "Row {} is parked under placeholder email {} from an interrupted run; folding it back in",
                record.id, record.email
            );
        }

        info!(
            "Local scan for {}: {} matching row(s), {} stranded placeholder row(s)",
            email,
            rows.len(),
            stranded.len()
        );

        Ok(LocalScan { rows, stranded })
    }
}
