//! Identity reconciliation: folds every identity row for one email into a
//! single canonical identity and repoints all data that referenced the others.
//!
//! A run is a saga of sequential, individually committed steps:
//!
//! 1. scan the store for rows matching the email ([`LocalRecordScanner`])
//! 2. look the email up at the identity provider ([`sf_idp::ProviderLookup`])
//! 3. pick the canonical id ([`CanonicalResolver`])
//! 4. make sure a row with that id holds the real email ([`ConflictSafeInserter`])
//! 5. repoint every dependent reference ([`ReferenceMigrator`])
//! 6. delete the duplicates and normalize the email ([`DuplicateCleaner`])
//!
//! There is no rollback. The only inconsistent resting state is step 4
//! failing between renaming rows to `<email>+dup-<rowId>` placeholders and
//! creating the canonical row. The next run detects those placeholder rows and
//! folds them back in. Steps 5 and 6 are idempotent and safe to repeat.
//!
//! Two runs for the same email must not overlap.

pub(crate) mod cleaner;
pub(crate) mod error;
pub(crate) mod inserter;
pub(crate) mod migrator;
pub(crate) mod reconciler;
pub(crate) mod report;
pub(crate) mod resolver;
pub(crate) mod scanner;
pub(crate) mod stage;

#[cfg(test)]
mod tests;

pub use cleaner::DuplicateCleaner;
pub use error::{ReconcileError, Result as ReconcileResult};
pub use inserter::{ConflictSafeInserter, InsertOutcome};
pub use migrator::ReferenceMigrator;
pub use reconciler::Reconciler;
pub use report::{ReconcilePlan, ReconcileReport, RelationMigration, RelationReferences};
pub use resolver::{Canonical, CanonicalResolver, Decision};
pub use scanner::{LocalRecordScanner, LocalScan};
pub use stage::Stage;
