use sf_core::{CanonicalSource, DependentRelation, IdentityId, NormalizedEmail};

use serde::Serialize;

/// Rows rewritten in one dependent relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationMigration {
    pub relation: DependentRelation,
    pub rows: u64,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub email: NormalizedEmail,
    pub canonical_id: IdentityId,
    pub canonical_source: CanonicalSource,
    /// Duplicate rows deleted.
    pub merged: u64,
    pub migrated: Vec<RelationMigration>,
}

/// Rows in one dependent relation that a run would repoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationReferences {
    pub table: String,
    pub column: String,
    pub rows: i64,
}

/// What a run would do, computed without writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcilePlan {
    pub email: NormalizedEmail,
    /// None when a new identity would be synthesized.
    pub canonical_id: Option<IdentityId>,
    pub canonical_source: CanonicalSource,
    pub duplicates: Vec<IdentityId>,
    /// Placeholder rows left by an interrupted run, included in `duplicates`
    /// unless one of them is canonical.
    pub stranded: Vec<IdentityId>,
    pub references: Vec<RelationReferences>,
}
