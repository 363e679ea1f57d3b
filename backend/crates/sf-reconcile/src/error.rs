use crate::Stage;

use sf_core::IdentityId;
use sf_db::DbError;
use sf_idp::IdpError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Identity provider lookup failed: {source}")]
    Lookup {
        #[source]
        source: IdpError,
    },

    #[error("Store operation failed during {stage}: {source}")]
    Store {
        stage: Stage,
        #[source]
        source: DbError,
    },

    #[error(
        "Conflict resolution for {canonical_id} failed after renaming {} row(s) to placeholder emails [{}]; inspect them before re-running: {source}",
        .renamed.len(),
        join_ids(.renamed)
    )]
    ConflictResolution {
        canonical_id: IdentityId,
        renamed: Vec<IdentityId>,
        #[source]
        source: DbError,
    },

    #[error("Failed to migrate references in {relation}: {source}")]
    Migration {
        relation: String,
        #[source]
        source: DbError,
    },

    #[error("No dependent relations are registered; refusing to merge {location}")]
    NoDependentRelations { location: ErrorLocation },
}

impl ReconcileError {
    pub fn store(stage: Stage) -> impl FnOnce(DbError) -> Self {
        move |source| ReconcileError::Store { stage, source }
    }

    #[track_caller]
    pub fn no_dependent_relations() -> Self {
        ReconcileError::NoDependentRelations {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The saga step that failed.
    pub fn stage(&self) -> Stage {
        match self {
            ReconcileError::Lookup { .. } => Stage::Lookup,
            ReconcileError::Store { stage, .. } => *stage,
            ReconcileError::ConflictResolution { .. } => Stage::Insert,
            ReconcileError::Migration { .. } => Stage::Migrate,
            ReconcileError::NoDependentRelations { .. } => Stage::Resolve,
        }
    }
}

impl From<IdpError> for ReconcileError {
    fn from(source: IdpError) -> Self {
        ReconcileError::Lookup { source }
    }
}

fn join_ids(ids: &[IdentityId]) -> String {
    ids.iter()
        .map(IdentityId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ReconcileError>;
