pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::canonical_source::CanonicalSource;
pub use models::dependent_relation::DependentRelation;
pub use models::external_identity::ExternalIdentity;
pub use models::identity_id::IdentityId;
pub use models::identity_record::IdentityRecord;
pub use models::normalized_email::{NormalizedEmail, PLACEHOLDER_MARKER};
