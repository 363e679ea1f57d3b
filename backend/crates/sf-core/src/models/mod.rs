pub mod canonical_source;
pub mod dependent_relation;
pub mod external_identity;
pub mod identity_id;
pub mod identity_record;
pub mod normalized_email;
