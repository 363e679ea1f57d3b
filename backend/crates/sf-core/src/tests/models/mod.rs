mod canonical_source;
mod dependent_relation;
mod normalized_email;
