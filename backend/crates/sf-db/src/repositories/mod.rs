pub mod identity_repository;
pub mod reference_repository;
pub mod relation_repository;

/// `?, ?, ?` for an IN list of `count` values.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
