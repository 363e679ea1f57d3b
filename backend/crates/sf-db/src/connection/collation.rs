use std::cmp::Ordering;

use sqlx::sqlite::SqliteConnectOptions;

/// Collation comparing emails the way `NormalizedEmail` does: trimmed and
/// lowercased with full Unicode case folding. SQLite's own `lower()` and
/// `NOCASE` fold ASCII only.
pub const EMAIL_COLLATION: &str = "email_nocase";

/// Registers [`EMAIL_COLLATION`] on every connection opened with `options`.
/// Identity lookups by email fail with "no such collation sequence" on a
/// connection without it.
pub fn with_email_collation(options: SqliteConnectOptions) -> SqliteConnectOptions {
    options.collation(EMAIL_COLLATION, compare_emails)
}

pub fn compare_emails(left: &str, right: &str) -> Ordering {
    let left = left.trim();
    let right = right.trim();

    if left == right {
        return Ordering::Equal;
    }

    left.to_lowercase().cmp(&right.to_lowercase())
}
