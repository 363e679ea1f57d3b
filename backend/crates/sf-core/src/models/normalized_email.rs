use crate::{CoreError, ErrorLocation, IdentityId, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// Separator between the real email and the row id in a conflict placeholder.
pub const PLACEHOLDER_MARKER: &str = "+dup-";

/// An email address trimmed and lowercased for case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedEmail(String);

impl NormalizedEmail {
    /// Normalizes and validates a raw email address.
    ///
    /// Rejects empty input, input without exactly one `@`, an empty local or
    /// domain part, and embedded whitespace.
    #[track_caller]
    pub fn parse(raw: &str) -> CoreErrorResult<Self> {
        let normalized = raw.trim().to_lowercase();

        let reason = if normalized.is_empty() {
            Some("email is empty")
        } else if normalized.chars().any(char::is_whitespace) {
            Some("email contains whitespace")
        } else {
            match normalized.split_once('@') {
                None => Some("missing '@'"),
                Some((_, domain)) if domain.contains('@') => Some("more than one '@'"),
                Some(("", _)) => Some("empty local part"),
                Some((_, "")) => Some("empty domain"),
                Some(_) => None,
            }
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidEmail {
                value: raw.to_string(),
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(Self(normalized)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the `@`, used as a default display name.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(local, _)| local).unwrap_or(&self.0)
    }

    /// Case-insensitive comparison against an email as stored elsewhere.
    pub fn matches(&self, candidate: &str) -> bool {
        candidate.trim().to_lowercase() == self.0
    }

    /// Non-colliding stand-in email for the row `row_id`: `<email>+dup-<rowId>`.
    pub fn placeholder_for(&self, row_id: &IdentityId) -> String {
        format!("{}{}{}", self.0, PLACEHOLDER_MARKER, row_id)
    }

    /// Prefix shared by every placeholder derived from this email.
    pub fn placeholder_prefix(&self) -> String {
        format!("{}{}", self.0, PLACEHOLDER_MARKER)
    }

    /// True when `candidate` is a placeholder derived from this email.
    ///
    /// The part after the marker must be a single row id. A second marker
    /// means the placeholder belongs to a longer address such as
    /// `a@x.com+dup-z`.
    pub fn is_placeholder(&self, candidate: &str) -> bool {
        let candidate = candidate.to_lowercase();
        candidate
            .strip_prefix(&self.placeholder_prefix())
            .is_some_and(|row_id| !row_id.is_empty() && !row_id.contains(PLACEHOLDER_MARKER))
    }
}

impl fmt::Display for NormalizedEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
