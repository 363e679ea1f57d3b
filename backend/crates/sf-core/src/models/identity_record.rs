use crate::{IdentityId, NormalizedEmail};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the store's identity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub id: IdentityId,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl IdentityRecord {
    /// Builds a fresh record for `email`, named after the email's local part.
    pub fn new(id: IdentityId, email: &NormalizedEmail) -> Self {
        Self {
            id,
            email: email.as_str().to_string(),
            name: Some(email.local_part().to_string()),
            created_at: Utc::now(),
            is_active: true,
        }
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        if name.is_some() {
            self.name = name;
        }
        self
    }

    /// True when this row was parked under a conflict placeholder for `email`.
    pub fn holds_placeholder_for(&self, email: &NormalizedEmail) -> bool {
        email.is_placeholder(&self.email)
    }
}
