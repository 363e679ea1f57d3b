
use sf_core::{IdentityId, IdentityRecord};

use chrono::{DateTime, Utc};

pub(crate) fn record(id: &str, email: &str, created_at: i64) -> IdentityRecord {
    IdentityRecord {
        id: IdentityId::from(id),
        email: email.to_string(),
        name: None,
        created_at: DateTime::<Utc>::from_timestamp(created_at, 0).unwrap(),
        is_active: true,
    }
}
