use crate::IdentityId;

use serde::{Deserialize, Serialize};

/// A user entry as listed by the identity provider. Phone-only accounts have
/// no email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalIdentity {
    pub id: IdentityId,
    #[serde(default)]
    pub email: Option<String>,
}
