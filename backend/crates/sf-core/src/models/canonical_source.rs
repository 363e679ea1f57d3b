use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the canonical identifier of a reconciliation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalSource {
    /// Issued by the identity provider.
    Provider,
    /// The most recent local row.
    Local,
    /// Synthesized because neither the provider nor the store knew the email.
    New,
}

impl CanonicalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalSource::Provider => "provider",
            CanonicalSource::Local => "local",
            CanonicalSource::New => "new",
        }
    }
}

impl fmt::Display for CanonicalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
