use std::fmt;

/// Step of a reconciliation run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scan,
    Lookup,
    Resolve,
    Insert,
    Migrate,
    Cleanup,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Scan => "scan",
            Stage::Lookup => "lookup",
            Stage::Resolve => "resolve",
            Stage::Insert => "insert",
            Stage::Migrate => "migrate",
            Stage::Cleanup => "cleanup",
        }
    }

    /// True once a failure at this stage may have left writes behind.
    pub fn may_have_written(&self) -> bool {
        matches!(self, Stage::Insert | Stage::Migrate | Stage::Cleanup)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
