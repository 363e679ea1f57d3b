use crate::{CoreError, ErrorLocation, Result as CoreErrorResult};

use std::fmt;
use std::panic::Location;

use serde::Serialize;

/// A (table, foreign-key column) pair whose values reference identity ids.
///
/// Names are interpolated into SQL, so construction only accepts plain
/// identifiers: ASCII letters, digits and underscores, not starting with a
/// digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependentRelation {
    table: String,
    column: String,
}

impl DependentRelation {
    #[track_caller]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> CoreErrorResult<Self> {
        let table = table.into();
        let column = column.into();

        let reason = if !is_sql_identifier(&table) {
            Some("table name is not a plain SQL identifier")
        } else if !is_sql_identifier(&column) {
            Some("column name is not a plain SQL identifier")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(CoreError::InvalidRelation {
                table,
                column,
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(Self { table, column }),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn column(&self) -> &str {
        &self.column
    }
}

impl fmt::Display for DependentRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
