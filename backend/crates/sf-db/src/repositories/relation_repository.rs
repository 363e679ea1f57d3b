use crate::Result as DbErrorResult;

use sf_core::DependentRelation;

use sqlx::{Row, SqlitePool};

/// Reads the schema-versioned list of columns that reference identity ids.
pub struct RelationRepository {
    pool: SqlitePool,
}

impl RelationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All registered relations, ordered by table then column.
    ///
    /// Fails if any entry is not a plain SQL identifier, before a caller can
    /// act on a partial list.
    pub async fn list(&self) -> DbErrorResult<Vec<DependentRelation>> {
        let rows = sqlx::query(
            r#"
                SELECT table_name, column_name
                FROM identity_dependent_relations
                ORDER BY table_name, column_name
                "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> DbErrorResult<DependentRelation> {
                let table: String = row.try_get("table_name")?;
                let column: String = row.try_get("column_name")?;
                Ok(DependentRelation::new(table, column)?)
            })
            .collect()
    }
}
