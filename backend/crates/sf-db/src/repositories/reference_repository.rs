use crate::Result as DbErrorResult;
use crate::repositories::placeholders;

use sf_core::{DependentRelation, IdentityId};

use sqlx::SqlitePool;

/// Bulk reads and rewrites of foreign-key columns that hold identity ids.
pub struct ReferenceRepository {
    pool: SqlitePool,
}

impl ReferenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Points every `relation` value found in `from` at `to`. Returns the
    /// number of rows rewritten; rows already holding `to` are untouched.
    pub async fn reassign(
        &self,
        relation: &DependentRelation,
        from: &[IdentityId],
        to: &IdentityId,
    ) -> DbErrorResult<u64> {
        if from.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            r#"UPDATE "{table}" SET "{column}" = ? WHERE "{column}" IN ({ids})"#,
            table = relation.table(),
            column = relation.column(),
            ids = placeholders(from.len()),
        );

        let mut query = sqlx::query(&sql).bind(to.as_str());
        for id in from {
            query = query.bind(id.as_str());
        }

        let result = query.execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Number of `relation` rows whose value is one of `ids`.
    pub async fn count_referencing(
        &self,
        relation: &DependentRelation,
        ids: &[IdentityId],
    ) -> DbErrorResult<i64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            r#"SELECT COUNT(*) FROM "{table}" WHERE "{column}" IN ({ids})"#,
            table = relation.table(),
            column = relation.column(),
            ids = placeholders(ids.len()),
        );

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for id in ids {
            query = query.bind(id.as_str());
        }

        Ok(query.fetch_one(&self.pool).await?)
    }
}
