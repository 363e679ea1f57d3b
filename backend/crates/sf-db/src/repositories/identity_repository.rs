use crate::EMAIL_COLLATION;
use crate::repositories::placeholders;
use crate::{DbError, Result as DbErrorResult};

use sf_core::{IdentityId, IdentityRecord, NormalizedEmail};

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::panic::Location;
use uuid::Uuid;

const COLUMNS: &str = "id, email, name, created_at, is_active";

/// Access to the `users` table, the store's identity records.
pub struct IdentityRepository {
    pool: SqlitePool,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Every row whose email equals `email` ignoring case and surrounding
    /// whitespace, newest first. Equal timestamps are ordered by id,
    /// descending.
    pub async fn find_by_email(&self, email: &NormalizedEmail) -> DbErrorResult<Vec<IdentityRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE email = ? COLLATE {EMAIL_COLLATION} ORDER BY created_at DESC, id DESC"
        ))
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    /// Rows parked under a `<email>+dup-<rowId>` placeholder by an earlier,
    /// interrupted run. Newest first.
    ///
    /// Placeholders are only ever written from the normalized email, so the
    /// stored prefix matches byte for byte.
    pub async fn find_placeholders(
        &self,
        email: &NormalizedEmail,
    ) -> DbErrorResult<Vec<IdentityRecord>> {
        let rows = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM users WHERE instr(email, ?) = 1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(email.placeholder_prefix())
        .fetch_all(&self.pool)
        .await?;

        let records = rows.iter().map(map_row).collect::<DbErrorResult<Vec<_>>>()?;

        Ok(records
            .into_iter()
            .filter(|record| record.holds_placeholder_for(email))
            .collect())
    }

    pub async fn find_by_id(&self, id: &IdentityId) -> DbErrorResult<Option<IdentityRecord>> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM users WHERE id = ?"))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row).transpose()
    }

    /// Inserts `record` and returns the row as stored.
    pub async fn create(&self, record: &IdentityRecord) -> DbErrorResult<IdentityRecord> {
        let row = sqlx::query(&format!(
            "INSERT INTO users ({COLUMNS}) VALUES (?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        ))
        .bind(record.id.as_str())
        .bind(&record.email)
        .bind(&record.name)
        .bind(record.created_at.timestamp())
        .bind(record.is_active)
        .fetch_one(&self.pool)
        .await?;

        map_row(&row)
    }

    /// Inserts a brand-new identity for `email` under a store-generated id.
    pub async fn create_for_email(&self, email: &NormalizedEmail) -> DbErrorResult<IdentityRecord> {
        let id = IdentityId::new(Uuid::new_v4().to_string());
        self.create(&IdentityRecord::new(id, email)).await
    }

    pub async fn update_email(&self, id: &IdentityId, email: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE users SET email = ? WHERE id = ?")
            .bind(email)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_many(&self, ids: &[IdentityId]) -> DbErrorResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let sql = format!("DELETE FROM users WHERE id IN ({})", placeholders(ids.len()));
        let mut query = sqlx::query(&sql);
        for id in ids {
            query = query.bind(id.as_str());
        }

        let result = query.execute(&self.pool).await?;

        Ok(result.rows_affected())
    }
}

fn map_row(row: &SqliteRow) -> DbErrorResult<IdentityRecord> {
    let created_at: i64 = row.try_get("created_at")?;

    Ok(IdentityRecord {
        id: IdentityId::new(row.try_get::<String, _>("id")?),
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        created_at: DateTime::from_timestamp(created_at, 0).ok_or_else(|| {
            DbError::InvalidRow {
                table: "users",
                message: format!("created_at out of range: {}", created_at),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        is_active: row.try_get("is_active")?,
    })
}
