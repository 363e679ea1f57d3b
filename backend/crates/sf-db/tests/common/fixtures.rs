use chrono::{DateTime, Utc};
use sf_core::{IdentityId, IdentityRecord};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Builds an identity row created at the given unix timestamp
pub fn identity(id: &str, email: &str, created_at: i64) -> IdentityRecord {
    IdentityRecord {
        id: IdentityId::from(id),
        email: email.to_string(),
        name: Some(format!("Name of {}", id)),
        created_at: DateTime::<Utc>::from_timestamp(created_at, 0).unwrap(),
        is_active: true,
    }
}

/// Inserts an order owned by `user_id`; returns the order id
pub async fn insert_order(pool: &SqlitePool, user_id: &str) -> String {
    let id = Uuid::new_v4().to_string();

    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query("INSERT INTO orders (id, user_id, total_cents, created_at) VALUES (?, ?, 1999, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await
        .expect("Failed to create test order");

    id
}

/// Inserts a role assignment for `user_id` granted by `assigned_by`
pub async fn insert_role(pool: &SqlitePool, user_id: &str, assigned_by: Option<&str>) -> String {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO user_roles (id, user_id, role, assigned_by, assigned_at) VALUES (?, ?, 'admin', ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(assigned_by)
    .bind(Utc::now().timestamp())
    .execute(pool)
    .await
    .expect("Failed to create test role assignment");

    id
}

/// Value of `column` for the row `id` in `table`
pub async fn column_value(pool: &SqlitePool, table: &str, column: &str, id: &str) -> Option<String> {
    sqlx::query_scalar(&format!("SELECT {column} FROM {table} WHERE id = ?"))
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to read column")
}
