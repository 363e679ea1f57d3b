use super::FakeProvider;

use sf_core::{IdentityId, IdentityRecord, NormalizedEmail};
use sf_db::IdentityRepository;
use sf_idp::{ProviderLookup, RetryPolicy};
use sf_reconcile::Reconciler;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

pub fn email(raw: &str) -> NormalizedEmail {
    NormalizedEmail::parse(raw).unwrap()
}

/// Reconciler over `pool` and `provider` that never retries
pub fn reconciler(pool: &SqlitePool, provider: Arc<FakeProvider>) -> Reconciler {
    Reconciler::new(
        pool.clone(),
        provider,
        ProviderLookup::new(50, 5),
        RetryPolicy::no_retry(),
    )
}

/// Stores an identity row created at the given unix timestamp
pub async fn seed_identity(pool: &SqlitePool, id: &str, email: &str, created_at: i64) {
    let record = IdentityRecord {
        id: IdentityId::from(id),
        email: email.to_string(),
        name: Some(format!("Name of {}", id)),
        created_at: DateTime::<Utc>::from_timestamp(created_at, 0).unwrap(),
        is_active: true,
    };

    IdentityRepository::new(pool.clone())
        .create(&record)
        .await
        .expect("Failed to seed identity");
}

pub async fn find_identity(pool: &SqlitePool, id: &str) -> Option<IdentityRecord> {
    IdentityRepository::new(pool.clone())
        .find_by_id(&IdentityId::from(id))
        .await
        .expect("Failed to read identity")
}

/// Inserts an order owned by `user_id`; returns the order id
pub async fn insert_order(pool: &SqlitePool, user_id: &str) -> String {
    let id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO orders (id, user_id, total_cents, created_at) VALUES (?, ?, 4200, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(Utc::now().timestamp())
        .execute(pool)
        .await
        .expect("Failed to create test order");

    id
}

/// Inserts a role assignment for `user_id` granted by `assigned_by`
pub async fn insert_role(pool: &SqlitePool, user_id: &str, assigned_by: &str) -> String {
    let id = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO user_roles (id, user_id, role, assigned_by, assigned_at) VALUES (?, ?, 'staff', ?, ?)",
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

pub async fn user_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .expect("Failed to count users")
}

/// Ids of rows whose email matches `raw` ignoring case
pub async fn ids_for_email(pool: &SqlitePool, raw: &str) -> Vec<String> {
    sqlx::query_scalar("SELECT id FROM users WHERE lower(email) = lower(?) ORDER BY id")
        .bind(raw)
        .fetch_all(pool)
        .await
        .expect("Failed to read users")
}

/// Number of rows still parked under a `+dup-` placeholder
pub async fn placeholder_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email LIKE '%+dup-%'")
        .fetch_one(pool)
        .await
        .expect("Failed to count placeholders")
}

/// Registers an extra dependent relation, valid or not
pub async fn register_relation(pool: &SqlitePool, table: &str, column: &str) {
    sqlx::query("INSERT INTO identity_dependent_relations (table_name, column_name) VALUES (?, ?)")
        .bind(table)
        .bind(column)
        .execute(pool)
        .await
        .expect("Failed to register relation");
}

pub async fn unregister_relation(pool: &SqlitePool, table: &str, column: &str) {
    sqlx::query("DELETE FROM identity_dependent_relations WHERE table_name = ? AND column_name = ?")
        .bind(table)
        .bind(column)
        .execute(pool)
        .await
        .expect("Failed to unregister relation");
}

/// Installs a trigger aborting every statement `event` on `users` for which
/// `condition` holds
pub async fn block_users(pool: &SqlitePool, name: &str, event: &str, condition: &str) {
    sqlx::query(&format!(
        "CREATE TRIGGER {name} BEFORE {event} ON users WHEN {condition} \
         BEGIN SELECT RAISE(ABORT, '{name}'); END"
    ))
    .execute(pool)
    .await
    .expect("Failed to create trigger");
}

pub async fn unblock_users(pool: &SqlitePool, name: &str) {
    sqlx::query(&format!("DROP TRIGGER {name}"))
        .execute(pool)
        .await
        .expect("Failed to drop trigger");
}
