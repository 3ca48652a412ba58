// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

use crate::modules::database::{
    manager::DatabaseManager,
    param::{bind_params, SqlParam},
    schema::{initialize_schema, DEFAULT_CATEGORIES},
};

#[tokio::test]
async fn schema_seeds_default_categories_once() {
    let db = DatabaseManager::in_memory().await.unwrap();
    initialize_schema(db.pool()).await.unwrap();

    let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM categories")
        .fetch_one(db.pool())
        .await
        .unwrap()
        .get("total");
    assert_eq!(total, DEFAULT_CATEGORIES.len() as i64);
}

#[tokio::test]
async fn bound_params_follow_placeholder_order() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let params = vec![SqlParam::from("work"), SqlParam::from(4i64)];
    let row = bind_params(
        sqlx::query("SELECT ? AS name, ? AS id"),
        &params,
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(row.get::<String, _>("name"), "work");
    assert_eq!(row.get::<i64, _>("id"), 4);
}

#[tokio::test]
async fn foreign_keys_are_enforced() {
    let db = DatabaseManager::in_memory().await.unwrap();
    let result = sqlx::query(
        "INSERT INTO emails (message_id, sender_email, recipient_email, message, size, category_id, date)
         VALUES ('m', 'a@x.com', 'b@x.com', 'hi', 10, 999, '2024-01-01 00:00:00')",
    )
    .execute(db.pool())
    .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn file_database_is_created_on_connect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mail.db");
    let url = format!("sqlite://{}", path.display());

    let db = DatabaseManager::connect(&url, 2, Duration::from_secs(5))
        .await
        .unwrap();
    assert!(path.exists());
    db.close().await;

    // Reopening an existing file keeps the seeded rows and adds none.
    let db = DatabaseManager::connect(&url, 2, Duration::from_secs(5))
        .await
        .unwrap();
    let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM categories")
        .fetch_one(db.pool())
        .await
        .unwrap()
        .get("total");
    assert_eq!(total, DEFAULT_CATEGORIES.len() as i64);
}

#[tokio::test]
async fn older_email_tables_gain_folded_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");
    let url = format!("sqlite://{}", path.display());

    let legacy = SqlitePool::connect_with(
        SqliteConnectOptions::from_str(&url)
            .unwrap()
            .create_if_missing(true),
    )
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE emails (
            email_id INTEGER PRIMARY KEY AUTOINCREMENT,
            message_id TEXT NOT NULL,
            sender_email TEXT NOT NULL,
            recipient_email TEXT NOT NULL,
            message TEXT NOT NULL,
            size INTEGER NOT NULL,
            category_id INTEGER,
            date TEXT NOT NULL
        )",
    )
    .execute(&legacy)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO emails (message_id, sender_email, recipient_email, message, size, date)
         VALUES ('m', 'MÜLLER@x.com', 'Bob@x.com', 'Grüße aus ÖSTERREICH', 10, '2024-01-01 00:00:00')",
    )
    .execute(&legacy)
    .await
    .unwrap();
    legacy.close().await;

    let db = DatabaseManager::connect(&url, 2, Duration::from_secs(5))
        .await
        .unwrap();
    let row = sqlx::query(
        "SELECT message_folded, sender_folded, recipient_folded FROM emails WHERE message_id = 'm'",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();
    assert_eq!(
        row.get::<String, _>("message_folded"),
        "grüße aus österreich"
    );
    assert_eq!(row.get::<String, _>("sender_folded"), "müller@x.com");
    assert_eq!(row.get::<String, _>("recipient_folded"), "bob@x.com");
}

#[tokio::test]
async fn memory_url_gets_a_single_shared_connection() {
    let db = DatabaseManager::open("sqlite::memory:", 8, Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(db.pool().options().get_max_connections(), 1);

    sqlx::query("INSERT INTO categories (category_name) VALUES ('receipts')")
        .execute(db.pool())
        .await
        .unwrap();
    for _ in 0..4 {
        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM categories")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("total");
        assert_eq!(total, DEFAULT_CATEGORIES.len() as i64 + 1);
    }
}

#[test]
fn params_render_for_logs() {
    assert_eq!(SqlParam::from(1000i64).to_string(), "1000");
    assert_eq!(SqlParam::from("%foo%").to_string(), "'%foo%'");
}
