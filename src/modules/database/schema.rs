// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::modules::error::MailSiftResult;
use crate::modules::utils::fold_case;

/// Categories created on first start.
pub const DEFAULT_CATEGORIES: [&str; 9] = [
    "purchases",
    "newsletters",
    "updates",
    "work",
    "promotions",
    "social",
    "personal",
    "forums",
    "spam",
];

const SCHEMA: [&str; 4] = [
    r"
    CREATE TABLE IF NOT EXISTS categories (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name TEXT NOT NULL UNIQUE
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS emails (
        email_id INTEGER PRIMARY KEY AUTOINCREMENT,
        message_id TEXT NOT NULL,
        sender_email TEXT NOT NULL,
        recipient_email TEXT NOT NULL,
        message TEXT NOT NULL,
        size INTEGER NOT NULL CHECK (size >= 0),
        category_id INTEGER REFERENCES categories(category_id),
        date TEXT NOT NULL,
        message_folded TEXT,
        sender_folded TEXT,
        recipient_folded TEXT
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_emails_date ON emails(date)",
    "CREATE INDEX IF NOT EXISTS idx_emails_category ON emails(category_id)",
];

/// Lowercased copies of `message`, `sender_email` and `recipient_email`.
const FOLDED_COLUMNS: [&str; 3] = ["message_folded", "sender_folded", "recipient_folded"];

/// Creates the tables if they don't exist, brings older `emails` tables up to
/// date and seeds the default categories.
pub async fn initialize_schema(pool: &SqlitePool) -> MailSiftResult<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    add_folded_columns(pool).await?;
    backfill_folded_columns(pool).await?;

    let mut seeded = 0;
    for name in DEFAULT_CATEGORIES {
        seeded += sqlx::query("INSERT OR IGNORE INTO categories (category_name) VALUES (?)")
            .bind(name)
            .execute(pool)
            .await?
            .rows_affected();
    }
    if seeded > 0 {
        info!("Seeded {} default categories", seeded);
    }
    Ok(())
}

async fn add_folded_columns(pool: &SqlitePool) -> MailSiftResult<()> {
    let existing: Vec<String> = sqlx::query("SELECT name FROM pragma_table_info('emails')")
        .fetch_all(pool)
        .await?
        .iter()
        .map(|row| row.try_get("name"))
        .collect::<Result<_, sqlx::Error>>()?;

    for column in FOLDED_COLUMNS {
        if !existing.iter().any(|name| name == column) {
            sqlx::query(&format!("ALTER TABLE emails ADD COLUMN {column} TEXT"))
                .execute(pool)
                .await?;
            info!("Added column emails.{}", column);
        }
    }
    Ok(())
}

/// Fills the folded columns of rows written before they existed. SQLite's
/// `lower()` maps ASCII only, so the folding is done with `fold_case`.
async fn backfill_folded_columns(pool: &SqlitePool) -> MailSiftResult<()> {
    let rows = sqlx::query(
        r"
        SELECT email_id, message, sender_email, recipient_email FROM emails
        WHERE message_folded IS NULL OR sender_folded IS NULL OR recipient_folded IS NULL
        ",
    )
    .fetch_all(pool)
    .await?;
    if rows.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for row in &rows {
        let email_id: i64 = row.try_get("email_id")?;
        let message: String = row.try_get("message")?;
        let sender: String = row.try_get("sender_email")?;
        let recipient: String = row.try_get("recipient_email")?;
        sqlx::query(
            r"
            UPDATE emails SET message_folded = ?, sender_folded = ?, recipient_folded = ?
            WHERE email_id = ?
            ",
        )
        .bind(fold_case(&message))
        .bind(fold_case(&sender))
        .bind(fold_case(&recipient))
        .bind(email_id)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    info!("Backfilled folded search columns for {} emails", rows.len());
    Ok(())
}
