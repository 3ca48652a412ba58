// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use sqlx::{Row, SqlitePool};
use tracing::{debug, error};

use crate::modules::email::entity::{Category, NewEmail};
use crate::modules::error::{code::ErrorCode, MailSiftResult};
use crate::modules::utils::fold_case;
use crate::raise_error;

pub async fn list_categories(pool: &SqlitePool) -> MailSiftResult<Vec<Category>> {
    let rows = sqlx::query(
        "SELECT category_id, category_name FROM categories ORDER BY category_id",
    )
    .fetch_all(pool)
    .await?;

    let categories = rows
        .iter()
        .map(|row| {
            Ok(Category {
                category_id: row.try_get("category_id")?,
                category_name: row.try_get("category_name")?,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;
    Ok(categories)
}

/// Writes one email and returns its new identifier.
pub async fn insert_email(pool: &SqlitePool, email: &NewEmail) -> MailSiftResult<i64> {
    let result = sqlx::query(
        r"
        INSERT INTO emails (
            message_id, sender_email, recipient_email, message, size, category_id, date,
            message_folded, sender_folded, recipient_folded
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ",
    )
    .bind(&email.message_id)
    .bind(&email.sender_email)
    .bind(&email.recipient_email)
    .bind(&email.message)
    .bind(email.size)
    .bind(email.category_id)
    .bind(&email.date)
    .bind(fold_case(&email.message))
    .bind(fold_case(&email.sender_email))
    .bind(fold_case(&email.recipient_email))
    .execute(pool)
    .await
    .inspect_err(|e| error!("Error adding email {}: {}", email.message_id, e))?;

    if result.rows_affected() == 0 {
        return Err(raise_error!(
            "Failed to add email".into(),
            ErrorCode::InternalError
        ));
    }
    let email_id = result.last_insert_rowid();
    debug!(email_id, message_id = %email.message_id, "Email added");
    Ok(email_id)
}
