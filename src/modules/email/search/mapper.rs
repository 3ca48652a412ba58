// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::modules::email::entity::EmailRecord;
use crate::modules::email::search::pager::Pager;

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    /// Matching emails on this page, newest first.
    pub emails: Vec<EmailRecord>,
    /// Number of matching emails across all pages.
    pub total: i64,
    /// The 1-based page that was returned.
    pub page: i64,
    /// Number of pages at the requested page size.
    pub total_pages: i64,
}

impl SearchResponse {
    pub fn new(emails: Vec<EmailRecord>, total: i64, pager: &Pager) -> Self {
        Self {
            success: true,
            emails,
            total,
            page: pager.page(),
            total_pages: pager.total_pages(total),
        }
    }
}

pub fn map_email_row(row: &SqliteRow) -> Result<EmailRecord, sqlx::Error> {
    Ok(EmailRecord {
        email_id: row.try_get("email_id")?,
        message_id: row.try_get("message_id")?,
        sender_email: row.try_get("sender_email")?,
        recipient_email: row.try_get("recipient_email")?,
        message: row.try_get("message")?,
        size: row.try_get("size")?,
        category_id: row.try_get("category_id")?,
        date: row.try_get("date")?,
        category_name: row.try_get("category_name")?,
    })
}
