// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use sqlx::{Row, SqlitePool};
use tracing::{debug, error};

use crate::modules::database::param::bind_params;
use crate::modules::email::search::builder::{PredicateBuilder, Statement};
use crate::modules::email::search::mapper::{map_email_row, SearchResponse};
use crate::modules::email::search::pager::Pager;
use crate::modules::email::timestamp::{parse_bound, Bound};
use crate::modules::error::MailSiftResult;
use crate::modules::metrics::observe_search;
use crate::modules::utils::parse_leading_int;

pub mod builder;
pub mod mapper;
pub mod pager;

/// Raw search inputs exactly as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub size: Option<String>,
}

/// The filters of one search request after normalization. A `None` field adds
/// no predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub text: Option<String>,
    pub category_id: Option<i64>,
    /// Inclusive lower bound, `YYYY-MM-DD HH:MM:SS`.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD HH:MM:SS`.
    pub date_to: Option<String>,
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub min_size: Option<i64>,
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SearchFilter {
    /// Unusable values (blank text, non-numeric ids, unparseable dates) are
    /// dropped rather than rejected.
    pub fn parse(params: &SearchParams) -> Self {
        Self {
            text: non_blank(&params.q),
            category_id: params.category.as_deref().and_then(parse_leading_int),
            date_from: non_blank(&params.date_from)
                .and_then(|v| parse_bound(&v, Bound::Lower)),
            date_to: non_blank(&params.date_to).and_then(|v| parse_bound(&v, Bound::Upper)),
            sender: non_blank(&params.sender),
            recipient: non_blank(&params.recipient),
            min_size: params.size.as_deref().and_then(parse_leading_int),
        }
    }
}

/// Runs the count query, then the windowed fetch, and assembles the page.
pub async fn search_emails(
    pool: &SqlitePool,
    filter: &SearchFilter,
    pager: Pager,
) -> MailSiftResult<SearchResponse> {
    let started = Instant::now();
    let builder = PredicateBuilder::from_filter(filter);
    if builder.is_empty() {
        debug!("Email search without filters, listing all emails");
    }
    let queries = builder.build(&pager);

    let result = run(pool, &queries.count, &queries.fetch, &pager).await;
    observe_search(result.is_ok(), started.elapsed());
    result
}

async fn run(
    pool: &SqlitePool,
    count: &Statement,
    fetch: &Statement,
    pager: &Pager,
) -> MailSiftResult<SearchResponse> {
    let total: i64 = bind_params(sqlx::query(&count.sql), &count.params)
        .fetch_one(pool)
        .await
        .and_then(|row| row.try_get("total"))
        .inspect_err(|e| error!("Error counting emails: {} | query: {}", e, count))?;

    let emails = bind_params(sqlx::query(&fetch.sql), &fetch.params)
        .fetch_all(pool)
        .await
        .and_then(|rows| rows.iter().map(map_email_row).collect::<Result<Vec<_>, _>>())
        .inspect_err(|e| error!("Error searching emails: {} | query: {}", e, fetch))?;

    debug!(
        total,
        returned = emails.len(),
        page = pager.page(),
        limit = pager.limit(),
        "Email search finished"
    );
    Ok(SearchResponse::new(emails, total, pager))
}
