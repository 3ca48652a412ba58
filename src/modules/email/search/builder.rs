// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::database::param::SqlParam;
use crate::modules::email::search::pager::Pager;
use crate::modules::email::search::SearchFilter;
use crate::modules::utils::{contains_pattern, fold_case};

/// `%term%` over the case-folded term, matched against the `*_folded` columns.
fn folded_pattern(term: &str) -> String {
    contains_pattern(&fold_case(term))
}

const COUNT_SELECT: &str = "SELECT COUNT(*) AS total FROM emails e";
const FETCH_SELECT: &str = "SELECT e.email_id, e.message_id, e.sender_email, e.recipient_email, \
     e.message, e.size, e.category_id, e.date, c.category_name \
     FROM emails e LEFT JOIN categories c ON e.category_id = c.category_id";
const FETCH_ORDER: &str = "ORDER BY e.date DESC, e.email_id DESC";

const TEXT_MATCH: &str = "(e.message_folded LIKE ? ESCAPE '\\' \
     OR e.sender_folded LIKE ? ESCAPE '\\' \
     OR e.recipient_folded LIKE ? ESCAPE '\\')";
const CATEGORY_MATCH: &str = "e.category_id = ?";
const DATE_FROM: &str = "e.date >= ?";
const DATE_TO: &str = "e.date <= ?";
const SENDER_MATCH: &str = "e.sender_folded LIKE ? ESCAPE '\\'";
const RECIPIENT_MATCH: &str = "e.recipient_folded LIKE ? ESCAPE '\\'";
const MIN_SIZE: &str = "e.size >= ?";

#[derive(Debug, Clone)]
struct Predicate {
    sql: &'static str,
    params: Vec<SqlParam>,
}

/// A SQL statement and the values for its `?` placeholders, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

/// The count and fetch statements of one search. Both carry the same
/// predicate and therefore the same parameter list.
#[derive(Debug, Clone)]
pub struct SearchQueries {
    pub count: Statement,
    pub fetch: Statement,
}

/// Accumulates optional predicates, each with its own parameters, and renders
/// them into a single `WHERE` clause joined with `AND`.
#[derive(Debug, Clone, Default)]
pub struct PredicateBuilder {
    predicates: Vec<Predicate>,
}

impl PredicateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one predicate. `sql` must contain exactly one `?` per entry of `params`.
    pub fn push(&mut self, sql: &'static str, params: Vec<SqlParam>) -> &mut Self {
        debug_assert_eq!(
            sql.matches('?').count(),
            params.len(),
            "placeholder count mismatch in `{sql}`"
        );
        self.predicates.push(Predicate { sql, params });
        self
    }

    pub fn from_filter(filter: &SearchFilter) -> Self {
        let mut builder = Self::new();
        if let Some(text) = &filter.text {
            let pattern = folded_pattern(text);
            builder.push(
                TEXT_MATCH,
                vec![
                    pattern.clone().into(),
                    pattern.clone().into(),
                    pattern.into(),
                ],
            );
        }
        if let Some(category_id) = filter.category_id {
            builder.push(CATEGORY_MATCH, vec![category_id.into()]);
        }
        if let Some(from) = &filter.date_from {
            builder.push(DATE_FROM, vec![from.as_str().into()]);
        }
        if let Some(to) = &filter.date_to {
            builder.push(DATE_TO, vec![to.as_str().into()]);
        }
        if let Some(sender) = &filter.sender {
            builder.push(SENDER_MATCH, vec![folded_pattern(sender).into()]);
        }
        if let Some(recipient) = &filter.recipient {
            builder.push(RECIPIENT_MATCH, vec![folded_pattern(recipient).into()]);
        }
        if let Some(min_size) = filter.min_size {
            builder.push(MIN_SIZE, vec![min_size.into()]);
        }
        builder
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// ` WHERE a AND b ...`, or an empty string when no predicate was added.
    pub fn where_clause(&self) -> String {
        if self.predicates.is_empty() {
            return String::new();
        }
        let joined = self
            .predicates
            .iter()
            .map(|p| p.sql)
            .collect::<Vec<_>>()
            .join(" AND ");
        format!(" WHERE {}", joined)
    }

    /// All parameters flattened in append order.
    pub fn params(&self) -> Vec<SqlParam> {
        self.predicates
            .iter()
            .flat_map(|p| p.params.iter().cloned())
            .collect()
    }

    /// Renders the count statement and the windowed fetch statement.
    ///
    /// The window is written as typed integers so the fetch binds exactly the
    /// same parameters as the count.
    pub fn build(&self, pager: &Pager) -> SearchQueries {
        let where_clause = self.where_clause();
        let params = self.params();
        SearchQueries {
            count: Statement {
                sql: format!("{COUNT_SELECT}{where_clause}"),
                params: params.clone(),
            },
            fetch: Statement {
                sql: format!(
                    "{FETCH_SELECT}{where_clause} {FETCH_ORDER} LIMIT {} OFFSET {}",
                    pager.limit(),
                    pager.offset()
                ),
                params,
            },
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = self
            .params
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} [{}]", self.sql, params)
    }
}
