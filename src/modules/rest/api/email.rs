// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::email::entity::{CategoryListResponse, InsertEmailRequest, InsertEmailResponse};
use crate::modules::email::repository::{insert_email, list_categories};
use crate::modules::email::search::mapper::SearchResponse;
use crate::modules::email::search::pager::Pager;
use crate::modules::email::search::{search_emails, SearchFilter, SearchParams};
use crate::modules::error::code::ErrorCode;
use crate::modules::error::ApiErrorResponse;
use crate::modules::metrics::observe_insert;
use crate::modules::rest::api::ApiTags;
use crate::modules::rest::ApiResult;
use poem::web::Data;
use poem_openapi::param::Query;
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;
use sqlx::SqlitePool;

pub struct EmailApi;

#[OpenApi(prefix_path = "/api/email", tag = "ApiTags::Email")]
impl EmailApi {
    /// Search stored emails with optional filters, newest first.
    ///
    /// Every filter is optional and filters are AND-combined. `q` matches the message
    /// body, the sender or the recipient, ignoring case. `category` and `size` values
    /// that are not numeric are ignored. `dateFrom` and `dateTo` are inclusive; a bare
    /// `dateTo` date covers that whole day. Pages past the end return an empty list.
    #[oai(method = "get", path = "/search", operation_id = "search_emails")]
    async fn search(
        &self,
        pool: Data<&SqlitePool>,
        /// Free-text term matched against body, sender and recipient
        q: Query<Option<String>>,
        /// Category identifier
        category: Query<Option<String>>,
        /// Inclusive lower bound on the email timestamp
        #[oai(name = "dateFrom")]
        date_from: Query<Option<String>>,
        /// Inclusive upper bound on the email timestamp
        #[oai(name = "dateTo")]
        date_to: Query<Option<String>>,
        /// Substring of the sender address
        sender: Query<Option<String>>,
        /// Substring of the recipient address
        recipient: Query<Option<String>>,
        /// Minimum size in bytes
        size: Query<Option<String>>,
        /// 1-based page number (default 1)
        page: Query<Option<String>>,
        /// Page size (default 10)
        limit: Query<Option<String>>,
    ) -> ApiResult<Json<SearchResponse>> {
        let filter = SearchFilter::parse(&SearchParams {
            q: q.0,
            category: category.0,
            date_from: date_from.0,
            date_to: date_to.0,
            sender: sender.0,
            recipient: recipient.0,
            size: size.0,
        });
        let pager = Pager::parse(page.0.as_deref(), limit.0.as_deref());
        let response = search_emails(pool.0, &filter, pager)
            .await
            .map_err(ApiErrorResponse::context("Failed to search emails."))?;
        Ok(Json(response))
    }

    /// List every category, ordered by identifier.
    #[oai(method = "get", path = "/category", operation_id = "list_categories")]
    async fn category(&self, pool: Data<&SqlitePool>) -> ApiResult<Json<CategoryListResponse>> {
        let categories = list_categories(pool.0)
            .await
            .map_err(ApiErrorResponse::context("Failed to fetch categories."))?;
        Ok(Json(CategoryListResponse {
            success: true,
            categories,
        }))
    }

    /// Store a new email. All fields are required.
    #[oai(method = "post", path = "/insert", operation_id = "insert_email")]
    async fn insert(
        &self,
        pool: Data<&SqlitePool>,
        request: Json<InsertEmailRequest>,
    ) -> ApiResult<Json<InsertEmailResponse>> {
        let email = request.0.validate().inspect_err(|_| observe_insert(false))?;
        let result = insert_email(pool.0, &email).await;
        observe_insert(result.is_ok());
        let email_id = result.map_err(|e| match e.code() {
            ErrorCode::ConstraintViolation => ApiErrorResponse::from(e),
            _ => ApiErrorResponse::context("Failed to add email.")(e),
        })?;
        Ok(Json(InsertEmailResponse {
            success: true,
            message: "Email added successfully.".into(),
            email_id,
        }))
    }
}
