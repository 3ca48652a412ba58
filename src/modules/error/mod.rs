// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::Formatter;

use crate::raise_error;
use code::ErrorCode;
use poem::http::StatusCode;
use poem_openapi::{payload::Json, ApiResponse, Object};
use snafu::{Location, Snafu};

pub mod code;
pub mod handler;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum MailSiftError {
    #[snafu(display("{message}"))]
    Generic {
        message: String,
        #[snafu(implicit)]
        location: Location,
        code: ErrorCode,
    },
}

pub type MailSiftResult<T, E = MailSiftError> = std::result::Result<T, E>;

impl MailSiftError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MailSiftError::Generic { code, .. } => *code,
        }
    }
}

impl From<sqlx::Error> for MailSiftError {
    fn from(e: sqlx::Error) -> Self {
        let code = match &e {
            sqlx::Error::Database(db)
                if db.is_foreign_key_violation()
                    || db.is_unique_violation()
                    || db.is_check_violation() =>
            {
                ErrorCode::ConstraintViolation
            }
            sqlx::Error::PoolTimedOut => ErrorCode::ConnectionPoolTimeout,
            _ => ErrorCode::DatabaseError,
        };
        raise_error!(e.to_string(), code)
    }
}

/// Failure envelope shared by every endpoint.
///
/// `message` is the human readable summary of what the request was trying to do,
/// `error` carries the underlying cause.
#[derive(Debug, Clone, Object)]
pub struct ApiError {
    /// Always `false`.
    pub success: bool,
    /// Summary of the failed operation.
    pub message: String,
    /// The underlying error text.
    pub error: String,
    /// Numeric error code, see `ErrorCode`.
    pub code: u32,
}

impl ApiError {
    pub fn new(message: String, error: String, code: u32) -> Self {
        Self {
            success: false,
            message,
            error,
            code,
        }
    }

    pub fn new_with_error_code<ErrorType: std::fmt::Display>(
        error: ErrorType,
        code: u32,
    ) -> ApiError {
        let text = format!("{:#}", error);
        Self::new(text.clone(), text, code)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error({}): {} ({})", self.code, self.message, self.error)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, ApiResponse)]
pub enum ApiErrorResponse {
    Generic(StatusCode, Json<ApiError>),
}

impl ApiErrorResponse {
    fn build(message: String, error: MailSiftError) -> Self {
        match error {
            MailSiftError::Generic {
                message: cause,
                location,
                code,
            } => {
                tracing::error!(
                    "API error occurred: [{:#?}] {}: {} at {:?}",
                    code,
                    message,
                    cause,
                    location
                );
                let api_error = ApiError::new(message, cause, code as u32);
                ApiErrorResponse::Generic(code.status(), Json(api_error))
            }
        }
    }

    /// Wraps a failure under a fixed summary message, keeping the cause in `error`.
    ///
    /// ```ignore
    /// search_emails(pool, &filter, pager)
    ///     .await
    ///     .map_err(ApiErrorResponse::context("Failed to search emails."))?;
    /// ```
    pub fn context(message: &'static str) -> impl FnOnce(MailSiftError) -> ApiErrorResponse {
        move |error| Self::build(message.to_string(), error)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorResponse::Generic(status, _) => *status,
        }
    }
}

impl From<MailSiftError> for ApiErrorResponse {
    fn from(error: MailSiftError) -> Self {
        let message = error.to_string();
        Self::build(message, error)
    }
}
