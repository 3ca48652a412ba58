// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::code::ErrorCode;
use crate::modules::error::handler::error_handler;
use crate::modules::error::{ApiErrorResponse, MailSiftResult};
use crate::modules::metrics::endpoint::PrometheusEndpoint;
use crate::modules::rest::middleware::error::ErrorCapture;
use crate::modules::rest::middleware::log::Tracing;
use crate::modules::rest::middleware::timeout::{Timeout, TIMEOUT_HEADER};
use crate::modules::rest::public::status::get_status;
use crate::modules::{settings::cli::SETTINGS, utils::shutdown::shutdown_signal};
use crate::raise_error;
use api::create_openapi_service;
use poem::get;
use poem::listener::TcpListener;
use poem::middleware::{CatchPanic, Compression, Cors};
use poem::{Endpoint, EndpointExt, Route, Server};
use sqlx::SqlitePool;
use std::time::Duration;
use tracing::info;

pub mod api;
pub mod middleware;
pub mod public;

pub type ApiResult<T, E = ApiErrorResponse> = std::result::Result<T, E>;

const DESCRIPTION: &str = r#"
    MailSift is a small REST service for browsing, searching and categorizing email metadata.

    - Search stored emails by free text, category, date range, sender, recipient and minimum size.
    - Results are paginated, newest first, with the total match count and page count.
    - Categories can be listed and new emails added through the same API.
"#;

/// Assembles the full route tree around `pool`.
pub fn create_app(pool: SqlitePool) -> impl Endpoint {
    let api_service = create_openapi_service()
        .description(DESCRIPTION)
        .summary("Search and browse stored email metadata");

    let swagger = api_service.swagger_ui();
    let redoc = api_service.redoc();
    let scalar = api_service.scalar();
    let spec_json = api_service.spec_endpoint();
    let spec_yaml = api_service.spec_endpoint_yaml();
    let openapi_explorer = api_service.openapi_explorer();

    let open_api_route = Route::new()
        .nest_no_strip("/api/email", api_service)
        .with(ErrorCapture)
        .with(Timeout)
        .with(Tracing);

    let mut cors_origins = SETTINGS.mailsift_cors_origins.clone();
    if cors_origins.is_empty() {
        cors_origins = ["*".to_string()].into_iter().collect();
    }

    let cors = Cors::new()
        .allow_origins(cors_origins)
        .allow_credentials(true)
        .allow_methods(vec!["GET", "POST", "OPTIONS", "HEAD"])
        .allow_headers(vec!["Content-Type", "Authorization", TIMEOUT_HEADER])
        .expose_headers(vec!["Accept"])
        .max_age(SETTINGS.mailsift_cors_max_age);

    Route::new()
        .nest("/api-docs/swagger", swagger)
        .nest("/api-docs/redoc", redoc)
        .nest("/api-docs/explorer", openapi_explorer)
        .nest("/api-docs/scalar", scalar)
        .nest("/api-docs/spec.json", spec_json)
        .nest("/api-docs/spec.yaml", spec_yaml)
        .nest("/metrics", PrometheusEndpoint)
        .nest("/api/status", get(get_status))
        .nest_no_strip("/api/email", open_api_route)
        .with(cors)
        .with_if(
            SETTINGS.mailsift_http_compression_enabled,
            Compression::new(),
        )
        .with(CatchPanic::new())
        .data(pool)
        .catch_all_error(error_handler)
}

pub async fn start_http_server(pool: SqlitePool) -> MailSiftResult<()> {
    let listener = TcpListener::bind((
        SETTINGS
            .mailsift_bind_ip
            .clone()
            .unwrap_or("0.0.0.0".into()),
        SETTINGS.mailsift_http_port,
    ));

    let server = Server::new(listener)
        .name("MailSift API Service")
        .idle_timeout(Duration::from_secs(60))
        .run_with_graceful_shutdown(
            create_app(pool),
            shutdown_signal(),
            Some(Duration::from_secs(5)),
        );
    info!(
        "MailSift API Service is now running on port {}.",
        SETTINGS.mailsift_http_port
    );
    server
        .await
        .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))
}
