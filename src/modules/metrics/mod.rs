// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::LazyLock;

use crate::mailsift_version;
use crate::modules::{
    context::{Initialize, SERVICE_CONTEXT},
    error::MailSiftResult,
};
use prometheus::{
    register_gauge, register_gauge_vec, register_histogram_vec, register_int_counter_vec, Gauge,
    GaugeVec, HistogramVec, IntCounterVec,
};

pub mod endpoint;

pub const SUCCESS: &str = "success";
pub const FAILURE: &str = "failure";

pub const METRIC_REQUEST_DURATION_BY_STATUS: &str = "mailsift_request_duration_seconds_by_status";
pub const METRIC_REQUEST_DURATION_BY_METHOD_AND_OPERATION: &str =
    "mailsift_request_duration_seconds_by_method_and_operation";
pub const METRIC_REQUEST_TOTAL_BY_METHOD_AND_OPERATION: &str =
    "mailsift_request_total_by_method_and_operation";
pub const METRIC_SEARCH_TOTAL: &str = "mailsift_search_total";
pub const METRIC_SEARCH_DURATION_SECONDS: &str = "mailsift_search_duration_seconds";
pub const METRIC_EMAIL_INSERT_TOTAL: &str = "mailsift_email_insert_total";
pub const METRIC_BUILD_INFO: &str = "mailsift_build_info";
pub const METRIC_START_TIMESTAMP: &str = "mailsift_start_timestamp";

pub static MAILSIFT_BUILD_INFO: LazyLock<GaugeVec> = LazyLock::new(|| {
    register_gauge_vec!(
        METRIC_BUILD_INFO,
        "Build information including version and commit hash",
        &["version", "commit"]
    )
    .expect("Failed to register mailsift_build_info")
});

pub static MAILSIFT_START_TIMESTAMP: LazyLock<Gauge> = LazyLock::new(|| {
    register_gauge!(
        METRIC_START_TIMESTAMP,
        "Unix timestamp (milliseconds) when mailsift started"
    )
    .expect("Failed to register mailsift_start_timestamp")
});

pub static MAILSIFT_REQUEST_DURATION_BY_STATUS: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        METRIC_REQUEST_DURATION_BY_STATUS,
        "Distribution of HTTP request durations, measured in seconds, grouped by response status code",
        &["status"]
    )
    .expect("Failed to register request_duration_seconds_by_status")
});

pub static MAILSIFT_REQUEST_DURATION_BY_METHOD_AND_OPERATION: LazyLock<HistogramVec> =
    LazyLock::new(|| {
        register_histogram_vec!(
            METRIC_REQUEST_DURATION_BY_METHOD_AND_OPERATION,
            "Distribution of HTTP request durations, measured in seconds, grouped by method, operation ID, and status code",
            &["method", "operation_id", "status"]
        )
        .expect("Failed to register request_duration_seconds_by_method_and_operation")
    });

pub static MAILSIFT_REQUEST_TOTAL_BY_METHOD_AND_OPERATION: LazyLock<IntCounterVec> =
    LazyLock::new(|| {
        register_int_counter_vec!(
            METRIC_REQUEST_TOTAL_BY_METHOD_AND_OPERATION,
            "Total number of HTTP requests, grouped by method, operation ID, and status code",
            &["method", "operation_id", "status"]
        )
        .expect("Failed to register request_total_by_method_and_operation")
    });

pub static MAILSIFT_SEARCH_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        METRIC_SEARCH_TOTAL,
        "Total number of email searches, grouped by outcome",
        &["status"]
    )
    .expect("Failed to register mailsift_search_total")
});

pub static MAILSIFT_SEARCH_DURATION_SECONDS: LazyLock<HistogramVec> = LazyLock::new(|| {
    register_histogram_vec!(
        METRIC_SEARCH_DURATION_SECONDS,
        "Distribution of email search durations (count and fetch queries), measured in seconds",
        &["status"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("Failed to register mailsift_search_duration_seconds")
});

pub static MAILSIFT_EMAIL_INSERT_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        METRIC_EMAIL_INSERT_TOTAL,
        "Total number of email insert attempts, grouped by outcome",
        &["status"]
    )
    .expect("Failed to register mailsift_email_insert_total")
});

pub struct MetricsService;

impl Initialize for MetricsService {
    async fn initialize() -> MailSiftResult<()> {
        MAILSIFT_START_TIMESTAMP.set(SERVICE_CONTEXT.start_at() as f64);
        MAILSIFT_BUILD_INFO
            .with_label_values(&[mailsift_version!(), env!("GIT_HASH")])
            .set(1.0);
        Ok(())
    }
}

/// Records the outcome and latency of one search request.
pub fn observe_search(success: bool, elapsed: std::time::Duration) {
    let status = if success { SUCCESS } else { FAILURE };
    MAILSIFT_SEARCH_TOTAL.with_label_values(&[status]).inc();
    MAILSIFT_SEARCH_DURATION_SECONDS
        .with_label_values(&[status])
        .observe(elapsed.as_secs_f64());
}

pub fn observe_insert(success: bool) {
    let status = if success { SUCCESS } else { FAILURE };
    MAILSIFT_EMAIL_INSERT_TOTAL.with_label_values(&[status]).inc();
}
