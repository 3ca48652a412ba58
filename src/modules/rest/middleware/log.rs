// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::{
    num::NonZeroU32,
    sync::{Arc, LazyLock},
    time::{Duration, Instant},
};

use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::InMemoryState,
    Quota, RateLimiter,
};
use poem::{
    http::header, web::RealIp, Endpoint, FromRequest, IntoResponse, Middleware, Request, Response,
    Result,
};
use poem_openapi::OperationId;
use tracing::{error, info, warn, Instrument};

use crate::modules::metrics::{
    MAILSIFT_REQUEST_DURATION_BY_METHOD_AND_OPERATION, MAILSIFT_REQUEST_DURATION_BY_STATUS,
    MAILSIFT_REQUEST_TOTAL_BY_METHOD_AND_OPERATION,
};

pub type GovRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    InMemoryState,
    QuantaClock,
    NoOpMiddleware<QuantaInstant>,
>;

const LOG_BUDGET_PER_SECOND: u32 = 10;

static RATE_LIMITER: LazyLock<LogRateLimiter> = LazyLock::new(LogRateLimiter::new);

/// Caps how many request-completion lines are written per second. Errors are
/// the cheapest, so they are the last to be dropped under load.
pub struct LogRateLimiter {
    limiter: Arc<GovRateLimiter>,
}

impl LogRateLimiter {
    pub fn new() -> Self {
        Self {
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                NonZeroU32::new(LOG_BUDGET_PER_SECOND).unwrap_or(NonZeroU32::MIN),
            ))),
        }
    }

    pub fn should_log(&self, status: u16) -> bool {
        let cost = match status {
            500.. => 1,
            400..=499 => 3,
            _ => 5,
        };
        let cost = NonZeroU32::new(cost).unwrap_or(NonZeroU32::MIN);
        matches!(self.limiter.check_n(cost), Ok(Ok(())))
    }
}

#[derive(Default)]
pub struct Tracing;

impl<E: Endpoint> Middleware<E> for Tracing {
    type Output = TracingEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TracingEndpoint { inner: ep }
    }
}

/// Endpoint for the `Tracing` middleware.
pub struct TracingEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for TracingEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let remote_addr = RealIp::from_request_without_body(&req)
            .await
            .ok()
            .and_then(|real_ip| real_ip.0)
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| req.remote_addr().to_string());
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let query = req.uri().query().map(|q| q.to_string());
        let content_length = req
            .headers()
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok().map(|v| v.to_string()));

        let span = tracing::info_span!(
            "request",
            remote_addr = %remote_addr,
            method = %method,
            path = %path,
            query = ?query,
            content_length = ?content_length,
        );

        async move {
            let now = Instant::now();
            let res = self.inner.call(req).await;
            let duration = now.elapsed();

            match res {
                Ok(resp) => {
                    let resp = resp.into_response();
                    let status = resp.status().as_u16();
                    if let Some(operation_id) = resp.data::<OperationId>() {
                        record_metrics(method.as_str(), operation_id.0, status, duration);
                    }
                    log_response(status, duration);
                    Ok(resp)
                }
                Err(err) => {
                    log_response(err.status().as_u16(), duration);
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

fn record_metrics(method: &str, operation_id: &str, status: u16, duration: Duration) {
    let status = status.to_string();
    let seconds = duration.as_secs_f64();
    MAILSIFT_REQUEST_DURATION_BY_METHOD_AND_OPERATION
        .with_label_values(&[method, operation_id, status.as_str()])
        .observe(seconds);
    MAILSIFT_REQUEST_DURATION_BY_STATUS
        .with_label_values(&[status.as_str()])
        .observe(seconds);
    MAILSIFT_REQUEST_TOTAL_BY_METHOD_AND_OPERATION
        .with_label_values(&[method, operation_id, status.as_str()])
        .inc();
}

#[inline]
fn log_response(status: u16, duration: Duration) {
    if !RATE_LIMITER.should_log(status) {
        return;
    }
    match status {
        500.. => error!(status = %status, duration = ?duration, "request completed with server error"),
        400..=499 => warn!(status = %status, duration = ?duration, "request completed with client error"),
        _ => info!(status = %status, duration = ?duration, "request completed successfully"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outlast_successes_under_load() {
        let limiter = LogRateLimiter::new();
        assert!(limiter.should_log(200));
        assert!(limiter.should_log(404));
        assert!(!limiter.should_log(200));
        assert!(!limiter.should_log(404));
        assert!(limiter.should_log(500));
    }
}
