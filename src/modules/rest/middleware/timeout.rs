// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::{Endpoint, Middleware, Request, Result};
use std::time::Duration;
use tracing::error;

use crate::modules::error::code::ErrorCode;
use crate::modules::error::handler::create_api_error_response;
use crate::modules::settings::cli::SETTINGS;

pub const TIMEOUT_HEADER: &str = "X-MailSift-Timeout-Seconds";
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

pub struct Timeout;

impl<E: Endpoint> Middleware<E> for Timeout {
    type Output = TimeoutEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        TimeoutEndpoint { ep }
    }
}

pub struct TimeoutEndpoint<E> {
    ep: E,
}

/// Seconds to allow for `req`: the header value when it parses, otherwise the
/// configured default, capped at [`MAX_TIMEOUT_SECONDS`].
#[inline]
fn timeout_seconds(req: &Request) -> u64 {
    req.header(TIMEOUT_HEADER)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(SETTINGS.mailsift_request_timeout_secs)
        .min(MAX_TIMEOUT_SECONDS)
}

impl<E: Endpoint> Endpoint for TimeoutEndpoint<E> {
    type Output = E::Output;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let seconds = timeout_seconds(&req);
        match tokio::time::timeout(Duration::from_secs(seconds), self.ep.call(req)).await {
            Ok(result) => result,
            Err(_) => {
                error!("Request timed out after {} seconds", seconds);
                Err(create_api_error_response(
                    &format!(
                        "Request timed out after {} seconds (timeout set via {} header, max allowed: {} seconds)",
                        seconds, TIMEOUT_HEADER, MAX_TIMEOUT_SECONDS
                    ),
                    ErrorCode::RequestTimeout,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_overrides_default_within_cap() {
        let req = Request::builder().header(TIMEOUT_HEADER, "5").finish();
        assert_eq!(timeout_seconds(&req), 5);

        let req = Request::builder().header(TIMEOUT_HEADER, "9000").finish();
        assert_eq!(timeout_seconds(&req), MAX_TIMEOUT_SECONDS);

        let req = Request::builder().header(TIMEOUT_HEADER, "soon").finish();
        assert_eq!(timeout_seconds(&req), SETTINGS.mailsift_request_timeout_secs);

        let req = Request::builder().finish();
        assert_eq!(timeout_seconds(&req), SETTINGS.mailsift_request_timeout_secs);
    }
}
