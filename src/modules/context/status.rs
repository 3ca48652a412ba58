use crate::modules::context::SERVICE_CONTEXT;
use crate::mailsift_version;
use chrono::Local;
use poem_openapi::Object;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;
use timeago::Formatter;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct ServiceStatus {
    /// The service uptime in milliseconds since it started.
    pub uptime_ms: i64,
    /// A human-readable string indicating the time elapsed since the service started (e.g., "2 hours ago").
    pub timeago: String,
    /// The UTC offset the service is operating in (e.g., "+08:00").
    pub timezone: String,
    /// The version of the mailsift service currently running.
    pub version: String,
}

impl ServiceStatus {
    pub fn get() -> Self {
        let uptime_ms = SERVICE_CONTEXT.uptime_ms().max(0);
        Self {
            uptime_ms,
            timeago: Formatter::new().convert(Duration::from_millis(uptime_ms as u64)),
            timezone: Local::now().offset().to_string(),
            version: mailsift_version!().into(),
        }
    }
}
