// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::error::MailSiftResult;
use crate::utc_now;
use std::sync::LazyLock;

pub mod status;

pub static SERVICE_CONTEXT: LazyLock<ServiceContext> = LazyLock::new(ServiceContext::new);

/// Start-up hook for process-wide services, run once from `main` in dependency order.
pub trait Initialize {
    async fn initialize() -> MailSiftResult<()>;
}

pub struct ServiceContext {
    start_at: i64,
}

impl Initialize for ServiceContext {
    async fn initialize() -> MailSiftResult<()> {
        LazyLock::force(&SERVICE_CONTEXT);
        Ok(())
    }
}

impl ServiceContext {
    pub fn new() -> Self {
        Self {
            start_at: utc_now!(),
        }
    }

    pub fn start_at(&self) -> i64 {
        self.start_at
    }

    pub fn uptime_ms(&self) -> i64 {
        utc_now!() - self.start_at
    }
}
