// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use email::EmailApi;
use poem_openapi::{OpenApiService, Tags};

use crate::mailsift_version;

pub mod email;
#[cfg(test)]
mod tests;

#[derive(Tags)]
pub enum ApiTags {
    /// Search, list categories and add emails
    Email,
}

pub fn create_openapi_service() -> OpenApiService<EmailApi, ()> {
    OpenApiService::new(EmailApi, "MailSiftApi", mailsift_version!())
}
