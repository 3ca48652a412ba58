// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod manager;
pub mod param;
pub mod schema;
#[cfg(test)]
mod tests;
