// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::modules::email::timestamp::{format_timestamp, parse_timestamp};
use crate::modules::error::{code::ErrorCode, MailSiftResult};
use crate::raise_error;

/// A named bucket emails are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier of the category.
    pub category_id: i64,
    /// Display name (e.g., "newsletters").
    pub category_name: String,
}

/// One stored email, joined with the display name of its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct EmailRecord {
    /// Row identifier.
    pub email_id: i64,
    /// The `Message-ID` of the email, stored as given.
    pub message_id: String,
    /// Sender address.
    pub sender_email: String,
    /// Recipient address.
    pub recipient_email: String,
    /// Message body text.
    pub message: String,
    /// Size of the message in bytes.
    pub size: i64,
    /// Category reference, `null` when the email is uncategorized.
    pub category_id: Option<i64>,
    /// Timestamp formatted as `YYYY-MM-DD HH:MM:SS` (UTC).
    pub date: String,
    /// Display name of the category, `null` when the email is uncategorized.
    pub category_name: Option<String>,
}

/// Request body of `POST /api/email/insert`. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct InsertEmailRequest {
    pub message_id: Option<String>,
    pub sender_email: Option<String>,
    pub recipient_email: Option<String>,
    pub message: Option<String>,
    /// Size in bytes; must be positive.
    pub size: Option<i64>,
    pub category_id: Option<i64>,
    /// RFC 3339, RFC 2822 or `YYYY-MM-DD[ HH:MM[:SS]]`.
    pub date: Option<String>,
}

/// A validated email ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmail {
    pub message_id: String,
    pub sender_email: String,
    pub recipient_email: String,
    pub message: String,
    pub size: i64,
    pub category_id: Option<i64>,
    pub date: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl InsertEmailRequest {
    pub fn validate(self) -> MailSiftResult<NewEmail> {
        let required = || {
            raise_error!(
                "All fields are required.".into(),
                ErrorCode::MissingRequiredField
            )
        };

        let message_id = present(self.message_id).ok_or_else(required)?;
        let sender_email = present(self.sender_email).ok_or_else(required)?;
        let recipient_email = present(self.recipient_email).ok_or_else(required)?;
        let message = present(self.message).ok_or_else(required)?;
        let size = self.size.filter(|s| *s != 0).ok_or_else(required)?;
        let category_id = self.category_id.filter(|c| *c != 0).ok_or_else(required)?;
        let date = present(self.date).ok_or_else(required)?;

        if size < 0 {
            return Err(raise_error!(
                format!("'size' must be a non-negative integer, got {}", size),
                ErrorCode::InvalidParameter
            ));
        }
        let timestamp = parse_timestamp(&date).ok_or_else(|| {
            raise_error!(
                format!("'date' is not a recognizable date: {}", date),
                ErrorCode::InvalidParameter
            )
        })?;

        Ok(NewEmail {
            message_id,
            sender_email,
            recipient_email,
            message,
            size,
            category_id: Some(category_id),
            date: format_timestamp(&timestamp),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct CategoryListResponse {
    pub success: bool,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
#[serde(rename_all = "camelCase")]
#[oai(rename_all = "camelCase")]
pub struct InsertEmailResponse {
    pub success: bool,
    pub message: String,
    /// Identifier assigned to the new email.
    pub email_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> InsertEmailRequest {
        InsertEmailRequest {
            message_id: Some("<abc@mail.example.com>".into()),
            sender_email: Some("alice@example.com".into()),
            recipient_email: Some("bob@example.com".into()),
            message: Some("Quarterly numbers attached".into()),
            size: Some(2048),
            category_id: Some(4),
            date: Some("2024-02-10T09:15:00Z".into()),
        }
    }

    #[test]
    fn complete_request_is_normalized() {
        let email = complete().validate().unwrap();
        assert_eq!(email.date, "2024-02-10 09:15:00");
        assert_eq!(email.category_id, Some(4));
        assert_eq!(email.size, 2048);
    }

    #[test]
    fn missing_or_blank_fields_are_rejected() {
        let cases = [
            InsertEmailRequest {
                message_id: None,
                ..complete()
            },
            InsertEmailRequest {
                sender_email: Some("   ".into()),
                ..complete()
            },
            InsertEmailRequest {
                size: Some(0),
                ..complete()
            },
            InsertEmailRequest {
                category_id: None,
                ..complete()
            },
            InsertEmailRequest {
                date: Some(String::new()),
                ..complete()
            },
        ];
        for request in cases {
            let error = request.validate().unwrap_err();
            assert_eq!(error.code(), ErrorCode::MissingRequiredField);
            assert_eq!(error.to_string(), "All fields are required.");
        }
    }

    #[test]
    fn negative_size_and_bad_date_are_invalid() {
        let error = InsertEmailRequest {
            size: Some(-1),
            ..complete()
        }
        .validate()
        .unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidParameter);

        let error = InsertEmailRequest {
            date: Some("not a date".into()),
            ..complete()
        }
        .validate()
        .unwrap_err();
        assert_eq!(error.code(), ErrorCode::InvalidParameter);
    }
}
