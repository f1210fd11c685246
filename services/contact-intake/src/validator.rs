// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Authoritative submission validation.
//!
//! Fields are checked in a fixed order (name, inquiry type, contact,
//! message) and the first violation is returned on its own; callers never
//! see an aggregate.

use contact_common::rules::{self, FieldError, MAX_NAME_CHARS};
use contact_common::SubmissionPayload;
use serde::Serialize;
use tracing::debug;

/// A submission that passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidSubmission {
    pub name: String,
    pub inquiry_type: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validate a deserialized payload, returning the first violation.
pub fn validate_submission(payload: SubmissionPayload) -> Result<ValidSubmission, FieldError> {
    let SubmissionPayload {
        name,
        inquiry_type,
        contact,
        message,
    } = payload;

    let name = name.unwrap_or_default();
    if name.is_empty() {
        return Err(reject(FieldError::NameRequired));
    }
    if rules::char_len(&name) > MAX_NAME_CHARS {
        return Err(reject(FieldError::NameTooLong));
    }

    let inquiry_type = inquiry_type.unwrap_or_default();
    if inquiry_type.is_empty() {
        return Err(reject(FieldError::InquiryTypeRequired));
    }

    let contact = contact.unwrap_or_default();
    if contact.is_empty() {
        return Err(reject(FieldError::ContactRequired));
    }
    if !rules::is_valid_contact(&contact) {
        return Err(reject(FieldError::ContactFormat));
    }

    rules::check_message(message.as_deref()).map_err(reject)?;

    Ok(ValidSubmission {
        name,
        inquiry_type,
        contact,
        message,
    })
}

fn reject(err: FieldError) -> FieldError {
    debug!(field = %err.field(), "Submission failed validation");
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, contact: &str, message: Option<&str>) -> SubmissionPayload {
        SubmissionPayload::new(name, "入部について", contact, message.map(str::to_string))
    }

    #[test]
    fn test_valid_email_submission() {
        let valid = validate_submission(payload("山田 太郎", "test@example.com", Some(""))).unwrap();
        assert_eq!(valid.name, "山田 太郎");
        assert_eq!(valid.message.as_deref(), Some(""));
    }

    #[test]
    fn test_valid_phone_submission() {
        assert!(validate_submission(payload("山田 太郎", "03-1234-5678", None)).is_ok());
    }

    #[test]
    fn test_name_length_boundary() {
        let at_limit = "あ".repeat(100);
        assert!(validate_submission(payload(&at_limit, "test@example.com", None)).is_ok());

        let over = "あ".repeat(101);
        assert_eq!(
            validate_submission(payload(&over, "test@example.com", None)),
            Err(FieldError::NameTooLong)
        );
    }

    #[test]
    fn test_message_length_boundary() {
        let at_limit = "x".repeat(1000);
        assert!(validate_submission(payload("a", "test@example.com", Some(&at_limit))).is_ok());

        let over = "x".repeat(1001);
        assert_eq!(
            validate_submission(payload("a", "test@example.com", Some(&over))),
            Err(FieldError::MessageTooLong)
        );
    }

    #[test]
    fn test_bad_contact_rejected() {
        assert_eq!(
            validate_submission(payload("a", "not-an-email-or-phone!", None)),
            Err(FieldError::ContactFormat)
        );
        assert_eq!(
            validate_submission(payload("a", "", None)),
            Err(FieldError::ContactRequired)
        );
    }

    #[test]
    fn test_first_violation_wins() {
        let over = "x".repeat(1001);
        assert_eq!(
            validate_submission(payload("", "nope", Some(&over))),
            Err(FieldError::NameRequired)
        );
        assert_eq!(
            validate_submission(payload("a", "nope", Some(&over))),
            Err(FieldError::ContactFormat)
        );
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            validate_submission(SubmissionPayload::default()),
            Err(FieldError::NameRequired)
        );

        let no_inquiry = SubmissionPayload {
            inquiry_type: None,
            ..payload("a", "test@example.com", None)
        };
        assert_eq!(
            validate_submission(no_inquiry),
            Err(FieldError::InquiryTypeRequired)
        );
    }
}
