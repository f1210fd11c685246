// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Field rules shared by client and server validation.
//!
//! The contact field must look like either an email address or a phone
//! number:
//! - email is matched against the raw value
//! - phone is matched after all whitespace has been stripped
//!
//! Lengths are measured in characters, not bytes, so a 100-character
//! Japanese name is exactly at the limit.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Longest accepted name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Longest accepted message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 1000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\-+()]+$").expect("phone pattern compiles"));

/// Form fields, in the order the server checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    InquiryType,
    Contact,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::InquiryType => "inquiryType",
            Self::Contact => "contact",
            Self::Message => "message",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field rule violation. The display text is shown to the user.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    #[error("お名前を入力してください")]
    NameRequired,

    #[error("100文字以内で入力してください")]
    NameTooLong,

    #[error("お問い合わせ項目を選択してください")]
    InquiryTypeRequired,

    #[error("連絡先を入力してください")]
    ContactRequired,

    #[error("メールアドレスまたは電話番号の形式が正しくありません")]
    ContactFormat,

    #[error("1000文字以内で入力してください")]
    MessageTooLong,
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            Self::NameRequired | Self::NameTooLong => Field::Name,
            Self::InquiryTypeRequired => Field::InquiryType,
            Self::ContactRequired | Self::ContactFormat => Field::Contact,
            Self::MessageTooLong => Field::Message,
        }
    }
}

/// Character count used for every length rule.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Digits, `-`, `+`, `(` and `)` once whitespace is removed.
pub fn is_phone(value: &str) -> bool {
    let cleaned: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE_RE.is_match(&cleaned)
}

/// The contact predicate used on both sides of the pipeline.
pub fn is_valid_contact(value: &str) -> bool {
    is_email(value) || is_phone(value)
}

/// Message rule; an absent message is fine.
pub fn check_message(message: Option<&str>) -> Result<(), FieldError> {
    match message {
        Some(m) if char_len(m) > MAX_MESSAGE_CHARS => Err(FieldError::MessageTooLong),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shapes() {
        assert!(is_email("test@example.com"));
        assert!(is_email("a.b+c@sub.example.co.jp"));
        assert!(!is_email("test@example"));
        assert!(!is_email("test @example.com"));
        assert!(!is_email("a@b@c.com"));
        assert!(!is_email(""));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_phone("03-1234-5678"));
        assert!(is_phone("+81 (3) 1234 5678"));
        assert!(is_phone("090 1234 5678"));
        assert!(!is_phone("03-1234-567a"));
        assert!(!is_phone("   "));
    }

    #[test]
    fn test_contact_predicate() {
        assert!(is_valid_contact("03-1234-5678"));
        assert!(is_valid_contact("test@example.com"));
        assert!(!is_valid_contact("not-an-email-or-phone!"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(char_len("山田 太郎"), 5);
        assert_eq!(char_len(&"あ".repeat(100)), MAX_NAME_CHARS);
    }

    #[test]
    fn test_message_limit() {
        assert!(check_message(None).is_ok());
        assert!(check_message(Some("")).is_ok());
        assert!(check_message(Some(&"x".repeat(1000))).is_ok());
        assert_eq!(
            check_message(Some(&"x".repeat(1001))),
            Err(FieldError::MessageTooLong)
        );
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(FieldError::NameTooLong.field(), Field::Name);
        assert_eq!(FieldError::ContactFormat.field(), Field::Contact);
        assert_eq!(Field::InquiryType.to_string(), "inquiryType");
    }
}
