// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wire types exchanged between the form and the intake service.

use serde::{Deserialize, Deserializer, Serialize};

/// Inquiry types offered by the form, in display order.
pub const INQUIRY_TYPES: &[&str] = &[
    "入部について",
    "体験・見学について",
    "練習内容について",
    "大会・記録について",
    "その他",
];

/// Inquiry type preselected on an empty form.
pub const DEFAULT_INQUIRY_TYPE: &str = "入部について";

/// Contact form submission.
///
/// Deserialization is strict: unknown keys and wrong types are rejected
/// before any field rule runs. Missing fields deserialize as `None` so the
/// field rules can report them with their own message. `message` may be
/// omitted but not `null`. The legacy key `grade` is accepted for
/// `inquiryType`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default, alias = "grade")]
    pub inquiry_type: Option<String>,

    #[serde(default)]
    pub contact: Option<String>,

    #[serde(
        default,
        deserialize_with = "present_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}

fn present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

impl SubmissionPayload {
    pub fn new(
        name: impl Into<String>,
        inquiry_type: impl Into<String>,
        contact: impl Into<String>,
        message: Option<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            inquiry_type: Some(inquiry_type.into()),
            contact: Some(contact.into()),
            message,
        }
    }
}

/// 200 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionAck {
    pub success: bool,
    pub message: String,
}

/// 400 / 429 / 500 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
