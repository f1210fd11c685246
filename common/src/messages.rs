// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! User-facing messages that are not tied to a single field.

/// Returned with a 200 once a submission is accepted.
pub const SUBMISSION_ACCEPTED: &str = "送信が完了しました。担当者よりご連絡いたします。";

/// Returned with a 429.
pub const TOO_MANY_SUBMISSIONS: &str =
    "送信回数が多すぎます。しばらく待ってから再度お試しください。";

/// Returned with a 400 when the body is JSON but not a submission.
pub const VALIDATION_FAILED: &str = "バリデーションエラーが発生しました";

/// Returned with a 500. Never carries the underlying cause.
pub const SUBMISSION_FAILED: &str = "送信に失敗しました。しばらく待ってから再度お試しください。";

/// Client fallback when an error response has no `error` string.
pub const SUBMISSION_FAILED_SHORT: &str = "送信に失敗しました";

/// Client message when the request could not complete.
pub const NETWORK_ERROR: &str =
    "ネットワークエラーが発生しました。しばらく待ってから再度お試しください。";

/// Client message when no endpoint is configured.
pub const ENDPOINT_NOT_CONFIGURED: &str =
    "送信先が未設定です。CONTACT_ENDPOINT を設定してください。";
