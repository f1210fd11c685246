// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Intake
//!
//! This crate accepts contact form submissions for the club site and
//! enforces the submission policy:
//!
//! - Per-client rate limiting (5 submissions per 60 s window)
//! - Fail-closed payload parsing
//! - Field validation with first-violation reporting
//! - Asynchronous downstream notification with retries

pub mod config;
pub mod error;
pub mod handlers;
pub mod limiter;
pub mod metrics;
pub mod notifier;
pub mod validator;

pub use config::Config;
pub use error::IntakeError;
pub use handlers::{router, AppState};
pub use limiter::{FixedWindowStore, RateLimitDecision, RateLimitStore};
pub use notifier::{NotificationDispatcher, Notifier, SubmissionRecord};
pub use validator::{validate_submission, ValidSubmission};
