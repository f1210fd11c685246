// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Shared contact form contract.
//!
//! Both ends of the club site's contact pipeline depend on this crate:
//!
//! - `contact-form` validates locally before it posts
//! - `contact-intake` re-validates authoritatively before it accepts
//!
//! Keeping the payload shape, the email-or-phone predicate and the
//! user-facing messages in one place stops the two sides from drifting.

pub mod messages;
pub mod payload;
pub mod rules;

pub use payload::{ErrorBody, SubmissionAck, SubmissionPayload};
pub use rules::{Field, FieldError};
