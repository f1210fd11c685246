// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form
//!
//! Client-side controller for the club site's contact form. It owns the
//! field values, validates them before anything leaves the page, posts one
//! request per submit and turns the response into a banner state.

pub mod config;
pub mod controller;
pub mod validation;

pub use config::FormConfig;
pub use controller::{
    FormController, FormError, FormFields, FormSnapshot, SubmitOutcome, SubmitStatus,
};
pub use validation::{validate, FieldErrors};
