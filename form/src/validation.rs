// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Local validation run before a submission leaves the client.

use crate::controller::FormFields;
use contact_common::rules;
use contact_common::{Field, FieldError};
use std::collections::BTreeMap;

/// Errors keyed by field; empty when the form is valid.
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Check every field and collect all violations.
pub fn validate(fields: &FormFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert(Field::Name, FieldError::NameRequired);
    }

    if fields.contact.trim().is_empty() {
        errors.insert(Field::Contact, FieldError::ContactRequired);
    } else if !rules::is_valid_contact(&fields.contact) {
        errors.insert(Field::Contact, FieldError::ContactFormat);
    }

    if let Err(err) = rules::check_message(Some(&fields.message)) {
        errors.insert(Field::Message, err);
    }

    errors
}
