// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the submission route and their HTTP mapping.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contact_common::{messages, ErrorBody, FieldError};
use std::time::Duration;
use thiserror::Error;

/// Every way a submission can fail at the handler boundary.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("invalid field: {0}")]
    Invalid(#[from] FieldError),

    #[error("body does not match the submission shape: {0}")]
    Shape(#[source] serde_json::Error),

    #[error("body is not JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Invalid(_) | Self::Shape(_) => StatusCode::BAD_REQUEST,
            Self::MalformedBody(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text returned to the caller. Internal causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::RateLimited { .. } => messages::TOO_MANY_SUBMISSIONS.to_string(),
            Self::Invalid(field) => field.to_string(),
            Self::Shape(_) => messages::VALIDATION_FAILED.to_string(),
            Self::MalformedBody(_) | Self::Internal(_) => messages::SUBMISSION_FAILED.to_string(),
        }
    }
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.public_message(),
        });
        let mut response = (self.status(), body).into_response();

        if let Self::RateLimited { retry_after } = &self {
            // Round up so clients never retry inside the window.
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}
