// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form state machine.
//!
//! Status moves `Idle → Success | Error` on submit. A success returns to
//! `Idle` on its own after the dismiss delay; an error returns to `Idle` as
//! soon as the user edits a field. Only one submission may be in flight.

use crate::config::FormConfig;
use crate::validation::{validate, FieldErrors};
use contact_common::payload::DEFAULT_INQUIRY_TYPE;
use contact_common::{messages, Field, SubmissionPayload};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Banner state shown above the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Success,
    Error(String),
}

/// Current field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub inquiry_type: String,
    pub contact: String,
    pub message: String,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            inquiry_type: DEFAULT_INQUIRY_TYPE.to_string(),
            contact: String::new(),
            message: String::new(),
        }
    }
}

impl FormFields {
    fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::InquiryType => self.inquiry_type = value,
            Field::Contact => self.contact = value,
            Field::Message => self.message = value,
        }
    }

    fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload::new(
            self.name.clone(),
            self.inquiry_type.clone(),
            self.contact.clone(),
            Some(self.message.clone()),
        )
    }
}

/// Point-in-time copy of the controller state for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub errors: FieldErrors,
    pub status: SubmitStatus,
    pub submitting: bool,
}

/// What a call to [`FormController::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// Another submission is still in flight; nothing was sent.
    AlreadySubmitting,
    /// No endpoint configured; nothing was sent.
    NotConfigured,
    /// The server accepted the submission.
    Accepted { message: String },
    /// The server answered with a non-success status.
    Rejected { status: u16, message: String },
    /// The request did not complete.
    NetworkFailure,
}

/// Controller construction errors.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Default)]
struct FormState {
    snapshot: FormSnapshot,
    /// Bumped on every success so a stale dismiss timer can tell it lost.
    success_generation: u64,
}

/// Drives one contact form.
#[derive(Clone)]
pub struct FormController {
    state: Arc<RwLock<FormState>>,
    client: reqwest::Client,
    config: FormConfig,
}

impl FormController {
    pub fn new(config: FormConfig) -> Result<Self, FormError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            state: Arc::new(RwLock::new(FormState::default())),
            client,
            config,
        })
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        self.state.read().await.snapshot.clone()
    }

    /// Store a field edit. Clears that field's error and dismisses an error
    /// banner.
    pub async fn on_field_change(&self, field: Field, value: impl Into<String>) {
        let mut state = self.state.write().await;
        let snapshot = &mut state.snapshot;
        snapshot.fields.set(field, value.into());
        snapshot.errors.remove(&field);
        if matches!(snapshot.status, SubmitStatus::Error(_)) {
            snapshot.status = SubmitStatus::Idle;
        }
    }

    /// Validate the current fields without touching state.
    pub async fn validate(&self) -> FieldErrors {
        validate(&self.state.read().await.snapshot.fields)
    }

    /// Validate and, if clean, post the form once.
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut state = self.state.write().await;
            let snapshot = &mut state.snapshot;

            let errors = validate(&snapshot.fields);
            snapshot.errors = errors.clone();
            if !errors.is_empty() {
                debug!(fields = errors.len(), "Form failed local validation");
                return SubmitOutcome::Invalid(errors);
            }

            if snapshot.submitting {
                debug!("Submit ignored, request already in flight");
                return SubmitOutcome::AlreadySubmitting;
            }

            if self.config.endpoint.is_none() {
                warn!("Contact endpoint is not configured");
                snapshot.status = SubmitStatus::Error(messages::ENDPOINT_NOT_CONFIGURED.to_string());
                return SubmitOutcome::NotConfigured;
            }

            snapshot.submitting = true;
            snapshot.status = SubmitStatus::Idle;
            snapshot.fields.to_payload()
        };

        let outcome = self.post(&payload).await;
        self.finish(&outcome).await;
        outcome
    }

    async fn post(&self, payload: &SubmissionPayload) -> SubmitOutcome {
        let Some(endpoint) = self.config.endpoint.clone() else {
            return SubmitOutcome::NotConfigured;
        };

        let response = match self.client.post(endpoint).json(payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "Contact submission did not complete");
                return SubmitOutcome::NetworkFailure;
            }
        };

        let status = response.status();
        let body: Option<serde_json::Value> = response.json().await.ok();
        let text = |key: &str| {
            body.as_ref()
                .and_then(|b| b.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        if status.is_success() {
            info!(status = status.as_u16(), "Contact submission accepted");
            SubmitOutcome::Accepted {
                message: text("message")
                    .unwrap_or_else(|| messages::SUBMISSION_ACCEPTED.to_string()),
            }
        } else {
            info!(status = status.as_u16(), "Contact submission rejected");
            SubmitOutcome::Rejected {
                status: status.as_u16(),
                message: text("error")
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| messages::SUBMISSION_FAILED_SHORT.to_string()),
            }
        }
    }

    async fn finish(&self, outcome: &SubmitOutcome) {
        let mut state = self.state.write().await;
        state.snapshot.submitting = false;

        match outcome {
            SubmitOutcome::Accepted { .. } => {
                state.snapshot.status = SubmitStatus::Success;
                state.snapshot.fields = FormFields::default();
                state.snapshot.errors.clear();
                state.success_generation += 1;
                self.schedule_dismiss(state.success_generation);
            }
            SubmitOutcome::Rejected { message, .. } => {
                state.snapshot.status = SubmitStatus::Error(message.clone());
            }
            SubmitOutcome::NetworkFailure => {
                state.snapshot.status = SubmitStatus::Error(messages::NETWORK_ERROR.to_string());
            }
            SubmitOutcome::NotConfigured => {
                state.snapshot.status =
                    SubmitStatus::Error(messages::ENDPOINT_NOT_CONFIGURED.to_string());
            }
            SubmitOutcome::Invalid(_) | SubmitOutcome::AlreadySubmitting => {}
        }
    }

    /// Return a success banner to idle after the dismiss delay, unless a
    /// newer success or any other status replaced it first.
    fn schedule_dismiss(&self, generation: u64) {
        let state = Arc::downgrade(&self.state);
        let delay = self.config.dismiss_after;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(state) = state.upgrade() else {
                return;
            };
            let mut state = state.write().await;
            if state.success_generation == generation && state.snapshot.status == SubmitStatus::Success {
                state.snapshot.status = SubmitStatus::Idle;
            }
        });
    }
}
