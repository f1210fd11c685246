// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Downstream notification of accepted submissions.
//!
//! The request path only enqueues a [`SubmissionRecord`]; a background
//! worker hands it to a [`Notifier`] with bounded retries. A record that
//! cannot be delivered is logged in full at `error` level so it can be
//! recovered from the logs.

use crate::config::NotifyConfig;
use crate::metrics::{IntakeMetrics, NotificationOutcome};
use crate::validator::ValidSubmission;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use url::Url;

/// An accepted submission plus request context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub submission: ValidSubmission,
    pub client_key: String,
    pub received_at: DateTime<Utc>,
}

impl SubmissionRecord {
    pub fn new(submission: ValidSubmission, client_key: impl Into<String>) -> Self {
        Self {
            submission,
            client_key: client_key.into(),
            received_at: Utc::now(),
        }
    }
}

/// Notification errors.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Notification queue is full")]
    QueueFull,

    #[error("Notification worker has stopped")]
    Closed,
}

/// Receiver of accepted submissions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Name used in log fields.
    fn name(&self) -> &'static str;

    /// Deliver one record. Errors are retried by the dispatcher.
    async fn notify(&self, record: &SubmissionRecord) -> Result<(), NotifyError>;
}

/// Writes each submission to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, record: &SubmissionRecord) -> Result<(), NotifyError> {
        info!(
            name = %record.submission.name,
            inquiry_type = %record.submission.inquiry_type,
            contact = %record.submission.contact,
            message = ?record.submission.message,
            client_key = %record.client_key,
            received_at = %record.received_at.to_rfc3339(),
            "Contact form submission"
        );
        Ok(())
    }
}

/// POSTs each submission as JSON to a webhook.
pub struct WebhookNotifier {
    url: Url,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn notify(&self, record: &SubmissionRecord) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(self.url.clone())
            .json(record)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NotifyError::Status(response.status()))
        }
    }
}

/// Handle for enqueueing records to the notification worker.
#[derive(Clone)]
pub struct NotificationDispatcher {
    tx: mpsc::Sender<SubmissionRecord>,
}

impl NotificationDispatcher {
    /// Start the worker. It runs until every dispatcher handle is dropped
    /// and the queue has drained.
    pub fn spawn(
        notifier: Arc<dyn Notifier>,
        config: &NotifyConfig,
        metrics: Option<IntakeMetrics>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let worker = tokio::spawn(run_worker(rx, notifier, config.clone(), metrics));
        (Self { tx }, worker)
    }

    /// Queue a record without waiting. Fails when the queue is full or the
    /// worker is gone; the caller decides how to report that.
    pub fn dispatch(&self, record: SubmissionRecord) -> Result<(), NotifyError> {
        self.tx.try_send(record).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::Closed,
        })
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<SubmissionRecord>,
    notifier: Arc<dyn Notifier>,
    config: NotifyConfig,
    metrics: Option<IntakeMetrics>,
) {
    info!(notifier = notifier.name(), "Notification worker started");
    while let Some(record) = rx.recv().await {
        let outcome = deliver(notifier.as_ref(), &record, &config).await;
        if let Some(metrics) = &metrics {
            metrics.record_notification(outcome);
        }
    }
    info!(notifier = notifier.name(), "Notification worker stopped");
}

async fn deliver(
    notifier: &dyn Notifier,
    record: &SubmissionRecord,
    config: &NotifyConfig,
) -> NotificationOutcome {
    let attempts = config.max_attempts.max(1);

    for attempt in 1..=attempts {
        match notifier.notify(record).await {
            Ok(()) => return NotificationOutcome::Delivered,
            Err(err) => {
                warn!(
                    notifier = notifier.name(),
                    attempt,
                    max_attempts = attempts,
                    error = %err,
                    "Notification attempt failed"
                );
                if attempt < attempts {
                    tokio::time::sleep(config.backoff_for(attempt)).await;
                }
            }
        }
    }

    error!(
        notifier = notifier.name(),
        record = %serde_json::to_string(record).unwrap_or_else(|_| format!("{:?}", record)),
        "Submission notification undeliverable"
    );
    NotificationOutcome::Failed
}
