// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Prometheus counters for submissions and notifications.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Outcome label values for `contact_submissions_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted,
    RateLimited,
    Invalid,
    Malformed,
    Error,
}

impl SubmissionOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::RateLimited => "rate_limited",
            Self::Invalid => "invalid",
            Self::Malformed => "malformed",
            Self::Error => "error",
        }
    }
}

/// Result label values for `contact_notifications_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Delivered,
    Failed,
    Dropped,
}

impl NotificationOutcome {
    fn label(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Failed => "failed",
            Self::Dropped => "dropped",
        }
    }
}

/// Service metrics backed by a private registry.
#[derive(Clone)]
pub struct IntakeMetrics {
    registry: Registry,
    submissions: IntCounterVec,
    notifications: IntCounterVec,
}

impl IntakeMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let submissions = IntCounterVec::new(
            Opts::new("contact_submissions_total", "Contact submissions by outcome"),
            &["outcome"],
        )?;
        let notifications = IntCounterVec::new(
            Opts::new(
                "contact_notifications_total",
                "Submission notifications by delivery result",
            ),
            &["result"],
        )?;

        registry.register(Box::new(submissions.clone()))?;
        registry.register(Box::new(notifications.clone()))?;

        Ok(Self {
            registry,
            submissions,
            notifications,
        })
    }

    pub fn record_submission(&self, outcome: SubmissionOutcome) {
        self.submissions.with_label_values(&[outcome.label()]).inc();
    }

    pub fn record_notification(&self, outcome: NotificationOutcome) {
        self.notifications.with_label_values(&[outcome.label()]).inc();
    }

    pub fn submission_count(&self, outcome: SubmissionOutcome) -> u64 {
        self.submissions.with_label_values(&[outcome.label()]).get()
    }

    pub fn notification_count(&self, outcome: NotificationOutcome) -> u64 {
        self.notifications.with_label_values(&[outcome.label()]).get()
    }

    /// Render every registered metric in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
