// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for driving submission floods through the intake router.
//!
//! This module provides request generators, flood scenarios and outcome
//! tallies so abuse patterns can be replayed against the real handler stack.

pub mod generators;
pub mod metrics;
pub mod scenarios;

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use contact_intake::{
    config::Config,
    handlers::{router, AppState},
    limiter::FixedWindowStore,
    metrics::IntakeMetrics,
    notifier::{LogNotifier, NotificationDispatcher},
};
use std::sync::Arc;

/// A router wired to an inspectable store and metrics.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<FixedWindowStore>,
    pub metrics: IntakeMetrics,
}

impl TestApp {
    pub fn new(config: Config) -> Self {
        let metrics = IntakeMetrics::new().expect("metrics register");
        let (notifications, _worker) = NotificationDispatcher::spawn(
            Arc::new(LogNotifier),
            &config.notify,
            Some(metrics.clone()),
        );
        Self::with_dispatcher(config, notifications, metrics)
    }

    pub fn with_dispatcher(
        config: Config,
        notifications: NotificationDispatcher,
        metrics: IntakeMetrics,
    ) -> Self {
        let store = Arc::new(FixedWindowStore::new(config.rate_limit.clone()));
        let state = Arc::new(AppState {
            store: store.clone(),
            notifications,
            metrics: config.metrics.enabled.then(|| metrics.clone()),
            config,
        });
        Self {
            router: router(state),
            store,
            metrics,
        }
    }
}

/// POST a raw body to the default contact path as `client`.
pub fn submission_request(client: Option<&str>, body: impl Into<Body>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(client) = client {
        builder = builder.header("x-forwarded-for", client);
    }
    builder.body(body.into()).expect("request builds")
}
