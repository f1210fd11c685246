// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Intake Service
//!
//! Receives the club site's contact form and hands accepted submissions to
//! a notifier. The static site posts directly to this service, so CORS is
//! enabled on the submission route.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! read first when present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `CONTACT_PATH`: Submission route (default: /api/contact)
//! - `MAX_BODY_BYTES`: Largest submission body read (default: 65536)
//! - `RATE_LIMIT_WINDOW_MS`: Rate window (default: 60000)
//! - `RATE_LIMIT_MAX_REQUESTS`: Submissions per window (default: 5)
//! - `NOTIFY_WEBHOOK_URL`: Webhook for accepted submissions (default: log only)
//! - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: any)

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use contact_intake::{
    config::Config,
    handlers::{router, AppState},
    limiter::FixedWindowStore,
    metrics::IntakeMetrics,
    notifier::{LogNotifier, NotificationDispatcher, Notifier, WebhookNotifier},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        contact_path = %config.contact_path,
        window_ms = config.rate_limit.window_ms,
        max_requests = config.rate_limit.max_requests,
        webhook = config.notify.webhook_url.is_some(),
        "Starting contact intake"
    );

    let metrics = IntakeMetrics::new().context("registering metrics")?;
    let notifier = build_notifier(&config)?;
    let (notifications, _worker) =
        NotificationDispatcher::spawn(notifier, &config.notify, Some(metrics.clone()));

    let store = Arc::new(FixedWindowStore::new(config.rate_limit.clone()));

    // Spawn purge task
    let purge_store = store.clone();
    let purge_interval = config.rate_limit.purge_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(purge_interval);
        loop {
            interval.tick().await;
            purge_store.purge_expired().await;
        }
    });

    let state = Arc::new(AppState {
        store,
        notifications,
        metrics: config.metrics.enabled.then_some(metrics),
        config: config.clone(),
    });

    let app = router(state);

    // Start server
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid BIND_ADDR {:?}", config.bind_addr))?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    match &config.notify.webhook_url {
        Some(raw) => {
            let url = Url::parse(raw).with_context(|| format!("invalid NOTIFY_WEBHOOK_URL {raw:?}"))?;
            info!(url = %url, "Forwarding submissions to webhook");
            Ok(Arc::new(WebhookNotifier::new(url, config.notify.timeout())?))
        }
        None => Ok(Arc::new(LogNotifier)),
    }
}
